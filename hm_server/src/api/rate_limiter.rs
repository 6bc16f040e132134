//! Per-connection frame rate limiting.
//!
//! Every WebSocket connection gets a [`FrameLimiter`]. Frames over the limit
//! are dropped and answered with a notification instead of reaching the
//! session actor.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding window limiter
#[derive(Debug)]
pub struct RateLimiter {
    /// Timestamps of accepted frames inside the window
    timestamps: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per `window`
    ///
    /// # Example
    ///
    /// ```
    /// use hm_server::api::rate_limiter::RateLimiter;
    /// use std::time::Duration;
    ///
    /// let mut limiter = RateLimiter::new(2, Duration::from_secs(1));
    /// assert!(limiter.check());
    /// assert!(limiter.check());
    /// assert!(!limiter.check());
    /// ```
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(max_requests),
            max_requests,
            window,
        }
    }

    /// Returns `true` and records the frame if it fits in the window
    pub fn check(&mut self) -> bool {
        self.check_at(Instant::now())
    }

    fn check_at(&mut self, now: Instant) -> bool {
        if !self.has_room_at(now) {
            return false;
        }
        self.record(now);
        true
    }

    /// Drops expired frames and tells whether one more would fit
    fn has_room_at(&mut self, now: Instant) -> bool {
        while let Some(ts) = self.timestamps.front() {
            if now.duration_since(*ts) > self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
        self.timestamps.len() < self.max_requests
    }

    fn record(&mut self, now: Instant) {
        self.timestamps.push_back(now);
    }

    /// Frames still allowed in the current window
    pub fn remaining(&self) -> usize {
        self.max_requests.saturating_sub(self.timestamps.len())
    }

    /// Time until the oldest recorded frame leaves the window
    pub fn reset_in(&self) -> Option<Duration> {
        self.reset_in_at(Instant::now())
    }

    fn reset_in_at(&self, now: Instant) -> Option<Duration> {
        self.timestamps.front().map(|oldest| {
            let elapsed = now.duration_since(*oldest);
            self.window.saturating_sub(elapsed)
        })
    }
}

/// Burst plus sustained limits for one connection
#[derive(Debug)]
pub struct FrameLimiter {
    burst: RateLimiter,
    sustained: RateLimiter,
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(
            RateLimiter::new(10, Duration::from_secs(1)),
            RateLimiter::new(100, Duration::from_secs(60)),
        )
    }
}

impl FrameLimiter {
    pub fn new(burst: RateLimiter, sustained: RateLimiter) -> Self {
        Self { burst, sustained }
    }

    /// Accepts a frame or returns how long the client should back off
    ///
    /// A refused frame is not recorded in either window.
    pub fn check(&mut self) -> Result<(), Duration> {
        self.check_at(Instant::now())
    }

    fn check_at(&mut self, now: Instant) -> Result<(), Duration> {
        if !self.burst.has_room_at(now) {
            return Err(self.burst.reset_in_at(now).unwrap_or_default());
        }
        if !self.sustained.has_room_at(now) {
            return Err(self.sustained.reset_in_at(now).unwrap_or_default());
        }
        self.burst.record(now);
        self.sustained.record(now);
        Ok(())
    }
}

/// Notification text sent for a dropped frame
pub fn rate_limited_message(retry_after: Duration) -> String {
    format!(
        "Too many messages, slow down (retry in {} ms)",
        retry_after.as_millis().max(1)
    )
}
