//! Hangman state machine.
//!
//! [`HangmanGame`] is the single source of truth for a game. Every guess is
//! validated and applied here; clients never evaluate rules themselves.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{DEFAULT_CHANCES, LOSS_MESSAGE_PREFIX, MAX_CHANCES, WIN_MESSAGE};
use super::entities::{
    GameView, GuessHistory, GuessOutcome, Letter, LifecycleState, RevealMask, SecretName,
};

/// Errors building a game
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("secret name is empty")]
    EmptySecret,
    #[error("secret name contains unsupported character {0:?}")]
    UnsupportedCharacter(char),
    #[error("secret name has no letters to guess")]
    NoLetters,
    #[error("chances must be between 1 and {max}, got {actual}")]
    InvalidChances { actual: u8, max: u8 },
}

/// Reasons a guess did not change the game.
///
/// The display strings are the texts shown to the player.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GuessError {
    #[error("Please enter a valid single letter.")]
    InvalidInput,
    #[error("You already picked {0}.")]
    AlreadyGuessed(Letter),
    #[error("The game is over. Restart to play again.")]
    Inapplicable,
}

/// Authoritative hangman game.
#[derive(Clone, Debug)]
pub struct HangmanGame {
    secret: SecretName,
    mask: RevealMask,
    incorrect: GuessHistory,
    repeated: Option<Letter>,
    chances_left: u8,
    max_chances: u8,
    state: LifecycleState,
    version: u64,
}

impl Default for HangmanGame {
    fn default() -> Self {
        Self::new(SecretName::default())
    }
}

impl HangmanGame {
    /// New game in `Start` with the default number of chances.
    #[must_use]
    pub fn new(secret: SecretName) -> Self {
        let mask = RevealMask::new(&secret);
        Self {
            secret,
            mask,
            incorrect: GuessHistory::new(),
            repeated: None,
            chances_left: DEFAULT_CHANCES,
            max_chances: DEFAULT_CHANCES,
            state: LifecycleState::Start,
            version: 0,
        }
    }

    pub fn with_chances(secret: SecretName, max_chances: u8) -> Result<Self, GameError> {
        if max_chances == 0 || max_chances > MAX_CHANCES {
            return Err(GameError::InvalidChances {
                actual: max_chances,
                max: MAX_CHANCES,
            });
        }
        let mut game = Self::new(secret);
        game.max_chances = max_chances;
        game.chances_left = max_chances;
        Ok(game)
    }

    /// Resets every field to its `Start` value for `secret`.
    ///
    /// The snapshot version keeps counting so a new game never looks older
    /// than the one it replaces.
    pub fn initialize(&mut self, secret: SecretName) -> GameView {
        self.mask = RevealMask::new(&secret);
        self.secret = secret;
        self.incorrect.clear();
        self.repeated = None;
        self.chances_left = self.max_chances;
        self.state = LifecycleState::Start;
        self.version += 1;
        self.view()
    }

    /// Restarts with the same secret name.
    pub fn restart(&mut self) -> GameView {
        let secret = self.secret.clone();
        self.initialize(secret)
    }

    /// Parses and applies a raw guess.
    ///
    /// Input is lowercased before validation; anything that is not then a
    /// single `a..=z` character is `Invalid` and leaves the game untouched.
    pub fn submit_guess(&mut self, raw: &str) -> (GameView, GuessOutcome) {
        let outcome = match raw.parse::<Letter>() {
            Ok(letter) => self.guess(letter),
            Err(_) => GuessOutcome::Invalid,
        };
        debug!("guess {raw:?} -> {outcome} ({})", self.state);
        (self.view(), outcome)
    }

    /// Applies a validated guess.
    pub fn guess(&mut self, letter: Letter) -> GuessOutcome {
        if self.state.is_terminal() {
            return GuessOutcome::Inapplicable;
        }

        if self.incorrect.contains(letter) || self.mask.contains(letter) {
            self.repeated = Some(letter);
            self.version += 1;
            return GuessOutcome::AlreadyGuessed;
        }

        self.repeated = None;
        let outcome = if self.secret.contains(letter) {
            self.mask.reveal(&self.secret, letter);
            GuessOutcome::Accepted
        } else {
            self.incorrect.insert(letter);
            self.chances_left = self.chances_left.saturating_sub(1);
            GuessOutcome::Rejected
        };
        self.state = self.evaluate();
        self.version += 1;
        outcome
    }

    fn evaluate(&self) -> LifecycleState {
        if self.mask.is_complete() {
            LifecycleState::Won
        } else if self.chances_left == 0 {
            LifecycleState::Lost
        } else {
            LifecycleState::Going
        }
    }

    fn message(&self) -> String {
        match self.state {
            LifecycleState::Won => WIN_MESSAGE.to_string(),
            LifecycleState::Lost => format!("{LOSS_MESSAGE_PREFIX} {}", self.secret),
            LifecycleState::Start | LifecycleState::Going => String::new(),
        }
    }

    /// Snapshot of the current game.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView {
            guessed_character: self.mask.to_symbols(),
            incorrect_guesses: self.incorrect.iter().map(String::from).collect(),
            repeated_guess: self.repeated.map(String::from).unwrap_or_default(),
            chances_left: self.chances_left,
            game_state: self.state,
            message: self.message(),
            version: self.version,
        }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Counter bumped by every change a client can see.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn chances_left(&self) -> u8 {
        self.chances_left
    }

    #[must_use]
    pub fn max_chances(&self) -> u8 {
        self.max_chances
    }

    #[must_use]
    pub fn secret(&self) -> &SecretName {
        &self.secret
    }

    #[must_use]
    pub fn mask(&self) -> &RevealMask {
        &self.mask
    }

    #[must_use]
    pub fn incorrect_guesses(&self) -> &GuessHistory {
        &self.incorrect
    }

    #[must_use]
    pub fn repeated_guess(&self) -> Option<Letter> {
        self.repeated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str) -> HangmanGame {
        HangmanGame::new(SecretName::new(name).unwrap())
    }

    fn unversioned(view: GameView) -> GameView {
        GameView { version: 0, ..view }
    }

    #[test]
    fn test_new_game_starts_clean() {
        let view = game("kanna kamui").view();

        assert_eq!(view.game_state, LifecycleState::Start);
        assert_eq!(view.chances_left, DEFAULT_CHANCES);
        assert_eq!(view.revealed_word(), "_____ _____");
        assert!(view.incorrect_guesses.is_empty());
        assert!(view.repeated_guess.is_empty());
        assert!(view.message.is_empty());
    }

    #[test]
    fn test_kanna_kamui_walkthrough() {
        let mut g = game("kanna kamui");

        let (view, outcome) = g.submit_guess("k");
        assert_eq!(outcome, GuessOutcome::Accepted);
        assert_eq!(view.revealed_word(), "k____ k____");
        assert_eq!(view.game_state, LifecycleState::Going);

        for letter in ["a", "n", "u", "i"] {
            let (view, outcome) = g.submit_guess(letter);
            assert_eq!(outcome, GuessOutcome::Accepted);
            assert_eq!(view.game_state, LifecycleState::Going);
        }

        let (view, outcome) = g.submit_guess("m");
        assert_eq!(outcome, GuessOutcome::Accepted);
        assert_eq!(view.revealed_word(), "kanna kamui");
        assert_eq!(view.game_state, LifecycleState::Won);
        assert_eq!(view.message, WIN_MESSAGE);
        assert_eq!(view.chances_left, DEFAULT_CHANCES);
    }

    #[test]
    fn test_cat_six_wrong_guesses_loses() {
        let mut g = game("cat");

        for (i, letter) in ["x", "y", "z", "w", "v"].iter().enumerate() {
            let (view, outcome) = g.submit_guess(letter);
            assert_eq!(outcome, GuessOutcome::Rejected);
            assert_eq!(view.chances_left, DEFAULT_CHANCES - 1 - i as u8);
            assert_eq!(view.game_state, LifecycleState::Going);
        }

        let (view, outcome) = g.submit_guess("u");
        assert_eq!(outcome, GuessOutcome::Rejected);
        assert_eq!(view.chances_left, 0);
        assert_eq!(view.game_state, LifecycleState::Lost);
        assert_eq!(view.message, "You lose! The character was: cat");
        assert_eq!(view.incorrect_list(), "x, y, z, w, v, u");
    }

    #[test]
    fn test_invalid_guesses_do_not_mutate() {
        let mut g = game("cat");
        let before = g.view();

        for raw in ["5", "ab", "", " ", "?"] {
            let (view, outcome) = g.submit_guess(raw);
            assert_eq!(outcome, GuessOutcome::Invalid, "{raw:?}");
            assert_eq!(view, before);
        }
        assert_eq!(g.state(), LifecycleState::Start);
    }

    #[test]
    fn test_uppercase_guess_is_case_insensitive() {
        let mut g = game("cat");
        let (view, outcome) = g.submit_guess("C");
        assert_eq!(outcome, GuessOutcome::Accepted);
        assert_eq!(view.revealed_word(), "c__");
    }

    #[test]
    fn test_repeated_guess_only_echoes() {
        let mut g = game("cat");
        g.submit_guess("c");
        g.submit_guess("x");
        let before = g.view();

        let (view, outcome) = g.submit_guess("x");
        assert_eq!(outcome, GuessOutcome::AlreadyGuessed);
        assert_eq!(view.repeated_guess, "x");
        assert_eq!(view.chances_left, before.chances_left);
        assert_eq!(view.guessed_character, before.guessed_character);
        assert_eq!(view.incorrect_guesses, before.incorrect_guesses);
        assert_eq!(view.game_state, before.game_state);

        let (view, outcome) = g.submit_guess("c");
        assert_eq!(outcome, GuessOutcome::AlreadyGuessed);
        assert_eq!(view.repeated_guess, "c");

        // A fresh guess clears the echo
        let (view, _) = g.submit_guess("a");
        assert!(view.repeated_guess.is_empty());
    }

    #[test]
    fn test_terminal_state_is_inapplicable() {
        let mut g = game("ab");
        g.submit_guess("a");
        g.submit_guess("b");
        assert_eq!(g.state(), LifecycleState::Won);
        let before = g.view();

        let (view, outcome) = g.submit_guess("z");
        assert_eq!(outcome, GuessOutcome::Inapplicable);
        assert_eq!(view, before);

        // Validation still runs first
        let (_, outcome) = g.submit_guess("42");
        assert_eq!(outcome, GuessOutcome::Invalid);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut g = game("cat");
        for letter in ["c", "x", "x"] {
            g.submit_guess(letter);
        }

        let first = g.restart();
        let second = g.restart();

        assert_eq!(unversioned(first.clone()), unversioned(second.clone()));
        assert_eq!(unversioned(first.clone()), game("cat").view());
        assert_eq!(first.game_state, LifecycleState::Start);
        assert!(second.version > first.version);
    }

    #[test]
    fn test_version_tracks_visible_changes() {
        let mut g = game("cat");
        assert_eq!(g.version(), 0);

        let (view, _) = g.submit_guess("c");
        assert_eq!(view.version, 1);
        let (view, _) = g.submit_guess("x");
        assert_eq!(view.version, 2);
        let (view, _) = g.submit_guess("x");
        assert_eq!(view.version, 3, "repeated echo is a visible change");

        let (view, _) = g.submit_guess("42");
        assert_eq!(view.version, 3, "invalid input changes nothing");

        assert_eq!(g.restart().version, 4);
        assert_eq!(g.initialize(SecretName::new("elma").unwrap()).version, 5);
    }

    #[test]
    fn test_terminal_guess_keeps_version() {
        let mut g = game("ab");
        g.submit_guess("a");
        let (won, _) = g.submit_guess("b");
        let (view, outcome) = g.submit_guess("z");
        assert_eq!(outcome, GuessOutcome::Inapplicable);
        assert_eq!(view.version, won.version);
    }

    #[test]
    fn test_initialize_switches_secret() {
        let mut g = game("cat");
        g.submit_guess("c");

        let view = g.initialize(SecretName::new("tohru").unwrap());
        assert_eq!(view.revealed_word(), "_____");
        assert_eq!(g.secret().as_str(), "tohru");
        assert_eq!(view.game_state, LifecycleState::Start);
    }

    #[test]
    fn test_single_guess_can_win_from_start() {
        let mut g = game("aaa");
        let (view, outcome) = g.submit_guess("a");
        assert_eq!(outcome, GuessOutcome::Accepted);
        assert_eq!(view.game_state, LifecycleState::Won);
    }

    #[test]
    fn test_with_chances_bounds() {
        let secret = SecretName::new("cat").unwrap();
        assert!(matches!(
            HangmanGame::with_chances(secret.clone(), 0),
            Err(GameError::InvalidChances { actual: 0, .. })
        ));
        assert!(HangmanGame::with_chances(secret.clone(), MAX_CHANCES + 1).is_err());

        let mut g = HangmanGame::with_chances(secret, 1).unwrap();
        let (view, _) = g.submit_guess("q");
        assert_eq!(view.game_state, LifecycleState::Lost);
        assert_eq!(g.restart().chances_left, 1);
    }

    #[test]
    fn test_guess_error_texts() {
        let x: Letter = "x".parse().unwrap();
        assert_eq!(
            GuessError::InvalidInput.to_string(),
            "Please enter a valid single letter."
        );
        assert_eq!(GuessError::AlreadyGuessed(x).to_string(), "You already picked x.");
    }
}
