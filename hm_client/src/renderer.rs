//! Plain text renderer for the hangman screen.

use hangman::{
    Renderer,
    projector::{ActionLabel, ImageKind, Tone},
};
use std::fmt::Write;

const RULE_WIDTH: usize = 40;

/// Keeps the last value pushed to every sink and draws them as text.
#[derive(Debug)]
pub struct TerminalRenderer {
    word: String,
    incorrect_guesses: String,
    chances_left: u8,
    message: String,
    tone: Tone,
    image: Option<ImageKind>,
    input_enabled: bool,
    action_label: ActionLabel,
    pending_input_clear: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            word: String::new(),
            incorrect_guesses: String::new(),
            chances_left: 0,
            message: String::new(),
            tone: Tone::Neutral,
            image: None,
            input_enabled: true,
            action_label: ActionLabel::Guess,
            pending_input_clear: false,
        }
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn message(&self) -> (&str, Tone) {
        (&self.message, self.tone)
    }

    pub fn image(&self) -> Option<ImageKind> {
        self.image
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn action_label(&self) -> ActionLabel {
        self.action_label
    }

    /// Returns whether an input clear was requested since the last call.
    pub fn take_input_clear(&mut self) -> bool {
        std::mem::take(&mut self.pending_input_clear)
    }

    /// Draws the whole screen.
    pub fn draw(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "HANGMAN");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Word:      {}", spaced(&self.word));
        let _ = writeln!(out, "Incorrect: {}", self.incorrect_guesses);
        let _ = writeln!(out, "Chances:   {}", self.chances_left);

        if !self.message.is_empty() {
            let _ = writeln!(out, "{}{}", tone_prefix(self.tone), self.message);
        }
        if let Some(image) = self.image {
            let _ = writeln!(out, "[{}]", image.source());
        }

        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let _ = if self.input_enabled {
            writeln!(out, "{}: type a letter, or 'help'", self.action_label)
        } else {
            writeln!(out, "{}: press Enter to play again", self.action_label)
        };

        out
    }
}

impl Renderer for TerminalRenderer {
    fn set_word(&mut self, word: &str) {
        self.word = word.to_string();
    }

    fn set_incorrect_guesses(&mut self, list: &str) {
        self.incorrect_guesses = list.to_string();
    }

    fn set_chances_left(&mut self, chances: u8) {
        self.chances_left = chances;
    }

    fn set_message(&mut self, text: &str, tone: Tone) {
        self.message = text.to_string();
        self.tone = tone;
    }

    fn show_image(&mut self, image: ImageKind) {
        self.image = Some(image);
    }

    fn hide_image(&mut self) {
        self.image = None;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_action_label(&mut self, label: ActionLabel) {
        self.action_label = label;
    }

    fn clear_input(&mut self) {
        self.pending_input_clear = true;
    }
}

fn tone_prefix(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "",
        Tone::Success => "[+] ",
        Tone::Warning => "[!] ",
        Tone::Failure => "[x] ",
    }
}

fn spaced(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for (i, c) in word.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
