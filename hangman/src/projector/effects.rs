//! Renderer-facing side effects of a server event.

use std::fmt;

use super::Renderer;

/// Styling of the game message line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Failure,
}

/// Image shown once a game is over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageKind {
    Success,
    Failure,
}

impl ImageKind {
    /// Asset path served next to the web renderer
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::Success => "static/kanna.gif",
            Self::Failure => "static/sad_kanna.gif",
        }
    }
}

/// Label of the main action control.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionLabel {
    Guess,
    Restart,
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Guess => "Guess",
            Self::Restart => "Restart",
        };
        f.write_str(repr)
    }
}

/// Everything a renderer must change for one event.
///
/// `None` leaves the corresponding sink untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderEffects {
    pub word: Option<String>,
    pub incorrect_guesses: Option<String>,
    pub chances_left: Option<u8>,
    pub message: Option<(String, Tone)>,
    /// `Some(None)` hides the image.
    pub image: Option<Option<ImageKind>>,
    pub input_enabled: Option<bool>,
    pub action_label: Option<ActionLabel>,
    pub clear_input: bool,
}

impl RenderEffects {
    /// True when applying these effects would not touch the renderer
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if let Some(word) = &self.word {
            renderer.set_word(word);
        }
        if let Some(list) = &self.incorrect_guesses {
            renderer.set_incorrect_guesses(list);
        }
        if let Some(chances) = self.chances_left {
            renderer.set_chances_left(chances);
        }
        if let Some((text, tone)) = &self.message {
            renderer.set_message(text, *tone);
        }
        match self.image {
            Some(Some(image)) => renderer.show_image(image),
            Some(None) => renderer.hide_image(),
            None => {}
        }
        if let Some(enabled) = self.input_enabled {
            renderer.set_input_enabled(enabled);
        }
        if let Some(label) = self.action_label {
            renderer.set_action_label(label);
        }
        if self.clear_input {
            renderer.clear_input();
        }
    }
}
