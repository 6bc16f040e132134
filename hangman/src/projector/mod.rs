//! Client-side projection of server events onto a renderer.
//!
//! The projector never evaluates game rules. Every effect is a function of
//! the latest event alone, so applying the same snapshot twice is harmless.

mod effects;

pub use effects::{ActionLabel, ImageKind, RenderEffects, Tone};

use crate::{
    game::{
        GuessError,
        entities::{GameView, Letter, LifecycleState},
    },
    net::{
        errors::ProtocolError,
        messages::{ClientCommand, ServerEvent},
        utils,
    },
};

/// Observable sinks of a game screen.
pub trait Renderer {
    fn set_word(&mut self, word: &str);
    fn set_incorrect_guesses(&mut self, list: &str);
    fn set_chances_left(&mut self, chances: u8);
    fn set_message(&mut self, text: &str, tone: Tone);
    fn show_image(&mut self, image: ImageKind);
    fn hide_image(&mut self);
    fn set_input_enabled(&mut self, enabled: bool);
    fn set_action_label(&mut self, label: ActionLabel);
    fn clear_input(&mut self);
}

/// Maps a snapshot onto renderer effects.
#[must_use]
pub fn render(view: &GameView) -> RenderEffects {
    let mut effects = RenderEffects {
        word: Some(view.revealed_word()),
        incorrect_guesses: Some(view.incorrect_list()),
        chances_left: Some(view.chances_left),
        clear_input: true,
        ..RenderEffects::default()
    };

    match view.game_state {
        LifecycleState::Won | LifecycleState::Lost => {
            let (tone, image) = if view.game_state == LifecycleState::Won {
                (Tone::Success, ImageKind::Success)
            } else {
                (Tone::Failure, ImageKind::Failure)
            };
            effects.message = Some((view.message.clone(), tone));
            effects.image = Some(Some(image));
            effects.input_enabled = Some(false);
            effects.action_label = Some(ActionLabel::Restart);
        }
        LifecycleState::Start | LifecycleState::Going => {
            effects.message = Some(match repeated_guess_warning(view) {
                Some(warning) => (warning, Tone::Warning),
                None => (view.message.clone(), Tone::Neutral),
            });
            effects.image = Some(None);
            effects.input_enabled = Some(true);
            effects.action_label = Some(ActionLabel::Guess);
        }
    }

    effects
}

/// Maps any server event onto renderer effects.
#[must_use]
pub fn render_event(event: &ServerEvent) -> RenderEffects {
    match event {
        ServerEvent::State(view) => render(view),
        ServerEvent::InvalidCharacter => RenderEffects {
            message: Some((GuessError::InvalidInput.to_string(), Tone::Warning)),
            clear_input: true,
            ..RenderEffects::default()
        },
        ServerEvent::Notification(_) => RenderEffects::default(),
    }
}

fn repeated_guess_warning(view: &GameView) -> Option<String> {
    if !view.has_repeated_guess() {
        return None;
    }
    let letter = view.repeated_guess.parse::<Letter>().ok()?;
    Some(GuessError::AlreadyGuessed(letter).to_string())
}

/// Keeps a renderer in sync with the server.
pub struct ClientProjector<R> {
    renderer: R,
    last_view: Option<GameView>,
}

impl<R: Renderer> ClientProjector<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            last_view: None,
        }
    }

    /// Applies one event and returns the effects that were applied.
    ///
    /// A snapshot older than the last one applied, or an exact repeat of it,
    /// is dropped and yields empty effects.
    pub fn handle_event(&mut self, event: &ServerEvent) -> RenderEffects {
        if let ServerEvent::State(view) = event
            && self.is_outdated(view)
        {
            return RenderEffects::default();
        }

        let effects = render_event(event);
        effects.apply(&mut self.renderer);
        if let ServerEvent::State(view) = event {
            self.last_view = Some(view.clone());
        }
        effects
    }

    /// Decodes a text frame and applies it.
    ///
    /// # Errors
    ///
    /// Returns the decode error for frames that are not a known envelope;
    /// the renderer is left untouched.
    pub fn handle_text(&mut self, text: &str) -> Result<RenderEffects, ProtocolError> {
        let event: ServerEvent = utils::decode(text)?;
        Ok(self.handle_event(&event))
    }

    fn is_outdated(&self, view: &GameView) -> bool {
        self.last_view
            .as_ref()
            .is_some_and(|last| view.version < last.version || view == last)
    }

    /// Request for the main action control given the current input.
    ///
    /// Once the game is over the control restarts; otherwise the input is
    /// forwarded untouched as a guess.
    #[must_use]
    pub fn action_intent(&self, input: &str) -> ClientCommand {
        if self.is_game_over() {
            ClientCommand::Restart
        } else {
            ClientCommand::Guess(input.to_string())
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.last_view
            .as_ref()
            .is_some_and(|view| view.game_state.is_terminal())
    }

    #[must_use]
    pub fn last_view(&self) -> Option<&GameView> {
        self.last_view.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
