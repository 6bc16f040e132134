//! Engine and projector kept in sync through encoded protocol frames,
//! the way a server and a browser talk over a socket.

use hangman::{
    ClientCommand, ClientProjector, GameView, GuessOutcome, LifecycleState, RenderEffects,
    Renderer, ServerEvent, SessionConfig, SessionManager,
    projector::{ActionLabel, ImageKind, Tone},
    utils,
};
use tokio::sync::watch;

/// Renderer that records the latest value of every sink.
#[derive(Debug, Default)]
struct Screen {
    word: String,
    incorrect: String,
    chances: u8,
    message: String,
    image: Option<ImageKind>,
    input_enabled: bool,
    label: Option<ActionLabel>,
}

impl Renderer for Screen {
    fn set_word(&mut self, word: &str) {
        self.word = word.to_string();
    }
    fn set_incorrect_guesses(&mut self, list: &str) {
        self.incorrect = list.to_string();
    }
    fn set_chances_left(&mut self, chances: u8) {
        self.chances = chances;
    }
    fn set_message(&mut self, text: &str, _tone: Tone) {
        self.message = text.to_string();
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
        self.label = Some(label);
    }
    fn clear_input(&mut self) {}
}

/// Sends a client request through the codec, mimicking the server side
/// handling of it, and returns every frame the client would receive.
async fn exchange(
    session: &hangman::SessionHandle,
    events: &mut watch::Receiver<GameView>,
    command: &ClientCommand,
) -> Vec<String> {
    let frame = utils::encode(command).unwrap();
    let decoded: ClientCommand = utils::decode(&frame).unwrap();

    let mut frames = Vec::new();
    match decoded {
        ClientCommand::Guess(letter) => {
            let response = session.guess(letter).await.unwrap();
            if response.outcome() == Some(GuessOutcome::Invalid) {
                frames.push(utils::encode(&ServerEvent::InvalidCharacter).unwrap());
            }
        }
        ClientCommand::Restart => {
            session.restart().await.unwrap();
        }
    }

    if events.has_changed().unwrap() {
        let event = ServerEvent::State(events.borrow_and_update().clone());
        frames.push(utils::encode(&event).unwrap());
    }
    frames
}

/// The snapshot a freshly subscribed connection is sent first
async fn initial_event(events: &mut watch::Receiver<GameView>) -> ServerEvent {
    events.changed().await.unwrap();
    ServerEvent::State(events.borrow_and_update().clone())
}

fn apply_all(projector: &mut ClientProjector<Screen>, frames: &[String]) -> Vec<RenderEffects> {
    frames
        .iter()
        .map(|frame| projector.handle_text(frame).unwrap())
        .collect()
}

#[tokio::test]
async fn test_full_game_won_then_restarted() {
    let manager = SessionManager::new(SessionConfig::default(), 4).unwrap();
    let session = manager.create_session().await.unwrap();
    let mut rx = session.subscribe().await.unwrap();

    let mut projector = ClientProjector::new(Screen::default());

    // Initial snapshot on subscribe
    let initial = initial_event(&mut rx).await;
    projector.handle_event(&initial);
    assert_eq!(projector.renderer().word, "_____ _____");
    assert_eq!(projector.renderer().chances, 6);

    for letter in ["k", "a", "n", "u", "i", "m"] {
        let command = projector.action_intent(letter);
        let frames = exchange(&session, &mut rx, &command).await;
        assert_eq!(frames.len(), 1, "one snapshot per accepted guess");
        apply_all(&mut projector, &frames);
    }

    let screen = projector.renderer();
    assert_eq!(screen.word, "kanna kamui");
    assert_eq!(screen.message, "Congratulations! You win!");
    assert_eq!(screen.image, Some(ImageKind::Success));
    assert!(!screen.input_enabled);
    assert_eq!(screen.label, Some(ActionLabel::Restart));

    // The action control now restarts regardless of input
    let command = projector.action_intent("z");
    assert_eq!(command, ClientCommand::Restart);
    let frames = exchange(&session, &mut rx, &command).await;
    apply_all(&mut projector, &frames);

    let screen = projector.renderer();
    assert_eq!(screen.word, "_____ _____");
    assert_eq!(screen.message, "");
    assert_eq!(screen.image, None);
    assert!(screen.input_enabled);
    assert_eq!(
        projector.last_view().map(|v| v.game_state),
        Some(LifecycleState::Start)
    );
}

#[tokio::test]
async fn test_invalid_and_repeated_guesses() {
    let manager = SessionManager::new(SessionConfig::default(), 4).unwrap();
    let session = manager.create_session().await.unwrap();
    let mut rx = session.subscribe().await.unwrap();

    let mut projector = ClientProjector::new(Screen::default());
    projector.handle_event(&initial_event(&mut rx).await);

    let frames = exchange(&session, &mut rx, &ClientCommand::Guess("ab".into())).await;
    assert_eq!(frames, vec![r#"{"name":"invalid_character"}"#.to_string()]);
    apply_all(&mut projector, &frames);
    assert_eq!(projector.renderer().message, "Please enter a valid single letter.");
    assert_eq!(projector.renderer().chances, 6);

    let frames = exchange(&session, &mut rx, &ClientCommand::Guess("z".into())).await;
    apply_all(&mut projector, &frames);
    assert_eq!(projector.renderer().incorrect, "z");
    assert_eq!(projector.renderer().chances, 5);

    let frames = exchange(&session, &mut rx, &ClientCommand::Guess("Z".into())).await;
    apply_all(&mut projector, &frames);
    assert_eq!(projector.renderer().message, "You already picked z.");
    assert_eq!(projector.renderer().chances, 5);
}

#[tokio::test]
async fn test_every_subscriber_sees_the_same_snapshot() {
    let manager = SessionManager::new(SessionConfig::default(), 4).unwrap();
    let session = manager.create_session().await.unwrap();

    let mut rx_a = session.subscribe().await.unwrap();
    let mut rx_b = session.subscribe().await.unwrap();
    initial_event(&mut rx_a).await;
    initial_event(&mut rx_b).await;

    session.guess("k").await.unwrap();

    rx_a.changed().await.unwrap();
    rx_b.changed().await.unwrap();
    let a = rx_a.borrow_and_update().clone();
    let b = rx_b.borrow_and_update().clone();
    assert_eq!(a, b);
    assert_eq!(a.revealed_word(), "k____ k____");
}

#[tokio::test]
async fn test_lagging_renderer_catches_up_to_latest_snapshot() {
    let manager = SessionManager::new(SessionConfig::default(), 4).unwrap();
    let session = manager.create_session().await.unwrap();
    let mut rx = session.subscribe().await.unwrap();
    let mut projector = ClientProjector::new(Screen::default());

    // The renderer reads nothing while two guesses are applied
    session.guess("k").await.unwrap();
    session.guess("z").await.unwrap();

    projector.handle_event(&initial_event(&mut rx).await);

    let screen = projector.renderer();
    assert_eq!(screen.word, "k____ k____");
    assert_eq!(screen.chances, 5);
    assert_eq!(screen.incorrect, "z");
    assert_eq!(
        projector.last_view().map(|v| v.game_state),
        Some(LifecycleState::Going)
    );
}

#[tokio::test]
async fn test_rotating_secrets_stay_within_candidates() {
    let config = SessionConfig {
        secret_names: vec!["tohru".parse().unwrap(), "elma".parse().unwrap()],
        rotate_secrets: true,
        ..SessionConfig::default()
    };
    let manager = SessionManager::new(config, 4).unwrap();
    let session = manager.create_session().await.unwrap();

    let mut lengths = Vec::new();
    for _ in 0..6 {
        let view = session.restart().await.unwrap().into_view();
        assert_eq!(view.game_state, LifecycleState::Start);
        lengths.push(view.guessed_character.len());
    }

    // With two candidates rotation alternates between them
    assert!(lengths.iter().all(|len| *len == 5 || *len == 4));
    assert!(lengths.windows(2).all(|pair| pair[0] != pair[1]));
}
