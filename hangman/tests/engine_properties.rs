/// Property-based tests for the hangman engine using proptest
///
/// These tests drive the engine with random secret names and guess
/// sequences and check the invariants that must hold after every step.
use hangman::{GuessOutcome, HangmanGame, LifecycleState, SecretName};
use proptest::prelude::*;

// Strategy for a valid secret name: 1-3 words of 1-8 lowercase letters
fn secret_strategy() -> impl Strategy<Value = SecretName> {
    prop::collection::vec("[a-z]{1,8}", 1..=3)
        .prop_map(|words| words.join(" ").parse().expect("generated secret is valid"))
}

// Strategy for a single guessable letter
fn letter_strategy() -> impl Strategy<Value = String> {
    (b'a'..=b'z').prop_map(|b| char::from(b).to_string())
}

fn unversioned(view: hangman::GameView) -> hangman::GameView {
    hangman::GameView { version: 0, ..view }
}

fn revealed_count(view: &hangman::GameView) -> usize {
    view.guessed_character.iter().filter(|s| *s != "_").count()
}

proptest! {
    #[test]
    fn test_new_wrong_letter_costs_exactly_one_chance(
        secret in secret_strategy(),
        letter in letter_strategy(),
    ) {
        prop_assume!(!secret.as_str().contains(letter.as_str()));
        let mut game = HangmanGame::new(secret);
        let before = game.view();

        let (after, outcome) = game.submit_guess(&letter);

        prop_assert_eq!(outcome, GuessOutcome::Rejected);
        prop_assert_eq!(after.chances_left, before.chances_left - 1);
        prop_assert_eq!(after.guessed_character, before.guessed_character);
    }

    #[test]
    fn test_all_distinct_letters_in_any_order_win(
        secret in secret_strategy(),
        seed in any::<u64>(),
    ) {
        let mut letters = secret.distinct_letters();
        // Deterministic shuffle driven by the seed
        let len = letters.len();
        for i in 0..len {
            let j = (seed.wrapping_mul(i as u64 + 1) as usize) % len;
            letters.swap(i, j);
        }

        let mut game = HangmanGame::new(secret);
        for letter in letters {
            prop_assert_ne!(game.state(), LifecycleState::Lost);
            prop_assert_eq!(game.guess(letter), GuessOutcome::Accepted);
        }
        prop_assert_eq!(game.state(), LifecycleState::Won);
        prop_assert_eq!(game.chances_left(), hangman::DEFAULT_CHANCES);
    }

    #[test]
    fn test_invariants_hold_for_any_guess_sequence(
        secret in secret_strategy(),
        guesses in prop::collection::vec("[a-zA-Z0-9 ]{0,2}", 0..40),
    ) {
        let mut game = HangmanGame::new(secret);

        for guess in &guesses {
            let before = game.view();
            let (view, outcome) = game.submit_guess(guess);

            // Chances never increase and hit zero only when lost
            prop_assert!(view.chances_left <= before.chances_left);
            if view.chances_left == 0 {
                prop_assert_eq!(view.game_state, LifecycleState::Lost);
            }

            // Revealed slots never shrink
            prop_assert!(revealed_count(&view) >= revealed_count(&before));

            // Incorrect guesses stay unique and disjoint from the mask
            let mut seen = view.incorrect_guesses.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), view.incorrect_guesses.len());
            for wrong in &view.incorrect_guesses {
                prop_assert!(!view.guessed_character.contains(wrong));
            }

            match outcome {
                GuessOutcome::Invalid | GuessOutcome::Inapplicable => {
                    prop_assert_eq!(&view, &before);
                }
                GuessOutcome::AlreadyGuessed => {
                    prop_assert_eq!(view.chances_left, before.chances_left);
                    prop_assert_eq!(&view.guessed_character, &before.guessed_character);
                    prop_assert_eq!(view.game_state, before.game_state);
                }
                GuessOutcome::Accepted | GuessOutcome::Rejected => {
                    prop_assert_ne!(view.game_state, LifecycleState::Start);
                }
            }

            // Won exactly when every slot is revealed
            let complete = view.guessed_character.iter().all(|s| s != "_");
            prop_assert_eq!(complete, view.game_state == LifecycleState::Won);
        }
    }

    #[test]
    fn test_two_restarts_are_identical(
        secret in secret_strategy(),
        guesses in prop::collection::vec(letter_strategy(), 0..10),
    ) {
        let mut game = HangmanGame::new(secret.clone());
        for guess in &guesses {
            game.submit_guess(guess);
        }

        let first = game.restart();
        let second = game.restart();

        // Only the version moves on
        prop_assert!(second.version > first.version);
        prop_assert_eq!(unversioned(first.clone()), unversioned(second));
        prop_assert_eq!(unversioned(first), unversioned(HangmanGame::new(secret).view()));
    }

    #[test]
    fn test_repeating_a_guess_changes_nothing_but_the_echo(
        secret in secret_strategy(),
        letter in letter_strategy(),
    ) {
        let mut game = HangmanGame::new(secret);
        game.submit_guess(&letter);
        prop_assume!(!game.state().is_terminal());
        let before = game.view();

        let (view, outcome) = game.submit_guess(&letter);

        prop_assert_eq!(outcome, GuessOutcome::AlreadyGuessed);
        prop_assert_eq!(view.chances_left, before.chances_left);
        prop_assert_eq!(view.guessed_character, before.guessed_character);
        prop_assert_eq!(view.game_state, before.game_state);
        prop_assert_eq!(view.repeated_guess, letter);
    }
}
