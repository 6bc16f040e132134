//! Game-wide constants.

/// Wrong guesses allowed before the game is lost.
pub const DEFAULT_CHANCES: u8 = 6;

/// Upper bound for configurable chances; one per letter of the alphabet.
pub const MAX_CHANCES: u8 = 26;

/// Secret name used when no other is configured.
pub const DEFAULT_SECRET_NAME: &str = "kanna kamui";

/// Symbol shown for a slot that has not been revealed yet.
pub const PLACEHOLDER: char = '_';

/// Game message shown once every slot is revealed.
pub const WIN_MESSAGE: &str = "Congratulations! You win!";

/// Prefix of the game message shown once the chances run out.
pub const LOSS_MESSAGE_PREFIX: &str = "You lose! The character was:";
