use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::constants::{DEFAULT_SECRET_NAME, PLACEHOLDER};
use super::state_machine::{GameError, GuessError};

/// A single guessable character, always in `a..=z`.
///
/// Parsing lowercases the input first, so `"K"` and `"k"` are the same guess.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(char);

impl Letter {
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl FromStr for Letter {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let mut chars = lowered.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => Ok(Self(c)),
            _ => Err(GuessError::InvalidInput),
        }
    }
}

impl TryFrom<String> for Letter {
    type Error = GuessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Letter> for String {
    fn from(value: Letter) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name to be guessed.
///
/// Stored lowercase. Only `a..=z` and spaces are allowed, and at least one
/// letter must be present, otherwise the game could never be won.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretName(String);

impl SecretName {
    pub fn new(name: &str) -> Result<Self, GameError> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(GameError::EmptySecret);
        }
        if let Some(c) = normalized
            .chars()
            .find(|c| *c != ' ' && !c.is_ascii_lowercase())
        {
            return Err(GameError::UnsupportedCharacter(c));
        }
        if !normalized.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(GameError::NoLetters);
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of slots in the reveal mask.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0.contains(letter.as_char())
    }

    /// Distinct letters, in order of first appearance.
    #[must_use]
    pub fn distinct_letters(&self) -> Vec<Letter> {
        let mut letters: Vec<Letter> = Vec::new();
        for c in self.0.chars().filter(char::is_ascii_lowercase) {
            let letter = Letter(c);
            if !letters.contains(&letter) {
                letters.push(letter);
            }
        }
        letters
    }
}

impl Default for SecretName {
    fn default() -> Self {
        Self(DEFAULT_SECRET_NAME.to_string())
    }
}

impl FromStr for SecretName {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SecretName {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SecretName> for String {
    fn from(value: SecretName) -> Self {
        value.0
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One position of the reveal mask.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Hidden,
    Revealed(char),
}

impl Slot {
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => PLACEHOLDER,
            Self::Revealed(c) => c,
        }
    }
}

/// Per-character visibility of the secret name.
///
/// A slot is revealed iff the secret character at that position is a space
/// or has been guessed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevealMask(Vec<Slot>);

impl RevealMask {
    #[must_use]
    pub fn new(secret: &SecretName) -> Self {
        Self(
            secret
                .as_str()
                .chars()
                .map(|c| if c == ' ' { Slot::Revealed(' ') } else { Slot::Hidden })
                .collect(),
        )
    }

    /// Reveals every occurrence of `letter`, returning how many slots changed.
    pub fn reveal(&mut self, secret: &SecretName, letter: Letter) -> usize {
        let mut revealed = 0;
        for (slot, c) in self.0.iter_mut().zip(secret.as_str().chars()) {
            if c == letter.as_char() && !slot.is_revealed() {
                *slot = Slot::Revealed(c);
                revealed += 1;
            }
        }
        revealed
    }

    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0.contains(&Slot::Revealed(letter.as_char()))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|slot| slot.is_revealed())
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    /// Wire form: one single-character string per slot.
    #[must_use]
    pub fn to_symbols(&self) -> Vec<String> {
        self.0.iter().map(|slot| slot.symbol().to_string()).collect()
    }
}

impl fmt::Display for RevealMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|slot| write!(f, "{}", slot.symbol()))
    }
}

/// Incorrect guesses in the order they were made.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GuessHistory(Vec<Letter>);

impl GuessHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `letter`, returning `false` if it was already present.
    pub fn insert(&mut self, letter: Letter) -> bool {
        if self.contains(letter) {
            return false;
        }
        self.0.push(letter);
        true
    }

    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0.contains(&letter)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        self.0.iter().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Coarse game phase.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum LifecycleState {
    /// Fresh game, no guess processed yet.
    #[default]
    Start,
    /// At least one guess changed the game.
    Going,
    /// Every slot revealed.
    Won,
    /// Chances exhausted.
    Lost,
}

impl LifecycleState {
    /// Terminal states accept a restart but no further guesses.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Start => "start",
            Self::Going => "going",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(repr)
    }
}

/// Classification of one submitted guess.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    /// New correct letter, all of its occurrences revealed.
    Accepted,
    /// Letter was tried before, correct or not.
    AlreadyGuessed,
    /// Wrong letter, one chance consumed.
    Rejected,
    /// Not a single letter in `a..=z`.
    Invalid,
    /// Game already won or lost.
    Inapplicable,
}

impl GuessOutcome {
    /// Whether the outcome changed the state clients should see.
    #[must_use]
    pub const fn changes_view(self) -> bool {
        matches!(self, Self::Accepted | Self::AlreadyGuessed | Self::Rejected)
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Accepted => "accepted",
            Self::AlreadyGuessed => "already_guessed",
            Self::Rejected => "rejected",
            Self::Invalid => "invalid",
            Self::Inapplicable => "inapplicable",
        };
        f.write_str(repr)
    }
}

/// Full snapshot of a game as clients see it.
///
/// Each snapshot replaces the previous one on the client; nothing is patched.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// One entry per slot: the revealed character or `_`.
    pub guessed_character: Vec<String>,
    pub incorrect_guesses: Vec<String>,
    /// Letter of the last repeated guess, empty if the last guess was new.
    pub repeated_guess: String,
    pub chances_left: u8,
    pub game_state: LifecycleState,
    pub message: String,
    /// Bumped by every visible change, restarts included. Snapshots from
    /// peers that do not send it decode as version 0.
    #[serde(default)]
    pub version: u64,
}

impl GameView {
    #[must_use]
    pub fn revealed_word(&self) -> String {
        self.guessed_character.concat()
    }

    #[must_use]
    pub fn incorrect_list(&self) -> String {
        self.incorrect_guesses.join(", ")
    }

    #[must_use]
    pub fn has_repeated_guess(&self) -> bool {
        !self.repeated_guess.is_empty()
    }
}
