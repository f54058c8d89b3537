use thiserror::Error;

/// Why a guess was rejected. None of these end the session; the Display
/// strings are shown to the player as feedback and state is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuessError {
    #[error("Please enter a word.")]
    Empty,
    #[error("Hmm... doesn't start with {0}")]
    WrongLetter(char),
    #[error("That word was already used.")]
    AlreadyUsed(String),
    #[error("We don't know this one!")]
    UnknownPlace(String),
    #[error("It's not your turn.")]
    NotYourTurn,
    #[error("The round is over.")]
    RoundOver,
}

/// Problems found while interpreting an inbound payload. Decoding never
/// fails hard on these; they exist so callers can log what was dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("payload has no recognized mode")]
    MissingMode,
    #[error("unknown battle update type: {0}")]
    UnknownUpdateType(String),
    #[error("required field missing: {0}")]
    MissingField(&'static str),
}
