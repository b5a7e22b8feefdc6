//! Codec error types.

use derive_more::{Display, Error};

/// What went wrong while decoding server text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CodecErrorKind {
    /// A `p:role` entry could not be split or numbered.
    #[display("malformed player entry {:?}", _0)]
    Player(String),
    /// A `p:role/action` entry is missing its action.
    #[display("malformed player action entry {:?}", _0)]
    PlayerAction(String),
    /// A `p:role>reward` entry is missing or has a non-numeric reward.
    #[display("malformed player reward entry {:?}", _0)]
    PlayerReward(String),
    /// A legal action string does not follow the game's grammar.
    #[display("malformed action {:?}", _0)]
    Action(String),
    /// A direction code outside the six-direction vocabulary.
    #[display("unknown direction {:?}", _0)]
    Direction(String),
    /// A game-state string does not follow the game's grammar.
    #[display("malformed game state: {}", _0)]
    State(String),
}

/// Codec error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Codec error: {} at {}:{}", kind, file, line)]
pub struct CodecError {
    /// Error kind.
    pub kind: CodecErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CodecError {
    /// Creates a new codec error with caller location tracking.
    #[track_caller]
    pub fn new(kind: CodecErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
