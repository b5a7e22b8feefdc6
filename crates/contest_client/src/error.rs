//! Client error types.

use contest_games::CodecError;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// Transport or JSON-RPC failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Client error: {} at {}:{}", message, file, line)]
pub struct ClientError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Why a server event could not be decoded.
#[derive(Debug, Display, From)]
pub enum EventErrorKind {
    /// The event tag is not part of the lifecycle vocabulary.
    #[display("unknown event kind {:?}", _0)]
    #[from(ignore)]
    UnknownKind(String),
    /// The wire triple is not `[kind, data, id]`.
    #[display("malformed event envelope: {}", _0)]
    #[from(ignore)]
    Envelope(String),
    /// A field the event needs is absent.
    #[display("missing field {:?}", _0)]
    #[from(ignore)]
    MissingField(&'static str),
    /// The payload does not match the event's shape.
    #[display("bad payload: {}", _0)]
    Payload(serde_json::Error),
    /// The game state is not valid base64.
    #[display("bad base64 game state: {}", _0)]
    Base64(base64::DecodeError),
    /// The decoded game state is not UTF-8.
    #[display("game state is not UTF-8: {}", _0)]
    Utf8(std::string::FromUtf8Error),
    /// A player, action or reward list is malformed.
    #[display("{}", _0)]
    Codec(CodecError),
}

/// Event decoding error with location tracking.
#[derive(Debug, Display, Error)]
#[display("Event error: {} at {}:{}", kind, file, line)]
pub struct EventError {
    /// Error kind.
    pub kind: EventErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EventError {
    /// Creates a new event error with caller location tracking.
    #[track_caller]
    pub fn new(kind: EventErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for EventError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.into())
    }
}

impl From<base64::DecodeError> for EventError {
    #[track_caller]
    fn from(err: base64::DecodeError) -> Self {
        Self::new(err.into())
    }
}

impl From<std::string::FromUtf8Error> for EventError {
    #[track_caller]
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::new(err.into())
    }
}

impl From<CodecError> for EventError {
    #[track_caller]
    fn from(err: CodecError) -> Self {
        Self::new(err.into())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
