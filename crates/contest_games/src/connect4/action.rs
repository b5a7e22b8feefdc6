//! Column actions.

use crate::{CodecError, CodecErrorKind, LegalAction, NO_OP};

use super::COLUMNS;

/// A 0-based Connect4 column.
///
/// On the wire columns are 1-based integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u8);

impl Column {
    /// The middle column.
    pub const CENTER: Column = Column(3);

    /// Creates a column from a 0-based index.
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < COLUMNS).then_some(Self(index))
    }

    /// 0-based index.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// All columns, left to right.
    pub fn all() -> impl Iterator<Item = Column> {
        (0..COLUMNS as u8).map(Column)
    }

    /// Decodes a wire action: a 1-based column number or the no-op.
    #[track_caller]
    pub fn decode(action: &str) -> Result<LegalAction<Column>, CodecError> {
        let action = action.trim();
        if action == NO_OP {
            return Ok(LegalAction::Pass);
        }
        action
            .parse::<u8>()
            .ok()
            .filter(|n| n.to_string() == action)
            .and_then(|n| n.checked_sub(1))
            .and_then(Column::new)
            .map(LegalAction::Move)
            .ok_or_else(|| CodecError::new(CodecErrorKind::Action(action.to_string())))
    }

    /// Wire encoding of this column.
    pub fn encode(&self) -> String {
        (self.0 + 1).to_string()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "column {}", self.0 + 1)
    }
}
