//! Pingouins movement actions: `(x,y,DIR,step)`.

use std::str::FromStr;

use crate::{CodecError, CodecErrorKind, LegalAction, NO_OP};

use super::{Direction, HexCoord, compute_dest_tile};

/// A penguin move: start tile, direction and step count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexMove {
    /// Tile the penguin leaves.
    pub from: HexCoord,
    /// Direction of travel.
    pub direction: Direction,
    /// Number of tiles travelled, at least 1.
    pub steps: u32,
}

impl HexMove {
    /// Creates a new move.
    pub fn new(from: HexCoord, direction: Direction, steps: u32) -> Self {
        Self {
            from,
            direction,
            steps,
        }
    }

    /// Tile the penguin lands on.
    pub fn destination(&self) -> HexCoord {
        compute_dest_tile(self.from, self.direction, self.steps)
    }

    /// Decodes a legal action string.
    #[track_caller]
    pub fn decode(action: &str) -> Result<LegalAction<HexMove>, CodecError> {
        let action = action.trim();
        if action == NO_OP {
            return Ok(LegalAction::Pass);
        }

        let malformed = || CodecError::new(CodecErrorKind::Action(action.to_string()));
        let inner = action
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let fields: Vec<&str> = inner.split(',').collect();
        let [x, y, dir, steps] = fields.as_slice() else {
            return Err(malformed());
        };

        let x = canonical::<i32>(x).ok_or_else(malformed)?;
        let y = canonical::<i32>(y).ok_or_else(malformed)?;
        let direction = Direction::from_str(dir)
            .map_err(|_| CodecError::new(CodecErrorKind::Direction(dir.to_string())))?;
        let steps = canonical::<u32>(steps)
            .filter(|&s| s >= 1)
            .ok_or_else(malformed)?;

        Ok(LegalAction::Move(Self::new(HexCoord::new(x, y), direction, steps)))
    }

    /// Wire encoding, the exact inverse of [`HexMove::decode`].
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

/// Parses an integer written exactly as `Display` would write it.
fn canonical<T: FromStr + ToString>(field: &str) -> Option<T> {
    field
        .parse::<T>()
        .ok()
        .filter(|value| value.to_string() == field)
}

impl std::fmt::Display for HexMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.from.x, self.from.y, self.direction, self.steps
        )
    }
}
