//! Pingouins game-state decoding.
//!
//! ```text
//! 01230123      8 rows of 8 fish counts, row-major
//! ...
//! Blue:(0,1);(4,2)>7
//! Green:(6,6);(2,5)>5
//! End           optional terminal marker
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::instrument;

use crate::{CodecError, CodecErrorKind};

use super::{BOARD_SIZE, FishGrid, HexCoord, MAX_FISH};

/// A penguin listed in the state, with the role that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenguinPlacement {
    /// Owning role label, e.g. `Blue`.
    pub role: String,
    /// Tile the penguin stands on.
    pub coord: HexCoord,
}

/// A decoded Pingouins game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingouinsState {
    fish: FishGrid,
    penguins: Vec<PenguinPlacement>,
    scores: BTreeMap<String, i64>,
    terminal: bool,
}

impl PingouinsState {
    /// Fish grid, indexed `[y][x]`.
    pub fn fish(&self) -> &FishGrid {
        &self.fish
    }

    /// Fish count on a tile, 0 off the board.
    pub fn fish_at(&self, coord: HexCoord) -> u8 {
        if coord.in_bounds() {
            self.fish[coord.y as usize][coord.x as usize]
        } else {
            0
        }
    }

    /// Live penguins, in state order.
    pub fn penguins(&self) -> &[PenguinPlacement] {
        &self.penguins
    }

    /// Current score per role.
    pub fn scores(&self) -> &BTreeMap<String, i64> {
        &self.scores
    }

    /// Score of a role, compared case-insensitively.
    pub fn score(&self, role: &str) -> Option<i64> {
        self.scores
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(role))
            .map(|(_, score)| *score)
    }

    /// True when the state carried the trailing `End` marker.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::new(CodecErrorKind::State(message.into()))
}

fn parse_fish_row(line: &str) -> Result<[u8; BOARD_SIZE], CodecError> {
    let digits: Vec<u8> = line
        .trim()
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .filter(|&d| d <= MAX_FISH)
                .ok_or_else(|| malformed(format!("bad fish count {c:?} in {line:?}")))
        })
        .collect::<Result<_, _>>()?;
    digits
        .try_into()
        .map_err(|_| malformed(format!("fish row {line:?} is not {BOARD_SIZE} tiles wide")))
}

fn parse_coord(text: &str) -> Result<HexCoord, CodecError> {
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| malformed(format!("bad coordinate {text:?}")))?;
    let (x, y) = inner
        .split_once(',')
        .ok_or_else(|| malformed(format!("bad coordinate {text:?}")))?;
    let x = x.trim().parse::<i32>();
    let y = y.trim().parse::<i32>();
    match (x, y) {
        (Ok(x), Ok(y)) => Ok(HexCoord::new(x, y)),
        _ => Err(malformed(format!("bad coordinate {text:?}"))),
    }
}

impl FromStr for PingouinsState {
    type Err = CodecError;

    #[instrument(level = "trace", name = "decode_pingouins_state")]
    fn from_str(state: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = state.lines().collect();
        let terminal = lines
            .last()
            .is_some_and(|line| line.trim().eq_ignore_ascii_case("end"));
        if terminal {
            lines.pop();
        }

        if lines.len() < BOARD_SIZE {
            return Err(malformed(format!(
                "expected {BOARD_SIZE} fish rows, got {} lines",
                lines.len()
            )));
        }

        let mut fish: FishGrid = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in fish.iter_mut().zip(&lines[..BOARD_SIZE]) {
            *row = parse_fish_row(line)?;
        }

        let mut penguins = Vec::new();
        let mut scores = BTreeMap::new();
        for line in lines[BOARD_SIZE..].iter().map(|l| l.trim()) {
            if line.is_empty() {
                continue;
            }
            let (role, rest) = line
                .split_once(':')
                .ok_or_else(|| malformed(format!("bad player line {line:?}")))?;
            let (coords, score) = rest
                .rsplit_once(['>', '/'])
                .ok_or_else(|| malformed(format!("missing score in {line:?}")))?;
            let score = score
                .trim()
                .parse::<i64>()
                .map_err(|_| malformed(format!("bad score in {line:?}")))?;

            for coord in coords.split(';').filter(|c| !c.trim().is_empty()) {
                penguins.push(PenguinPlacement {
                    role: role.trim().to_string(),
                    coord: parse_coord(coord)?,
                });
            }
            scores.insert(role.trim().to_string(), score);
        }

        Ok(Self {
            fish,
            penguins,
            scores,
            terminal,
        })
    }
}
