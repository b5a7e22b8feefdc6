//! Penguin entities.

use std::time::Duration;

use tracing::debug;

use crate::{Animation, AnimationKind, Point};

use super::{HexCoord, HexLayout};

/// Time for a penguin to slide to its landing tile.
pub const MOVE_DURATION: Duration = Duration::from_secs(1);

/// The two penguin teams, by role label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Team {
    /// Player 0.
    Blue,
    /// Player 1.
    Green,
}

impl Team {
    /// Player number owning this team.
    pub fn number(self) -> u32 {
        match self {
            Team::Blue => 0,
            Team::Green => 1,
        }
    }

    /// Team of a role label, case-insensitive.
    pub fn from_role(role: &str) -> Option<Self> {
        role.trim().parse().ok()
    }
}

/// A penguin standing on, or sliding between, ice tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Penguin {
    team: Team,
    ordinal: u8,
    coord: HexCoord,
    moving: Option<Animation<HexCoord>>,
}

impl Penguin {
    /// Places a penguin on `coord`; `ordinal` numbers it within its team.
    pub fn new(team: Team, ordinal: u8, coord: HexCoord) -> Self {
        Self {
            team,
            ordinal,
            coord,
            moving: None,
        }
    }

    /// Owning team.
    pub fn team(&self) -> Team {
        self.team
    }

    /// 1-based number within the team.
    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    /// Tile the penguin stands on; during a move, the tile it left.
    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Starts sliding to `dest`.
    pub fn move_to(&mut self, dest: HexCoord) {
        debug!(team = %self.team, from = %self.coord, to = %dest, "Penguin moving");
        self.moving = Some(Animation::new(AnimationKind::Move, dest, MOVE_DURATION));
    }

    /// Advances the move, landing when it completes.
    pub fn update(&mut self, dt: Duration) {
        if let Some(anim) = self.moving.as_mut()
            && anim.advance(dt)
        {
            self.coord = *anim.target();
            self.moving = None;
        }
    }

    /// True while sliding.
    pub fn is_busy(&self) -> bool {
        self.moving.is_some()
    }

    /// Current on-surface position, interpolated during a move.
    pub fn position(&self, layout: &HexLayout) -> Point {
        let here = layout.tile_center(self.coord);
        match &self.moving {
            Some(anim) => here.lerp(layout.tile_center(*anim.target()), anim.clamped()),
            None => here,
        }
    }
}
