//! Ice tiles, the dissolve animation and the selectable-tile state.

use std::time::Duration;

use tracing::debug;

use crate::{Animation, AnimationKind};

use super::{BOARD_SIZE, FishGrid, HexCoord};

/// Time for a tile to fade out once its penguin leaves.
pub const DISSOLVE_DURATION: Duration = Duration::from_secs(1);

/// The ice field.
///
/// Besides fish counts, the board tracks which tiles the local player may
/// pick: start tiles (`sources`) until one is selected, then landing tiles
/// (`destinations`).
#[derive(Debug, Clone, Default)]
pub struct IceBoard {
    ice: FishGrid,
    dissolve: Option<Animation<HexCoord>>,
    sources: Vec<HexCoord>,
    destinations: Vec<HexCoord>,
    selected: Option<HexCoord>,
    highlighted: Option<HexCoord>,
}

impl IceBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every tile's fish count.
    pub fn set_fish(&mut self, fish: FishGrid) {
        self.ice = fish;
    }

    /// Fish on a tile, 0 for removed or off-board tiles.
    pub fn fish(&self, coord: HexCoord) -> u8 {
        if coord.in_bounds() {
            self.ice[coord.y as usize][coord.x as usize]
        } else {
            0
        }
    }

    /// Tiles still carrying fish, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (HexCoord, u8)> + '_ {
        HexCoord::all()
            .map(|coord| (coord, self.fish(coord)))
            .filter(|&(_, fish)| fish > 0)
    }

    /// Sets the start tiles the player may pick and drops any selection.
    pub fn set_selectable_sources(&mut self, sources: Vec<HexCoord>) {
        self.sources = sources;
        self.selected = None;
    }

    /// Sets the landing tiles the player may pick.
    pub fn set_selectable_destinations(&mut self, destinations: Vec<HexCoord>) {
        self.destinations = destinations;
    }

    /// Marks `coord` as the chosen start tile.
    pub fn select_source(&mut self, coord: HexCoord) {
        self.selected = Some(coord);
    }

    /// Forgets the chosen start tile and its landing tiles.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.destinations.clear();
        self.highlighted = None;
    }

    /// Disables all selection.
    pub fn disarm(&mut self) {
        self.sources.clear();
        self.clear_selection();
    }

    /// Tiles the pointer may currently pick.
    pub fn selectable(&self) -> &[HexCoord] {
        if self.destinations.is_empty() {
            &self.sources
        } else {
            &self.destinations
        }
    }

    /// True when `coord` is currently pickable.
    pub fn can_select(&self, coord: HexCoord) -> bool {
        self.selectable().contains(&coord)
    }

    /// Sets the hovered tile.
    pub fn set_highlighted(&mut self, coord: Option<HexCoord>) {
        self.highlighted = coord;
    }

    /// Starts dissolving a tile.
    ///
    /// A dissolve still in progress is completed first.
    pub fn start_dissolve(&mut self, coord: HexCoord) {
        if let Some(previous) = self.dissolve.take() {
            self.remove_tile(*previous.target());
        }
        debug!(%coord, "Dissolving tile");
        self.dissolve = Some(Animation::new(
            AnimationKind::Dissolve,
            coord,
            DISSOLVE_DURATION,
        ));
    }

    fn remove_tile(&mut self, coord: HexCoord) {
        if coord.in_bounds() {
            self.ice[coord.y as usize][coord.x as usize] = 0;
        }
    }

    /// Advances the dissolve, emptying the tile when it completes.
    pub fn update(&mut self, dt: Duration) {
        if let Some(anim) = self.dissolve.as_mut()
            && anim.advance(dt)
        {
            let coord = *anim.target();
            self.dissolve = None;
            self.remove_tile(coord);
        }
    }

    /// True while a tile is dissolving.
    pub fn is_busy(&self) -> bool {
        self.dissolve.is_some()
    }

    /// The running dissolve, if any.
    pub fn dissolve(&self) -> Option<&Animation<HexCoord>> {
        self.dissolve.as_ref()
    }

    /// Start tiles.
    pub fn sources(&self) -> &[HexCoord] {
        &self.sources
    }

    /// Landing tiles.
    pub fn destinations(&self) -> &[HexCoord] {
        &self.destinations
    }

    /// Chosen start tile.
    pub fn selected(&self) -> Option<HexCoord> {
        self.selected
    }

    /// Hovered tile.
    pub fn highlighted(&self) -> Option<HexCoord> {
        self.highlighted
    }

    /// Number of rows and columns.
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dissolve_empties_tile_when_done() {
        let mut board = IceBoard::new();
        board.set_fish([[2; BOARD_SIZE]; BOARD_SIZE]);
        let coord = HexCoord::new(1, 2);

        board.start_dissolve(coord);
        board.update(Duration::from_millis(600));
        assert!(board.is_busy());
        assert_eq!(board.fish(coord), 2);

        board.update(Duration::from_millis(600));
        assert!(!board.is_busy());
        assert_eq!(board.fish(coord), 0);
    }

    #[test]
    fn test_selectable_switches_to_destinations() {
        let mut board = IceBoard::new();
        board.set_selectable_sources(vec![HexCoord::new(0, 0)]);
        assert!(board.can_select(HexCoord::new(0, 0)));

        board.select_source(HexCoord::new(0, 0));
        board.set_selectable_destinations(vec![HexCoord::new(1, 0)]);
        assert!(!board.can_select(HexCoord::new(0, 0)));
        assert!(board.can_select(HexCoord::new(1, 0)));

        board.clear_selection();
        assert!(board.can_select(HexCoord::new(0, 0)));
    }
}
