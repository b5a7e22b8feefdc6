//! Tests for board layouts and pointer hit testing.

use contest_games::connect4::{Column, GridLayout, MAGNETISM_RADIUS};
use contest_games::pingouins::{HexCoord, HexLayout};
use contest_games::{Point, Surface};

fn grid() -> GridLayout {
    GridLayout::for_surface(Surface::new(700.0, 700.0))
}

#[test]
fn test_magnetism_within_radius_selects_column() {
    let layout = grid();
    let columns: Vec<Column> = Column::all().collect();
    let col2 = Column::new(2).unwrap();
    let slot = layout.slot_center(col2);
    let inside = MAGNETISM_RADIUS * layout.cell_size() * 0.9;

    for (dx, dy) in [(inside, 0.0), (0.0, inside), (-inside, 0.0), (0.0, -inside)] {
        let pointer = Point::new(slot.x + dx, slot.y + dy);
        assert_eq!(layout.magnetic_column(pointer, &columns), Some(col2));
    }
}

#[test]
fn test_magnetism_outside_radius_selects_nothing() {
    let layout = grid();
    let columns: Vec<Column> = Column::all().collect();
    let slot = layout.slot_center(Column::new(4).unwrap());
    let outside = MAGNETISM_RADIUS * layout.cell_size() * 1.1;

    let above = Point::new(slot.x, slot.y - outside);
    assert_eq!(layout.magnetic_column(above, &columns), None);

    // 0.6 units from the nearest slot.
    let between = Point::new(slot.x + layout.cell_size() * 0.6, slot.y);
    assert_eq!(layout.magnetic_column(between, &columns), None);
}

#[test]
fn test_magnetism_ignores_unarmed_columns() {
    let layout = grid();
    let slot = layout.slot_center(Column::new(1).unwrap());
    let armed = [Column::new(5).unwrap()];
    assert_eq!(layout.magnetic_column(slot, &armed), None);
}

#[test]
fn test_slot_sits_above_top_row() {
    let layout = grid();
    let column = Column::CENTER;
    let top = layout.hole_center(column, 5);
    let slot = layout.slot_center(column);
    assert!(slot.y < top.y);
    assert!((top.y - slot.y - layout.cell_size()).abs() < 1e-3);
}

#[test]
fn test_hex_tile_contains_its_center_only() {
    let layout = HexLayout::for_surface(Surface::new(800.0, 600.0));
    let all: Vec<HexCoord> = HexCoord::all().collect();
    for coord in &all {
        let center = layout.tile_center(*coord);
        assert_eq!(layout.tile_at(center, all.iter().copied()), Some(*coord));
    }
}

#[test]
fn test_hex_footprint_excludes_corners_of_bounding_box() {
    let layout = HexLayout::for_surface(Surface::new(800.0, 600.0));
    let coord = HexCoord::new(2, 2);
    let center = layout.tile_center(coord);
    let w = layout.cell_width();
    let h = layout.cell_height();

    let near_top = Point::new(center.x, center.y - h * 0.45);
    assert!(layout.tile_contains(center, near_top));

    let corner = Point::new(center.x + w * 0.45, center.y - h * 0.45);
    assert!(!layout.tile_contains(center, corner));

    let beyond = Point::new(center.x + w * 0.6, center.y);
    assert!(!layout.tile_contains(center, beyond));
}

#[test]
fn test_odd_rows_are_shifted_half_a_tile() {
    let layout = HexLayout::for_surface(Surface::new(800.0, 600.0));
    let even = layout.tile_center(HexCoord::new(3, 2));
    let odd = layout.tile_center(HexCoord::new(3, 3));
    assert!((odd.x - even.x - layout.cell_width() / 2.0).abs() < 1e-3);
    assert!((odd.y - even.y - 0.75 * layout.cell_height()).abs() < 1e-3);
}
