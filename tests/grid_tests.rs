use std::collections::HashSet;

use tone_puzzle::core::{create_grid, create_tile, Grid, SequenceFactory, TileSource};
use tone_puzzle::types::{Category, Tile, GRID_CELLS, GRID_SIZE};

#[test]
fn create_grid_always_returns_36_tiles() {
    for seed in [0u32, 1, 42, 12345, u32::MAX] {
        let mut source = TileSource::new(seed);
        let grid = create_grid(&mut source);
        assert_eq!(grid.tiles().len(), GRID_CELLS);
        assert_eq!(grid.width(), GRID_SIZE);
        assert_eq!(grid.height(), GRID_SIZE);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                assert!(grid.get(row, col).is_some());
            }
        }
    }
}

#[test]
fn tile_ids_are_unique_across_grids_from_one_source() {
    let mut source = TileSource::new(5);
    let a = create_grid(&mut source);
    let b = create_grid(&mut source);

    let ids: HashSet<u64> = a.tiles().iter().chain(b.tiles().iter()).map(|t| t.id).collect();
    assert_eq!(ids.len(), 2 * GRID_CELLS);
}

#[test]
fn create_tile_draws_from_all_categories() {
    let mut source = TileSource::new(2024);
    let seen: HashSet<Category> = (0..400).map(|_| create_tile(&mut source).category).collect();
    assert_eq!(seen.len(), Category::ALL.len());
}

#[test]
fn same_seed_same_grid_different_seed_different_grid() {
    let a = create_grid(&mut TileSource::new(99));
    let b = create_grid(&mut TileSource::new(99));
    let c = create_grid(&mut TileSource::new(100));
    assert_eq!(a, b);
    assert_ne!(a.categories(), c.categories());
}

#[test]
fn closures_can_act_as_tile_factories() {
    let mut next = 0u64;
    let mut factory = || {
        next += 1;
        Tile::new(Category::Casual, next)
    };
    let grid = create_grid(&mut factory);
    assert!(grid.tiles().iter().all(|t| t.category == Category::Casual));
    assert_eq!(grid.tile(35).map(|t| t.id), Some(36));
}

#[test]
fn display_prints_glyph_rows() {
    let grid = Grid::new(&mut SequenceFactory::new(&Category::ALL, 0));
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), GRID_SIZE);
    assert_eq!(lines[0], "F P C E F P");
    assert_eq!(lines[1], "C E F P C E");
}
