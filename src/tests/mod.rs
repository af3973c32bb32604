#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod app_tests;
pub mod components_tests;
pub mod config_tests;
pub mod integration_tests;

// Shared test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;
    use ratatui::style::Color;

    use crate::components::{Block, GameState, Input, Point};
    use crate::game::{GRID_WIDTH, START_HEIGHT};
    use crate::grid::Grid;

    // Helper function to create a test world with the standard resources
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.init_resource::<GameState>();
        world.init_resource::<Input>();
        world.insert_resource(Grid::new(GRID_WIDTH, START_HEIGHT));
        world
    }

    // Helper to make a block carrying its own point
    #[must_use]
    pub fn floating_block(x: i32, y: i32) -> Block {
        Block::new(Color::White, Some(Point::new(x, y)))
    }

    // Helper to stamp a block into a tile
    pub fn occupy(grid: &mut Grid, x: i32, y: i32) {
        grid.tile_mut(x, y)
            .expect("tile in range")
            .set_block(floating_block(x, y));
    }

    // Helper to fill a whole row except the given columns
    pub fn fill_row_except(grid: &mut Grid, y: i32, holes: &[i32]) {
        for x in 0..grid.width() as i32 {
            if !holes.contains(&x) {
                occupy(grid, x, y);
            }
        }
    }

    // Total number of anchored blocks on the field
    #[must_use]
    pub fn count_blocks(grid: &Grid) -> usize {
        let mut count = 0;
        grid.for_each(|tile| {
            if tile.has_block() {
                count += 1;
            }
        });
        count
    }
}
