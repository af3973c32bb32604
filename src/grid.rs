#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since field dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss
)]

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{GridError, Point, Tile};

/// Classification of one complete-row scan, consumed by the scoring layer.
/// The thresholds are hard cutoffs and pick the clearing strategy: a single
/// row is deleted outright (the field shrinks for good), exactly two are
/// cleared in place, three or more are cleared and the field partially
/// regrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTier {
    None,
    Single,
    Combo,
    SuperCombo(usize),
}

/// The playfield: an arena of tiles indexed by (x, y), row-major with y
/// growing downward. The width is fixed; the height changes as rows are
/// removed and inserted, and tile points are kept equal to their indices
/// across every shift.
#[derive(Resource, Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Vec<Tile>>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|y| Self::fresh_row(width, y as i32))
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    fn fresh_row(width: usize, y: i32) -> Vec<Tile> {
        (0..width)
            .map(|x| Tile::new(Point::new(x as i32, y)))
            .collect()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<(usize, usize), GridError> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(GridError::OutOfRange { x, y });
        }
        Ok((x as usize, y as usize))
    }

    /// The tile at the given coordinate.
    ///
    /// # Errors
    ///
    /// `GridError::OutOfRange` outside the current bounds.
    pub fn tile(&self, x: i32, y: i32) -> Result<&Tile, GridError> {
        let (x, y) = self.index(x, y)?;
        Ok(&self.rows[y][x])
    }

    /// Mutable access to the tile at the given coordinate.
    ///
    /// # Errors
    ///
    /// `GridError::OutOfRange` outside the current bounds.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Result<&mut Tile, GridError> {
        let (x, y) = self.index(x, y)?;
        Ok(&mut self.rows[y][x])
    }

    /// Visits every tile exactly once, row by row from the top, left to
    /// right within each row.
    pub fn for_each(&self, mut callback: impl FnMut(&Tile)) {
        for row in &self.rows {
            for tile in row {
                callback(tile);
            }
        }
    }

    /// Transfers the block on `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails when either coordinate is out of range, `from` holds no block,
    /// or `to` is already occupied. Nothing moves on failure.
    pub fn move_block(&mut self, from: Point, to: Point) -> Result<(), GridError> {
        let (fx, fy) = self.index(from.x, from.y)?;
        let (tx, ty) = self.index(to.x, to.y)?;

        if !self.rows[fy][fx].has_block() {
            return Err(GridError::MissingBlock {
                x: from.x,
                y: from.y,
            });
        }
        if self.rows[ty][tx].has_block() {
            return Err(GridError::DestinationOccupied { x: to.x, y: to.y });
        }

        if let Some(block) = self.rows[fy][fx].clear_block() {
            self.rows[ty][tx].set_block(block);
        }
        Ok(())
    }

    fn row_complete(&self, y: usize) -> bool {
        self.rows[y].iter().all(Tile::has_block)
    }

    /// Scans the field top to bottom for complete rows and applies the
    /// clearing strategy for the count found. Matched rows are processed in
    /// ascending y order.
    pub fn find_complete_rows(&mut self) -> ClearTier {
        let complete: Vec<usize> = (0..self.height).filter(|&y| self.row_complete(y)).collect();

        match complete.len() {
            0 => ClearTier::None,
            1 => {
                self.remove_row(Some(complete[0]));
                ClearTier::Single
            }
            2 => {
                self.clear_row(complete[0]);
                self.clear_row(complete[1]);
                ClearTier::Combo
            }
            count => {
                for &y in &complete {
                    self.clear_row(y);
                }
                for _ in 0..count - 2 {
                    self.add_row();
                }
                ClearTier::SuperCombo(count)
            }
        }
    }

    /// Empties every tile in row `y`, then drops every block above it by one
    /// row. The cascade runs bottom-up so each block falls into the slot
    /// vacated directly below it.
    pub fn clear_row(&mut self, y: usize) {
        debug!("clearing row {y}");
        for x in 0..self.width {
            self.rows[y][x].clear_block();
        }

        for row in (0..y).rev() {
            for x in 0..self.width {
                if let Some(block) = self.rows[row][x].clear_block() {
                    self.rows[row + 1][x].set_block(block);
                }
            }
        }
    }

    /// Deletes row `y` (the bottom row when `None`) from the field. The
    /// height shrinks permanently; every tile at or below the removed slot
    /// is re-pointed to its new index.
    pub fn remove_row(&mut self, y: Option<usize>) {
        let y = y.unwrap_or(self.height - 1);
        self.rows.remove(y);
        self.height -= 1;
        info!("removed row {y}, field height now {}", self.height);

        for row in y..self.height {
            for x in 0..self.width {
                self.rows[row][x].shift_point(0, -1);
            }
        }
    }

    /// Inserts a fresh empty row at the top, shifting every existing tile
    /// down by one.
    pub fn add_row(&mut self) {
        for row in &mut self.rows {
            for tile in row {
                tile.shift_point(0, 1);
            }
        }

        self.rows.insert(0, Self::fresh_row(self.width, 0));
        self.height += 1;
        info!("added row, field height now {}", self.height);
    }
}
