#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since field dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation
)]

use std::fmt;

use bevy_ecs::prelude::*;
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::components::{Block, Point};
use crate::game::RANDOM_INDEX_MAX;
use crate::grid::Grid;

/// Horizontal movement direction of the active shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub fn step(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The shape moved down one row.
    Stepped,
    /// The shape hit the floor or a block; its blocks are now owned by their
    /// tiles and the shape is inactive.
    Landed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// A rotation pushed the shape out of bounds and the corrective shift
    /// could not be applied either. The shape is in an unresolvable
    /// position; callers treat this as fatal.
    RotationOutOfBounds,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::RotationOutOfBounds => write!(f, "invalid rotate bounds"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Immutable catalog entry for one piece kind: four 16-bit rotation masks
/// over a 4x4 frame (row-major from the most significant bit), a color and
/// the vertical offset applied at spawn. Entries are shared statics; shapes
/// hold references into the catalog and identity comparisons are pointer
/// comparisons.
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeType {
    pub name: &'static str,
    pub masks: [u16; 4],
    pub color: Color,
    pub y_offset: i32,
}

pub static I: ShapeType = ShapeType {
    name: "I",
    masks: [0x0F00, 0x2222, 0x00F0, 0x4444],
    color: Color::Cyan,
    y_offset: -1,
};
pub static J: ShapeType = ShapeType {
    name: "J",
    masks: [0x44C0, 0x8E00, 0x6440, 0x0E20],
    color: Color::Blue,
    y_offset: 0,
};
pub static L: ShapeType = ShapeType {
    name: "L",
    masks: [0x4460, 0x0E80, 0xC440, 0x2E00],
    color: Color::Magenta,
    y_offset: 0,
};
pub static O: ShapeType = ShapeType {
    name: "O",
    masks: [0xCC00, 0xCC00, 0xCC00, 0xCC00],
    color: Color::Yellow,
    y_offset: 0,
};
pub static S: ShapeType = ShapeType {
    name: "S",
    masks: [0x06C0, 0x8C40, 0x6C00, 0x4620],
    color: Color::Green,
    y_offset: -1,
};
pub static T: ShapeType = ShapeType {
    name: "T",
    masks: [0x0E40, 0x4C40, 0x4E00, 0x4640],
    color: Color::LightRed,
    y_offset: -1,
};
pub static Z: ShapeType = ShapeType {
    name: "Z",
    masks: [0x0C60, 0x4C80, 0xC600, 0x2640],
    color: Color::Red,
    y_offset: -1,
};

impl ShapeType {
    /// Decodes the mask for `rotation` into one block per set bit, each at
    /// `origin` plus its (column, row) in the 4x4 frame. All catalog entries
    /// yield exactly four blocks.
    ///
    /// # Panics
    ///
    /// Panics if `rotation` is not in `0..4`; the shape state machine keeps
    /// its rotation index in range.
    #[must_use]
    pub fn blocks(&self, rotation: usize, origin: Point) -> Vec<Block> {
        let mask = self.masks[rotation];
        let mut blocks = Vec::with_capacity(4);

        let mut col = 0;
        let mut row = 0;
        let mut bit = 0x8000_u16;
        while bit > 0 {
            if mask & bit != 0 {
                blocks.push(Block::new(self.color, Some(origin.offset(col, row))));
            }

            col += 1;
            if col > 3 {
                col = 0;
                row += 1;
            }
            bit >>= 1;
        }

        blocks
    }

    /// The deterministic slot table behind `random()`. O gets a single slot
    /// where the other kinds get two, and I picks up both leftover slots, so
    /// O is half as likely as the rest and I twice as likely. Deliberately
    /// not uniform.
    #[must_use]
    pub fn from_index(index: usize) -> &'static ShapeType {
        match index {
            1 | 2 => &J,
            3 | 4 => &L,
            5 => &O,
            6 | 7 => &S,
            8 | 9 => &T,
            10 | 11 => &Z,
            _ => &I,
        }
    }

    /// A weighted random catalog entry.
    #[must_use]
    pub fn random() -> &'static ShapeType {
        Self::from_index(fastrand::usize(0..=RANDOM_INDEX_MAX))
    }
}

/// The active falling piece. Holds four live blocks positioned from the
/// catalog mask; once landed the block list is empty and the shape stays
/// inactive for good.
#[derive(Component, Debug, Clone)]
pub struct Shape {
    kind: &'static ShapeType,
    rotation: usize,
    origin: Point,
    blocks: Vec<Block>,
}

impl Shape {
    /// Builds a shape at `origin` (default: horizontally centered on the
    /// field's top edge), with the kind's vertical spawn offset applied.
    ///
    /// Construction is the first half of a two-phase spawn: the caller runs
    /// `spawn_collides` right afterwards to detect the terminal overlap
    /// condition.
    #[must_use]
    pub fn new(grid: &Grid, kind: &'static ShapeType, origin: Option<Point>) -> Self {
        let mut origin = origin.unwrap_or_else(|| Point::new(grid.width() as i32 / 2 - 1, 0));
        origin.translate(0, kind.y_offset);

        let blocks = kind.blocks(0, origin);
        Self {
            kind,
            rotation: 0,
            origin,
            blocks,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static ShapeType {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// True while the shape still owns its blocks (it has not landed).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.blocks.is_empty()
    }

    fn update_blocks(&mut self) {
        self.blocks = self.kind.blocks(self.rotation, self.origin);
    }

    /// Positions of the live blocks. Active blocks always carry a point.
    fn block_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.blocks.iter().filter_map(|block| block.position().ok())
    }

    /// Second half of the two-phase spawn: true if any block arrived on an
    /// already occupied tile. The owner reports this once as the terminal
    /// game-over condition; the check does not repeat.
    #[must_use]
    pub fn spawn_collides(&self, grid: &Grid) -> bool {
        self.block_points()
            .any(|p| matches!(grid.tile(p.x, p.y), Ok(tile) if tile.has_block()))
    }

    /// Moves the shape horizontally by `amount` tiles. All-or-nothing: if
    /// any block would leave the field or land on an occupied tile, nothing
    /// moves and the call returns false.
    pub fn shift(&mut self, grid: &Grid, direction: Direction, amount: i32) -> bool {
        let step = direction.step() * amount;

        for point in self.block_points() {
            let new_x = point.x + step;
            if new_x < 0 || new_x >= grid.width() as i32 {
                return false;
            }
            match grid.tile(new_x, point.y) {
                Ok(tile) if !tile.has_block() => {}
                _ => return false,
            }
        }

        self.origin.translate(step, 0);
        for block in &mut self.blocks {
            block.translate(step, 0);
        }
        true
    }

    /// Advances the rotation index cyclically and recomputes the blocks,
    /// then wall-kicks the shape back inside the field if the new layout
    /// pokes out horizontally. If the kicked position overlaps an occupied
    /// (or out-of-range) tile, the whole rotation reverts; the first
    /// conflicting block decides and the rest are not checked.
    ///
    /// # Errors
    ///
    /// `ShapeError::RotationOutOfBounds` when the corrective shift itself is
    /// rejected. The shape geometry cannot be reconciled with the field and
    /// callers must treat the game state as broken.
    pub fn rotate(&mut self, grid: &Grid) -> Result<(), ShapeError> {
        self.rotation = (self.rotation + 1) % 4;
        self.update_blocks();

        // Kick distance: the largest horizontal bounds violation, in one
        // direction only.
        let mut amount = 0;
        let mut direction = None;
        for point in self.block_points() {
            let local = if point.x < 0 {
                direction = Some(Direction::Right);
                -point.x
            } else if point.x > grid.width() as i32 - 1 {
                direction = Some(Direction::Left);
                point.x - (grid.width() as i32 - 1)
            } else {
                0
            };
            amount = amount.max(local);
        }

        let kicked = match direction {
            Some(dir) if amount != 0 => {
                if !self.shift(grid, dir, amount) {
                    return Err(ShapeError::RotationOutOfBounds);
                }
                Some(dir)
            }
            _ => None,
        };

        let conflict = self
            .block_points()
            .any(|p| !matches!(grid.tile(p.x, p.y), Ok(tile) if !tile.has_block()));

        if conflict {
            self.rotation = if self.rotation == 0 { 3 } else { self.rotation - 1 };
            if let Some(dir) = kicked {
                self.shift(grid, dir.opposite(), amount);
            }
            self.update_blocks();
        }

        Ok(())
    }

    /// One gravity step. If every block has a free tile below, the shape
    /// moves down one row; otherwise it lands: every block is stamped into
    /// its current tile, the block list empties and the shape goes inactive.
    pub fn drop(&mut self, grid: &mut Grid) -> DropOutcome {
        let points: Vec<Point> = self.block_points().collect();
        for point in points {
            let new_y = point.y + 1;
            if new_y >= grid.height() as i32 {
                return self.land(grid);
            }
            if matches!(grid.tile(point.x, new_y), Ok(tile) if tile.has_block()) {
                return self.land(grid);
            }
        }

        self.origin.translate(0, 1);
        for block in &mut self.blocks {
            block.translate(0, 1);
        }
        DropOutcome::Stepped
    }

    fn land(&mut self, grid: &mut Grid) -> DropOutcome {
        debug!("{} landed at {}", self.kind.name, self.origin);

        for block in self.blocks.drain(..) {
            if let Ok(point) = block.position() {
                if let Ok(tile) = grid.tile_mut(point.x, point.y) {
                    tile.set_block(block);
                }
            }
        }

        DropOutcome::Landed
    }

    /// How many rows the shape can still fall before any block rests on the
    /// floor or collides, scanning straight down from each block.
    #[must_use]
    pub fn ghost_distance(&self, grid: &Grid) -> i32 {
        if self.blocks.is_empty() {
            return 0;
        }

        let mut min_distance = grid.height() as i32;
        for point in self.block_points() {
            let mut distance = 0;
            while point.y + distance + 1 < grid.height() as i32 {
                if matches!(grid.tile(point.x, point.y + distance + 1), Ok(tile) if tile.has_block())
                {
                    break;
                }
                distance += 1;
            }
            min_distance = min_distance.min(distance);
        }

        min_distance
    }

    /// Renders the drop preview (dim, at the ghost offset) and then the
    /// shape itself.
    pub fn draw(&self, grid: &Grid, buf: &mut Buffer, board: Rect, show_ghost: bool) {
        if show_ghost {
            let distance = self.ghost_distance(grid);
            for point in self.block_points() {
                crate::ui::paint_cell(buf, board, point.offset(0, distance), Color::DarkGray);
            }
        }

        for block in &self.blocks {
            block.draw(buf, board);
        }
    }
}
