#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since field dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use std::fmt;

use bevy_ecs::prelude::*;
use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::shape::ShapeType;

/// A 2-dimensional point on the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A new point offset from this one.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Moves the point in place. No bounds checking; validity is the
    /// caller's responsibility.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Errors raised when a caller violates a grid or block invariant. These are
/// logic defects in the caller, not recoverable game conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A tile lookup outside the current field bounds.
    OutOfRange { x: i32, y: i32 },
    /// A block that is neither anchored to a tile nor carrying its own point.
    BlockLost,
    /// A block transfer from a tile that holds no block.
    MissingBlock { x: i32, y: i32 },
    /// A block transfer onto a tile that is already occupied.
    DestinationOccupied { x: i32, y: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfRange { x, y } => write!(f, "invalid tile coordinates: {x}x{y}"),
            GridError::BlockLost => write!(f, "block lost: no anchoring tile and no own point"),
            GridError::MissingBlock { x, y } => {
                write!(f, "tile {x}x{y} has no block to move")
            }
            GridError::DestinationOccupied { x, y } => {
                write!(f, "cannot move block to occupied tile {x}x{y}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A single colored unit. While it belongs to the active shape it carries its
/// own point; once stamped into the field its position resolves through the
/// anchoring tile (the tile arena keeps tile points equal to their indices,
/// so the anchor index is the position).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    color: Color,
    point: Option<Point>,
    anchor: Option<(usize, usize)>,
}

impl Block {
    #[must_use]
    pub fn new(color: Color, point: Option<Point>) -> Self {
        Self {
            color,
            point,
            anchor: None,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// The block's effective position: the anchoring tile's point when
    /// anchored, its own point while floating.
    ///
    /// # Errors
    ///
    /// `GridError::BlockLost` if the block is unanchored and has no own
    /// point. That state must never occur in normal operation.
    pub fn position(&self) -> Result<Point, GridError> {
        if let Some((x, y)) = self.anchor {
            return Ok(Point::new(x as i32, y as i32));
        }
        self.point.ok_or(GridError::BlockLost)
    }

    /// Moves the floating point, if any. Anchored blocks are repositioned by
    /// the grid through their tile instead.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if let Some(point) = &mut self.point {
            point.translate(dx, dy);
        }
    }

    /// Anchors the block to the tile at the given arena index. The own point
    /// is dropped; it must not be read once the tile owns the block.
    pub(crate) fn anchor_to(&mut self, x: usize, y: usize) {
        self.anchor = Some((x, y));
        self.point = None;
    }

    /// Clears the anchor only if it still refers to the given tile, so a
    /// stale detach after re-anchoring is a no-op.
    pub(crate) fn detach_from(&mut self, x: usize, y: usize) {
        if self.anchor == Some((x, y)) {
            self.anchor = None;
        }
    }

    /// Paints the block into the board area.
    pub fn draw(&self, buf: &mut Buffer, board: Rect) {
        if let Ok(point) = self.position() {
            crate::ui::paint_cell(buf, board, point, self.color);
        }
    }
}

/// One cell of the field. The point never changes except through grid row
/// shifts, and always equals the tile's arena index.
#[derive(Debug, Clone)]
pub struct Tile {
    point: Point,
    block: Option<Block>,
}

impl Tile {
    #[must_use]
    pub(crate) fn new(point: Point) -> Self {
        Self { point, block: None }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        self.point
    }

    #[must_use]
    pub fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    #[must_use]
    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    /// Takes ownership of the block and anchors it here. Any previous
    /// occupant is overwritten without being detached; callers guarantee the
    /// tile is empty (checked via `has_block` at the call sites).
    pub fn set_block(&mut self, mut block: Block) {
        block.anchor_to(self.point.x as usize, self.point.y as usize);
        self.block = Some(block);
    }

    /// Detaches and returns the current block, if any. Idempotent.
    pub fn clear_block(&mut self) -> Option<Block> {
        let mut block = self.block.take();
        if let Some(block) = &mut block {
            block.detach_from(self.point.x as usize, self.point.y as usize);
        }
        block
    }

    /// Moves the tile's point during grid row surgery and keeps the
    /// occupant's anchor in step with the new index.
    pub(crate) fn shift_point(&mut self, dx: i32, dy: i32) {
        self.point.translate(dx, dy);
        if let Some(block) = &mut self.block {
            block.anchor_to(self.point.x as usize, self.point.y as usize);
        }
    }

    /// Delegates to the block's draw if occupied; no-op otherwise.
    pub fn draw(&self, buf: &mut Buffer, board: Rect) {
        if let Some(block) = &self.block {
            block.draw(buf, board);
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: f64,
    pub rows_cleared: u32,
    pub combos: u32,
    pub super_combos: u32,
    pub game_over: bool,
    pub paused: bool,
    pub drop_timer: f32,
    pub next_kind: Option<&'static ShapeType>,
    pub last_key: Option<KeyEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0.0,
            rows_cleared: 0,
            combos: 0,
            super_combos: 0,
            game_over: false,
            paused: false,
            drop_timer: 0.0,
            next_kind: None,
            last_key: None,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds a score award plus the height bonus: a taller field makes every
    /// award worth a little more.
    pub fn add_score(&mut self, points: f64, field_height: usize) {
        self.score += points + crate::game::HEIGHT_BONUS_FACTOR * field_height as f64;
    }
}

/// Input state for keyboard controls. Flags are set by the event loop and
/// consumed (cleared) once per game tick; held-key repetition comes from the
/// terminal's own key repeat.
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
}

impl Input {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
