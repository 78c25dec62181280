//! Board geometry: the fixed tile grid, pixel/tile mapping, and bear trap
//! footprints.
//!
//! Tile coordinates are centred: the middle tile of the grid is `(0, 0)`, so
//! with 41 columns `x` ranges over `-20..=20`.
//!
//! The server only stores and checks tile coordinates. [`point_to_cell`] and
//! [`cell_origin`] are the pixel mapping shared with client-side tooling that
//! renders the board or turns clicks into tiles.

use serde::{Deserialize, Serialize};

/// Number of tile columns on the board.
pub const GRID_COLS: i64 = 41;

/// Number of tile rows on the board.
pub const GRID_ROWS: i64 = 41;

/// Edge length (in tiles) of a bear trap's square footprint.
pub const TRAP_SIZE: i64 = 2;

/// Lowest trap slot number.
pub const TRAP_SLOT_MIN: i64 = 1;

/// Highest trap slot number. The board holds at most this many traps.
pub const TRAP_SLOT_MAX: i64 = 3;

/// A centred tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

/// An absolute pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The on-screen rectangle the grid is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Offset between a zero-based column index and its centred coordinate.
pub const fn half_extent(tiles: i64) -> i64 {
    tiles / 2
}

/// Map a pixel inside the rendered grid to the tile under it.
///
/// The rectangle is split evenly into `cols` x `rows` tiles. Points outside
/// the rectangle map to out-of-range cells; use [`in_bounds`] to reject them.
/// Returns `None` for a degenerate (zero or negative sized) rectangle.
pub fn point_to_cell(point: Point, rect: Rect, cols: i64, rows: i64) -> Option<Cell> {
    if rect.width <= 0.0 || rect.height <= 0.0 || cols <= 0 || rows <= 0 {
        return None;
    }
    let col = ((point.x - rect.left) / rect.width * cols as f64).floor() as i64;
    let row = ((point.y - rect.top) / rect.height * rows as f64).floor() as i64;
    Some(Cell {
        x: col - half_extent(cols),
        y: row - half_extent(rows),
    })
}

/// Top-left pixel of a tile relative to the grid origin, for a square
/// `cell_size` in pixels.
pub fn cell_origin(cell: Cell, cell_size: f64) -> Point {
    Point {
        x: (cell.x + half_extent(GRID_COLS)) as f64 * cell_size,
        y: (cell.y + half_extent(GRID_ROWS)) as f64 * cell_size,
    }
}

/// Whether a centred tile coordinate lies on the board.
pub fn in_bounds(x: i64, y: i64) -> bool {
    let hx = half_extent(GRID_COLS);
    let hy = half_extent(GRID_ROWS);
    (-hx..=hx).contains(&x) && (-hy..=hy).contains(&y)
}

/// The square of tiles covered by a bear trap anchored at its top-left tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapFootprint {
    pub x: i64,
    pub y: i64,
}

impl TrapFootprint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.x + TRAP_SIZE && y >= self.y && y < self.y + TRAP_SIZE
    }

    /// Whether every tile of the footprint lies on the board.
    pub fn in_bounds(&self) -> bool {
        in_bounds(self.x, self.y) && in_bounds(self.x + TRAP_SIZE - 1, self.y + TRAP_SIZE - 1)
    }
}

/// Whether any of the given footprints covers tile `(x, y)`.
pub fn any_trap_contains<'a, I>(traps: I, x: i64, y: i64) -> bool
where
    I: IntoIterator<Item = &'a TrapFootprint>,
{
    traps.into_iter().any(|t| t.contains(x, y))
}
