//! Hex board geometry with row-offset coordinates
//!
//! Tiles are packed in "odd-r" layout: every odd row is shifted right by one
//! short radius. Range checks work on straight-line distance between tile
//! centers, not on hex step counts.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default number of tall tiles scattered over the interior
pub const DEFAULT_TALL_QUOTA: usize = 4;

/// sqrt(3) / 2, converts the outer hex radius to the short radius
const SHORT_RADIUS_FACTOR: f32 = 0.866_025_4;

/// Grid coordinates (row, column)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Odd rows are shifted right by one short radius
    pub fn is_odd_row(&self) -> bool {
        self.row % 2 == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Neighbor offsets (drow, dcol) for even rows
/// Index: 0=W, 1=E, 2=NW, 3=NE, 4=SW, 5=SE
const EVEN_ROW_OFFSETS: [(isize, isize); 6] = [
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (1, -1),
    (1, 0),
];

/// Neighbor offsets (drow, dcol) for odd rows, same index order
const ODD_ROW_OFFSETS: [(isize, isize); 6] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (-1, 1),
    (1, 0),
    (1, 1),
];

/// Pixel-space point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// True when `distance` is within `range` short radii, plus a tenth of a
/// radius of slack for rounding in the center coordinates.
pub fn in_reach(distance: f32, range: i32, unit: f32) -> bool {
    distance <= range as f32 * unit + unit / 10.0
}

/// One cell of the board
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub cell: Cell,
    pub center: Point,
    pub occupied: bool,
    pub tall: bool,
}

/// Board of rows x cols hex tiles
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    tile_radius: f32,
    /// Row-major tile storage
    tiles: Vec<Tile>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a flat board (no tall tiles)
    pub fn new(rows: usize, cols: usize, tile_radius: f32) -> Self {
        let short = tile_radius * SHORT_RADIUS_FACTOR;
        let mut tiles = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell::new(row, col);
                tiles.push(Tile {
                    cell,
                    center: center_of(cell, tile_radius, short),
                    occupied: false,
                    tall: false,
                });
            }
        }

        Self {
            rows,
            cols,
            tile_radius,
            tiles,
        }
    }

    /// Create a board and scatter up to `tall_quota` tall tiles over the
    /// interior.
    ///
    /// Each interior tile gets a fair coin flip in row-major order until the
    /// quota runs out, so the result holds at most `tall_quota` tall tiles
    /// and adjacent tall tiles are possible.
    pub fn generate<R: Rng>(
        rows: usize,
        cols: usize,
        tile_radius: f32,
        tall_quota: usize,
        rng: &mut R,
    ) -> Self {
        let mut board = Self::new(rows, cols, tile_radius);
        let mut remaining = tall_quota;

        for tile in board.tiles.iter_mut() {
            let coin = rng.gen_bool(0.5);
            if coin && remaining != 0 && is_interior(tile.cell, rows, cols) {
                tile.tall = true;
                remaining -= 1;
            }
        }

        board
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Outer hex radius
    pub fn tile_radius(&self) -> f32 {
        self.tile_radius
    }

    /// Half the distance between neighboring centers; the unit of every
    /// range check.
    pub fn short_radius(&self) -> f32 {
        self.tile_radius * SHORT_RADIUS_FACTOR
    }

    /// Check if a cell lies on the board
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Get tile at cell
    pub fn tile(&self, cell: Cell) -> Option<&Tile> {
        self.index(cell).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.index(cell).map(move |i| &mut self.tiles[i])
    }

    /// Iterate tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Pixel center of a cell (computed even for off-board cells)
    pub fn center(&self, cell: Cell) -> Point {
        center_of(cell, self.tile_radius, self.short_radius())
    }

    /// Straight-line distance between two tile centers
    pub fn distance(&self, a: Cell, b: Cell) -> f32 {
        self.center(a).distance_to(self.center(b))
    }

    /// On-board hex neighbors of a cell
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let offsets = if cell.is_odd_row() {
            &ODD_ROW_OFFSETS
        } else {
            &EVEN_ROW_OFFSETS
        };

        offsets
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = cell.row.checked_add_signed(dr)?;
                let col = cell.col.checked_add_signed(dc)?;
                let n = Cell::new(row, col);
                self.contains(n).then_some(n)
            })
            .collect()
    }

    pub fn is_tall(&self, cell: Cell) -> bool {
        self.tile(cell).map_or(false, |t| t.tall)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.tile(cell).map_or(false, |t| t.occupied)
    }

    /// Mark terrain elevation (fixtures and scripted boards)
    pub fn set_tall(&mut self, cell: Cell, tall: bool) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.tall = tall;
        }
    }

    pub(crate) fn set_occupied(&mut self, cell: Cell, occupied: bool) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.occupied = occupied;
        }
    }

    pub fn tall_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.tall).count()
    }

    /// Number of tiles eligible for tall terrain
    pub fn interior_count(&self) -> usize {
        self.rows.saturating_sub(2) * self.cols.saturating_sub(2)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }
}

/// Border rows and columns never become tall
fn is_interior(cell: Cell, rows: usize, cols: usize) -> bool {
    cell.row != 0 && cell.col != 0 && cell.row + 1 < rows && cell.col + 1 < cols
}

fn center_of(cell: Cell, radius: f32, short: f32) -> Point {
    let mut x = short + cell.col as f32 * (short * 2.0);
    if cell.is_odd_row() {
        x += short;
    }
    let y = radius + cell.row as f32 * (radius * 1.5);
    Point::new(x, y)
}
