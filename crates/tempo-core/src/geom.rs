//! Geometry primitives: [`Position`], [`GridPosition`], [`GridSize`] and
//! [`Size`].
//!
//! `Position` is a world-space location in metres. `GridPosition` addresses a
//! cell by column and row; `GridSize` bounds those addresses.

use std::fmt;

use crate::primitives::Distance;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D world position in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// GridPosition
// ---------------------------------------------------------------------------

/// A cell address: `x` is the column, `y` is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a position shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four lateral neighbours (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [GridPosition; 4] {
        [
            self.shift(0, -1),
            self.shift(1, 0),
            self.shift(0, 1),
            self.shift(-1, 0),
        ]
    }

    /// The four diagonal neighbours, clockwise from the upper right.
    #[inline]
    pub fn diagonals(self) -> [GridPosition; 4] {
        [
            self.shift(1, -1),
            self.shift(1, 1),
            self.shift(-1, 1),
            self.shift(-1, -1),
        ]
    }

    /// All eight neighbours (lateral + diagonal).
    #[inline]
    pub fn neighbors_8(self) -> [GridPosition; 8] {
        [
            self.shift(0, -1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
            self.shift(0, 1),
            self.shift(-1, 1),
            self.shift(-1, 0),
            self.shift(-1, -1),
        ]
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// GridSize
// ---------------------------------------------------------------------------

/// Number of columns and rows of a grid. Valid positions are
/// `[0, columns) x [0, rows)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub columns: i32,
    pub rows: i32,
}

impl GridSize {
    #[inline]
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.columns as usize) * (self.rows as usize)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.columns <= 0 || self.rows <= 0
    }

    #[inline]
    pub fn contains(self, p: GridPosition) -> bool {
        p.x >= 0 && p.x < self.columns && p.y >= 0 && p.y < self.rows
    }

    /// Row-major flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(self, p: GridPosition) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.columns as usize + p.x as usize)
    }

    /// Inverse of [`index`](Self::index). Does not check bounds.
    #[inline]
    pub fn position(self, idx: usize) -> GridPosition {
        let w = self.columns.max(1) as usize;
        GridPosition::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Row-major iterator over every position.
    #[inline]
    pub fn iter(self) -> GridIter {
        GridIter {
            size: self,
            cur: GridPosition::ZERO,
        }
    }
}

impl IntoIterator for GridSize {
    type Item = GridPosition;
    type IntoIter = GridIter;
    #[inline]
    fn into_iter(self) -> GridIter {
        self.iter()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Row-major iterator over the positions of a [`GridSize`].
#[derive(Clone, Debug)]
pub struct GridIter {
    size: GridSize,
    cur: GridPosition,
}

impl Iterator for GridIter {
    type Item = GridPosition;

    #[inline]
    fn next(&mut self) -> Option<GridPosition> {
        if self.size.is_empty() || self.cur.y >= self.size.rows {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.size.columns {
            self.cur.x = 0;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.size.is_empty() || self.cur.y >= self.size.rows {
            return (0, Some(0));
        }
        let w = self.size.columns as usize;
        let remaining_in_row = (self.size.columns - self.cur.x) as usize;
        let remaining_rows = (self.size.rows - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for GridIter {}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Physical extent of one grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: Distance,
    pub height: Distance,
}

impl Size {
    #[inline]
    pub const fn new(width: Distance, height: Distance) -> Self {
        Self { width, height }
    }

    /// A square cell with the given edge length in metres.
    #[inline]
    pub const fn square(meters: f64) -> Self {
        let d = Distance::from_meters(meters);
        Self {
            width: d,
            height: d,
        }
    }
}
