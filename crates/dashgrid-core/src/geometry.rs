#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Grid coordinates are 0-indexed cells with the origin at the top-left.
//! Rows grow downward without an upper bound; columns are bounded by the
//! grid's column count, which these types do not know about.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A block rectangle in grid cells.
///
/// Deserialization validates the raw values: negative coordinates and
/// zero-sized extents are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    /// Left column (inclusive).
    pub x: u32,
    /// Top row (inclusive).
    pub y: u32,
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Position {
    /// Create a new position without validation.
    #[inline]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a position from untrusted signed values.
    pub fn try_new(x: i64, y: i64, w: i64, h: i64) -> Result<Self, GeometryError> {
        Ok(Self {
            x: coordinate("x", x)?,
            y: coordinate("y", y)?,
            w: extent("w", w)?,
            h: extent("h", h)?,
        })
    }

    /// Place a size at the given origin.
    #[inline]
    pub const fn from_size(x: u32, y: u32, size: Size) -> Self {
        Self::new(x, y, size.w, size.h)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Same size, new origin.
    #[inline]
    pub const fn at(&self, x: u32, y: u32) -> Self {
        Self::new(x, y, self.w, self.h)
    }

    /// Check if a cell is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the rectangle lies inside a grid of `columns` columns.
    #[inline]
    pub const fn fits_columns(&self, columns: u32) -> bool {
        self.w >= 1 && self.h >= 1 && self.right() <= columns
    }

    /// Whether two rectangles share at least one cell.
    ///
    /// Two rectangles are disjoint iff one lies entirely left of, right of,
    /// above, or below the other.
    #[inline]
    pub const fn collides(&self, other: &Position) -> bool {
        !(self.x >= other.right()
            || self.right() <= other.x
            || self.y >= other.bottom()
            || self.bottom() <= other.y)
    }

    /// Iterate the covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0, 1, 1)
    }
}

/// Width and height of a block, both at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize")]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    #[inline]
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Create a size from untrusted signed values.
    pub fn try_new(w: i64, h: i64) -> Result<Self, GeometryError> {
        Ok(Self {
            w: extent("w", w)?,
            h: extent("h", h)?,
        })
    }

    #[inline]
    pub const fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Reject zero extents and widths the grid cannot hold.
    pub fn validate(self, columns: u32) -> Result<(), GeometryError> {
        if self.w == 0 {
            return Err(GeometryError::ZeroExtent { field: "w", value: 0 });
        }
        if self.h == 0 {
            return Err(GeometryError::ZeroExtent { field: "h", value: 0 });
        }
        if self.w > columns {
            return Err(GeometryError::WiderThanGrid {
                w: self.w,
                columns,
            });
        }
        Ok(())
    }
}

impl From<(u32, u32)> for Size {
    fn from((w, h): (u32, u32)) -> Self {
        Self::new(w, h)
    }
}

impl From<(u32, u32, u32, u32)> for Position {
    fn from((x, y, w, h): (u32, u32, u32, u32)) -> Self {
        Self::new(x, y, w, h)
    }
}

#[derive(Deserialize)]
struct RawPosition {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = GeometryError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::try_new(raw.x, raw.y, raw.w, raw.h)
    }
}

#[derive(Deserialize)]
struct RawSize {
    w: i64,
    h: i64,
}

impl TryFrom<RawSize> for Size {
    type Error = GeometryError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        Self::try_new(raw.w, raw.h)
    }
}

fn coordinate(field: &'static str, value: i64) -> Result<u32, GeometryError> {
    if value < 0 {
        return Err(GeometryError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| GeometryError::OutOfRange { field, value })
}

fn extent(field: &'static str, value: i64) -> Result<u32, GeometryError> {
    if value < 1 {
        return Err(GeometryError::ZeroExtent { field, value });
    }
    u32::try_from(value).map_err(|_| GeometryError::OutOfRange { field, value })
}
