//! Menu geometry: [`Dimension`] and [`SlotPos`].
//!
//! Slots are addressed either by a flat 0-based index or by a 1-based
//! `(row, column)` pair. The two are related by
//! `index = (row - 1) * columns + (column - 1)`.

use std::fmt;

// ---------------------------------------------------------------------------
// SlotPos
// ---------------------------------------------------------------------------

/// A 1-based `(row, column)` position inside a menu.
///
/// The top-left slot is `(1, 1)`. Ordering is row-major, matching the order
/// of flat slot indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotPos {
    pub row: u32,
    pub column: u32,
}

impl SlotPos {
    /// Create a new position.
    #[inline]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SlotPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// The rows × columns shape of a menu. Immutable once a menu is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub rows: u32,
    pub columns: u32,
}

impl Dimension {
    /// Create a new dimension.
    #[inline]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Total number of slots.
    #[inline]
    pub const fn area(self) -> usize {
        (self.rows as usize) * (self.columns as usize)
    }

    /// Whether `pos` lies inside this shape.
    #[inline]
    pub const fn contains(self, pos: SlotPos) -> bool {
        pos.row >= 1 && pos.row <= self.rows && pos.column >= 1 && pos.column <= self.columns
    }

    /// Flat index of a 1-based `(row, column)` pair, or `None` when the pair
    /// is outside the shape.
    #[inline]
    pub fn index_of(self, row: u32, column: u32) -> Option<usize> {
        let pos = SlotPos::new(row, column);
        if !self.contains(pos) {
            return None;
        }
        Some(((row - 1) * self.columns + (column - 1)) as usize)
    }

    /// The 1-based position of a flat index, or `None` past the last slot.
    #[inline]
    pub fn position(self, index: usize) -> Option<SlotPos> {
        if index >= self.area() {
            return None;
        }
        let columns = self.columns as usize;
        Some(SlotPos::new(
            (index / columns) as u32 + 1,
            (index % columns) as u32 + 1,
        ))
    }

    /// Row-major iterator over every position.
    pub fn positions(self) -> Positions {
        Positions {
            dimension: self,
            next: 0,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Row-major iterator over the positions of a [`Dimension`].
#[derive(Clone, Debug)]
pub struct Positions {
    dimension: Dimension,
    next: usize,
}

impl Iterator for Positions {
    type Item = SlotPos;

    #[inline]
    fn next(&mut self) -> Option<SlotPos> {
        let pos = self.dimension.position(self.next)?;
        self.next += 1;
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.dimension.area().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Positions {}
