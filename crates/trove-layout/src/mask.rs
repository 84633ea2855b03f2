//! Pattern masks.
//!
//! A mask builder keeps a current row. [`pattern`](BinaryMaskBuilder::pattern)
//! writes one line into it and moves to the next row;
//! [`row`](BinaryMaskBuilder::row) jumps to a 1-based row. Characters past
//! the last column are ignored, and short lines leave the rest of the row as
//! it was. Mistakes are collected and reported by `build`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use trove_core::Dimension;
use trove_menu::{ItemTemplate, Menu, SlotSettings};

use crate::error::LayoutError;

/// A set of slot indices with something to put in them.
pub trait Mask {
    /// The shape the mask was built for.
    fn dimension(&self) -> Dimension;

    /// Selected slot indices in ascending order.
    fn slots(&self) -> Vec<usize>;

    fn contains(&self, index: usize) -> bool;

    /// [`contains`](Mask::contains) for a 1-based `(row, column)`.
    fn contains_at(&self, row: u32, column: u32) -> bool {
        self.dimension()
            .index_of(row, column)
            .is_some_and(|index| self.contains(index))
    }

    /// Write the mask's contents into `menu`. Slots past the end of the
    /// menu are skipped.
    fn apply(&self, menu: &Menu);
}

// ---------------------------------------------------------------------------
// Row cursor
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct RowCursor {
    dimension: Dimension,
    row: u32,
    error: Option<LayoutError>,
}

impl RowCursor {
    fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            row: 0,
            error: None,
        }
    }

    fn fail(&mut self, row: u32) {
        if self.error.is_none() {
            self.error = Some(LayoutError::RowOutOfRange {
                row,
                rows: self.dimension.rows,
            });
        }
    }

    fn jump(&mut self, row: u32) {
        if row < 1 || row > self.dimension.rows {
            self.fail(row);
        } else {
            self.row = row - 1;
        }
    }

    fn previous(&mut self) {
        if self.row == 0 {
            self.fail(0);
        } else {
            self.row -= 1;
        }
    }

    fn next(&mut self) {
        if self.row < self.dimension.rows {
            self.row += 1;
        }
    }

    /// Indices of the current row paired with the pattern's characters.
    fn cells(&mut self, pattern: &str) -> Vec<(usize, char)> {
        if self.row >= self.dimension.rows {
            self.fail(self.row + 1);
            return Vec::new();
        }
        let columns = self.dimension.columns as usize;
        let first = self.row as usize * columns;
        pattern
            .chars()
            .take(columns)
            .enumerate()
            .map(|(column, c)| (first + column, c))
            .collect()
    }

    fn finish(&self) -> Result<(), LayoutError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// BinaryMask
// ---------------------------------------------------------------------------

/// Slots marked `'1'` in the pattern, all showing one item.
#[derive(Clone, Debug)]
pub struct BinaryMask {
    dimension: Dimension,
    slots: BTreeSet<usize>,
    item: ItemTemplate,
}

impl BinaryMask {
    pub fn builder(dimension: Dimension) -> BinaryMaskBuilder {
        BinaryMaskBuilder {
            cursor: RowCursor::new(dimension),
            cells: vec![false; dimension.area()],
            item: ItemTemplate::empty(),
        }
    }

    /// A builder sized for `menu`.
    pub fn for_menu(menu: &Menu) -> BinaryMaskBuilder {
        Self::builder(menu.dimension())
    }

    pub fn item(&self) -> &ItemTemplate {
        &self.item
    }
}

impl Mask for BinaryMask {
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn slots(&self) -> Vec<usize> {
        self.slots.iter().copied().collect()
    }

    fn contains(&self, index: usize) -> bool {
        self.slots.contains(&index)
    }

    fn apply(&self, menu: &Menu) {
        for slot in self.slots.iter().filter_map(|&i| menu.slot(i)) {
            slot.set_item_template(self.item.clone());
        }
    }
}

/// Builder for [`BinaryMask`].
#[derive(Clone, Debug)]
pub struct BinaryMaskBuilder {
    cursor: RowCursor,
    cells: Vec<bool>,
    item: ItemTemplate,
}

impl BinaryMaskBuilder {
    /// Move to the 1-based `row`.
    pub fn row(mut self, row: u32) -> Self {
        self.cursor.jump(row);
        self
    }

    pub fn next_row(mut self) -> Self {
        self.cursor.next();
        self
    }

    pub fn previous_row(mut self) -> Self {
        self.cursor.previous();
        self
    }

    /// The 1-based row the next pattern writes to.
    pub fn current_row(&self) -> u32 {
        self.cursor.row + 1
    }

    pub fn item(mut self, item: impl Into<ItemTemplate>) -> Self {
        self.item = item.into();
        self
    }

    /// Write `line` into the current row without moving.
    pub fn apply(mut self, line: &str) -> Self {
        for (index, c) in self.cursor.cells(line) {
            self.cells[index] = c == '1';
        }
        self
    }

    /// Write `line` into the current row and move to the next one.
    pub fn pattern(self, line: &str) -> Self {
        self.apply(line).next_row()
    }

    pub fn build(self) -> Result<BinaryMask, LayoutError> {
        self.cursor.finish()?;
        let slots = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(index, &set)| set.then_some(index))
            .collect();
        Ok(BinaryMask {
            dimension: self.cursor.dimension,
            slots,
            item: self.item,
        })
    }
}

// ---------------------------------------------------------------------------
// RecipeMask
// ---------------------------------------------------------------------------

/// Slots keyed by pattern character, each character mapped to
/// [`SlotSettings`].
#[derive(Clone, Debug)]
pub struct RecipeMask {
    dimension: Dimension,
    cells: BTreeMap<usize, char>,
    settings: HashMap<char, SlotSettings>,
}

impl RecipeMask {
    pub fn builder(dimension: Dimension) -> RecipeMaskBuilder {
        RecipeMaskBuilder {
            cursor: RowCursor::new(dimension),
            cells: vec![None; dimension.area()],
            settings: HashMap::new(),
        }
    }

    pub fn for_menu(menu: &Menu) -> RecipeMaskBuilder {
        Self::builder(menu.dimension())
    }

    /// The character written at `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.cells.get(&index).copied()
    }

    /// Slots written with `c`, ascending.
    pub fn slots_of(&self, c: char) -> Vec<usize> {
        self.cells
            .iter()
            .filter_map(|(&index, &cell)| (cell == c).then_some(index))
            .collect()
    }
}

impl Mask for RecipeMask {
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn slots(&self) -> Vec<usize> {
        self.cells.keys().copied().collect()
    }

    fn contains(&self, index: usize) -> bool {
        self.cells.contains_key(&index)
    }

    /// Characters without settings leave their slots alone.
    fn apply(&self, menu: &Menu) {
        for (&index, c) in &self.cells {
            let (Some(settings), Some(slot)) = (self.settings.get(c), menu.slot(index)) else {
                continue;
            };
            slot.apply_settings(settings);
        }
    }
}

/// Builder for [`RecipeMask`].
#[derive(Clone, Debug)]
pub struct RecipeMaskBuilder {
    cursor: RowCursor,
    cells: Vec<Option<char>>,
    settings: HashMap<char, SlotSettings>,
}

impl RecipeMaskBuilder {
    pub fn row(mut self, row: u32) -> Self {
        self.cursor.jump(row);
        self
    }

    pub fn next_row(mut self) -> Self {
        self.cursor.next();
        self
    }

    pub fn previous_row(mut self) -> Self {
        self.cursor.previous();
        self
    }

    pub fn current_row(&self) -> u32 {
        self.cursor.row + 1
    }

    /// Map `c` to `settings`.
    pub fn item(mut self, c: char, settings: SlotSettings) -> Self {
        self.settings.insert(c, settings);
        self
    }

    /// Map `c` to a plain item.
    pub fn item_template(self, c: char, template: impl Into<ItemTemplate>) -> Self {
        self.item(c, SlotSettings::from_template(template))
    }

    /// Forget the mapping for `c`.
    pub fn remove_item(mut self, c: char) -> Self {
        self.settings.remove(&c);
        self
    }

    pub fn apply(mut self, line: &str) -> Self {
        for (index, c) in self.cursor.cells(line) {
            self.cells[index] = Some(c);
        }
        self
    }

    pub fn pattern(self, line: &str) -> Self {
        self.apply(line).next_row()
    }

    pub fn build(self) -> Result<RecipeMask, LayoutError> {
        self.cursor.finish()?;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(index, c)| c.map(|c| (index, c)))
            .collect();
        Ok(RecipeMask {
            dimension: self.cursor.dimension,
            cells,
            settings: self.settings,
        })
    }
}
