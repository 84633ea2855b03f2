//! Containers: the fixed-size slot arrays a viewer actually sees.
//!
//! [`Container`] is the seam a host implements for its native inventory
//! type. [`Inventory`] is an in-process implementation backed by a shared
//! buffer: cloning an `Inventory` yields another handle onto the **same**
//! storage, so every holder observes the same contents.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::geom::Dimension;
use crate::item::ItemStack;

// ---------------------------------------------------------------------------
// ContainerKind
// ---------------------------------------------------------------------------

/// The native shape backing a menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerKind {
    /// A chest with `rows` rows of nine columns.
    Chest { rows: u32 },
    /// A five-slot hopper.
    Hopper,
    /// A 3×3 crafting grid.
    Workbench,
    /// A 3×3 dispenser.
    Dispenser,
    /// A 3×3 dropper.
    Dropper,
}

impl ContainerKind {
    /// The rows × columns of this kind.
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Chest { rows } => Dimension::new(rows, 9),
            Self::Hopper => Dimension::new(1, 5),
            Self::Workbench | Self::Dispenser | Self::Dropper => Dimension::new(3, 3),
        }
    }

    /// Title used when a menu does not set one.
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Chest { .. } => "Chest",
            Self::Hopper => "Item Hopper",
            Self::Workbench => "Crafting",
            Self::Dispenser => "Dispenser",
            Self::Dropper => "Dropper",
        }
    }

    /// Whether this is one of the 3×3 box shapes.
    pub const fn is_box(self) -> bool {
        matches!(self, Self::Workbench | Self::Dispenser | Self::Dropper)
    }

    /// Shapes into which shift-transfers are refused outright.
    ///
    /// Hosts recurse without bound when merging into these specialised
    /// containers, so the engine never lets such a transfer through.
    pub const fn blocks_shift_transfer(self) -> bool {
        matches!(
            self,
            Self::Hopper | Self::Workbench | Self::Dispenser | Self::Dropper
        )
    }
}

// ---------------------------------------------------------------------------
// Container trait
// ---------------------------------------------------------------------------

/// A fixed-size indexed array of item slots with a title.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability since containers are shared between the engine and the host.
pub trait Container: Send + Sync + fmt::Debug {
    /// The native shape.
    fn kind(&self) -> ContainerKind;

    /// Current title.
    fn title(&self) -> String;

    /// Read the item at `index`. `None` for an empty slot or an index past
    /// the end.
    fn item(&self, index: usize) -> Option<ItemStack>;

    /// Write the item at `index`. No-op past the end.
    fn set_item(&self, index: usize, item: Option<ItemStack>);

    /// Number of slots.
    fn size(&self) -> usize {
        self.kind().dimension().area()
    }

    /// Snapshot of every slot, in index order.
    fn contents(&self) -> Vec<Option<ItemStack>> {
        (0..self.size()).map(|i| self.item(i)).collect()
    }

    /// Lowest empty slot, if any.
    fn first_empty(&self) -> Option<usize> {
        (0..self.size()).find(|&i| self.item(i).is_none())
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct InventoryBuffer {
    slots: Vec<Option<ItemStack>>,
    title: String,
}

/// An in-memory [`Container`] backed by shared storage.
///
/// Cloning produces another handle onto the same buffer.
#[derive(Debug, Clone)]
pub struct Inventory {
    buffer: Arc<Mutex<InventoryBuffer>>,
    kind: ContainerKind,
}

impl Inventory {
    /// Create an empty inventory of the given kind.
    pub fn new(kind: ContainerKind, title: impl Into<String>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(InventoryBuffer {
                slots: vec![None; kind.dimension().area()],
                title: title.into(),
            })),
            kind,
        }
    }

    /// Replace the title.
    pub fn set_title(&self, title: impl Into<String>) {
        self.buffer.lock().title = title.into();
    }

    /// Whether two handles share the same storage.
    pub fn same_storage(&self, other: &Inventory) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl Container for Inventory {
    fn kind(&self) -> ContainerKind {
        self.kind
    }

    fn title(&self) -> String {
        self.buffer.lock().title.clone()
    }

    fn item(&self, index: usize) -> Option<ItemStack> {
        self.buffer.lock().slots.get(index).cloned().flatten()
    }

    fn set_item(&self, index: usize, item: Option<ItemStack>) {
        let mut buf = self.buffer.lock();
        if let Some(slot) = buf.slots.get_mut(index) {
            *slot = item;
        }
    }

    fn size(&self) -> usize {
        self.buffer.lock().slots.len()
    }

    fn contents(&self) -> Vec<Option<ItemStack>> {
        self.buffer.lock().slots.clone()
    }
}
