//! Raw interaction events: [`ClickEvent`], [`DragEvent`] and the enums they
//! carry ([`InventoryAction`], [`ClickType`], [`DragType`], [`ClickResult`],
//! [`Region`]).
//!
//! A host builds one event per user gesture, hands it to the engine, and
//! honours the event's [`ClickResult`] afterwards.

use std::collections::BTreeMap;
use std::fmt;

use crate::item::ItemStack;

// ---------------------------------------------------------------------------
// ViewerId
// ---------------------------------------------------------------------------

/// Identity of one viewer (a player, a session, a test double).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewerId(pub u64);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// InventoryAction
// ---------------------------------------------------------------------------

/// What a click does to the clicked slot, as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryAction {
    /// Nothing happens.
    Nothing,
    /// The whole stack moves onto the cursor.
    PickupAll,
    /// Part of an over-full stack moves onto the cursor.
    PickupSome,
    /// Half the stack (rounded up) moves onto the cursor.
    PickupHalf,
    /// One item moves onto the cursor.
    PickupOne,
    /// The whole cursor stack is placed in the slot.
    PlaceAll,
    /// As much of the cursor stack as fits is placed.
    PlaceSome,
    /// One item of the cursor stack is placed.
    PlaceOne,
    /// Cursor and slot exchange stacks.
    SwapWithCursor,
    /// The whole cursor stack is dropped outside the window.
    DropAllCursor,
    /// One item of the cursor stack is dropped outside the window.
    DropOneCursor,
    /// The whole slot stack is dropped.
    DropAllSlot,
    /// One item of the slot stack is dropped.
    DropOneSlot,
    /// Shift-transfer into the other container of the view.
    MoveToOtherInventory,
    /// Hotbar swap where the hotbar item is re-added elsewhere.
    HotbarMoveAndReadd,
    /// The slot and a hotbar slot exchange stacks.
    HotbarSwap,
    /// Creative-mode stack clone.
    CloneStack,
    /// Matching stacks anywhere in the view gather onto the cursor.
    CollectToCursor,
    /// The host could not tell.
    Unknown,
}

impl InventoryAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Nothing,
        Self::PickupAll,
        Self::PickupSome,
        Self::PickupHalf,
        Self::PickupOne,
        Self::PlaceAll,
        Self::PlaceSome,
        Self::PlaceOne,
        Self::SwapWithCursor,
        Self::DropAllCursor,
        Self::DropOneCursor,
        Self::DropAllSlot,
        Self::DropOneSlot,
        Self::MoveToOtherInventory,
        Self::HotbarMoveAndReadd,
        Self::HotbarSwap,
        Self::CloneStack,
        Self::CollectToCursor,
        Self::Unknown,
    ];

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }
}

// ---------------------------------------------------------------------------
// ClickType
// ---------------------------------------------------------------------------

/// The modifier-qualified button used for a click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickType {
    Left,
    ShiftLeft,
    Right,
    ShiftRight,
    WindowBorderLeft,
    WindowBorderRight,
    Middle,
    /// A number key (hotbar swap).
    NumberKey,
    DoubleClick,
    /// The drop key.
    Drop,
    /// Control + drop key.
    ControlDrop,
    Creative,
    /// The off-hand swap key.
    SwapOffhand,
    Unknown,
}

impl ClickType {
    /// Every click type, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Left,
        Self::ShiftLeft,
        Self::Right,
        Self::ShiftRight,
        Self::WindowBorderLeft,
        Self::WindowBorderRight,
        Self::Middle,
        Self::NumberKey,
        Self::DoubleClick,
        Self::Drop,
        Self::ControlDrop,
        Self::Creative,
        Self::SwapOffhand,
        Self::Unknown,
    ];

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn is_shift_click(self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }

    #[inline]
    pub const fn is_left_click(self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::ShiftLeft
                | Self::DoubleClick
                | Self::WindowBorderLeft
                | Self::Creative
        )
    }

    #[inline]
    pub const fn is_right_click(self) -> bool {
        matches!(
            self,
            Self::Right | Self::ShiftRight | Self::WindowBorderRight
        )
    }
}

// ---------------------------------------------------------------------------
// DragType
// ---------------------------------------------------------------------------

/// How a held stack is spread over the cells of a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragType {
    /// One item per cell (right button).
    Single,
    /// The stack split evenly (left button).
    Even,
}

impl DragType {
    /// The click type each cell of the drag is reported as.
    #[inline]
    pub const fn click_type(self) -> ClickType {
        match self {
            Self::Even => ClickType::Left,
            Self::Single => ClickType::Right,
        }
    }
}

// ---------------------------------------------------------------------------
// ClickResult
// ---------------------------------------------------------------------------

/// The authoritative outcome a host enforces after routing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickResult {
    /// The host applies its native behaviour.
    #[default]
    Default,
    /// The interaction is explicitly permitted.
    Allow,
    /// The interaction is refused; the view reverts.
    Deny,
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// Which part of the view a click landed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// The menu's own container (the top of the view).
    Menu,
    /// The viewer's own container (the bottom of the view).
    Foreign,
    /// Outside both containers.
    Outside,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::Menu, Self::Foreign, Self::Outside];
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// An amount of the moving stack assigned to one menu slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    pub slot: usize,
    pub amount: u32,
}

impl Transfer {
    #[inline]
    pub const fn new(slot: usize, amount: u32) -> Self {
        Self { slot, amount }
    }
}

// ---------------------------------------------------------------------------
// ClickEvent
// ---------------------------------------------------------------------------

/// A single click delivered by the host.
///
/// The `result` starts at [`ClickResult::Default`] and is rewritten by the
/// engine. A *suppressed* event is denied and must not be processed any
/// further by the host.
#[derive(Clone, Debug)]
pub struct ClickEvent {
    viewer: ViewerId,
    action: InventoryAction,
    click: ClickType,
    region: Region,
    slot: Option<usize>,
    cursor: Option<ItemStack>,
    current: Option<ItemStack>,
    hotbar: Option<ItemStack>,
    result: ClickResult,
    suppressed: bool,
    transfers: Vec<Transfer>,
}

impl ClickEvent {
    /// Create a click with no slot and no items attached.
    pub fn new(
        viewer: ViewerId,
        action: InventoryAction,
        click: ClickType,
        region: Region,
    ) -> Self {
        Self {
            viewer,
            action,
            click,
            region,
            slot: None,
            cursor: None,
            current: None,
            hotbar: None,
            result: ClickResult::Default,
            suppressed: false,
            transfers: Vec::new(),
        }
    }

    /// Set the clicked slot index within the clicked region (builder).
    pub fn at_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Set the stack held on the cursor (builder).
    pub fn with_cursor(mut self, item: ItemStack) -> Self {
        self.cursor = Some(item);
        self
    }

    /// Set the stack in the clicked slot (builder).
    pub fn with_current(mut self, item: ItemStack) -> Self {
        self.current = Some(item);
        self
    }

    /// Set the stack in the hotbar slot used by a number-key swap (builder).
    pub fn with_hotbar(mut self, item: ItemStack) -> Self {
        self.hotbar = Some(item);
        self
    }

    #[inline]
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    #[inline]
    pub fn action(&self) -> InventoryAction {
        self.action
    }

    #[inline]
    pub fn click(&self) -> ClickType {
        self.click
    }

    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    #[inline]
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    pub fn cursor(&self) -> Option<&ItemStack> {
        self.cursor.as_ref()
    }

    /// The stack in the clicked slot. After a shift-transfer into a menu
    /// this is what remains of the moving stack.
    pub fn current(&self) -> Option<&ItemStack> {
        self.current.as_ref()
    }

    /// Replace the clicked-slot stack.
    pub fn set_current(&mut self, item: Option<ItemStack>) {
        self.current = item;
    }

    pub fn hotbar(&self) -> Option<&ItemStack> {
        self.hotbar.as_ref()
    }

    #[inline]
    pub fn result(&self) -> ClickResult {
        self.result
    }

    #[inline]
    pub fn set_result(&mut self, result: ClickResult) {
        self.result = result;
    }

    /// Deny the event and mark it as fully handled.
    pub fn suppress(&mut self) {
        self.result = ClickResult::Deny;
        self.suppressed = true;
    }

    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Shares of a shift-transfer the engine has already written into the
    /// menu, in the order they were applied.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Record an applied share.
    pub fn push_transfer(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }
}

// ---------------------------------------------------------------------------
// DragEvent
// ---------------------------------------------------------------------------

/// A drag spreading the cursor stack over several cells.
///
/// `new_items` is keyed by raw view index: indices below the menu
/// container's size address menu slots, the rest belong to the viewer's own
/// container.
#[derive(Clone, Debug)]
pub struct DragEvent {
    viewer: ViewerId,
    drag_type: DragType,
    cursor: Option<ItemStack>,
    new_items: BTreeMap<usize, ItemStack>,
    result: ClickResult,
}

impl DragEvent {
    pub fn new(viewer: ViewerId, drag_type: DragType) -> Self {
        Self {
            viewer,
            drag_type,
            cursor: None,
            new_items: BTreeMap::new(),
            result: ClickResult::Default,
        }
    }

    /// Set the stack held on the cursor before the drag (builder).
    pub fn with_cursor(mut self, item: ItemStack) -> Self {
        self.cursor = Some(item);
        self
    }

    /// Add the stack a cell will hold once the drag completes (builder).
    pub fn with_cell(mut self, index: usize, item: ItemStack) -> Self {
        self.new_items.insert(index, item);
        self
    }

    #[inline]
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    #[inline]
    pub fn drag_type(&self) -> DragType {
        self.drag_type
    }

    pub fn cursor(&self) -> Option<&ItemStack> {
        self.cursor.as_ref()
    }

    /// Cells touched by the drag, in ascending index order.
    pub fn new_items(&self) -> &BTreeMap<usize, ItemStack> {
        &self.new_items
    }

    #[inline]
    pub fn result(&self) -> ClickResult {
        self.result
    }

    #[inline]
    pub fn set_result(&mut self, result: ClickResult) {
        self.result = result;
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn enums_serialize_by_name() {
        let json = serde_json::to_string(&InventoryAction::MoveToOtherInventory).unwrap();
        assert_eq!(json, r#""MoveToOtherInventory""#);
        let back: ClickResult = serde_json::from_str(r#""Deny""#).unwrap();
        assert_eq!(back, ClickResult::Deny);
    }
}
