//! Per-event values handed to user handlers.

use std::sync::Arc;

use trove_core::{
    ClickResult, ClickType, InventoryAction, ItemStack, Region, ViewerId,
    item::DEFAULT_MAX_STACK,
};

use crate::menu::Menu;
use crate::slot::Slot;

// ---------------------------------------------------------------------------
// ClickInformation
// ---------------------------------------------------------------------------

/// One slot-level click as seen by a [`ClickHandler`](crate::ClickHandler).
///
/// Everything but the result is fixed at construction. The result starts
/// as whatever the engine decided before the handler ran, which is
/// [`ClickResult::Deny`] when the slot's policy refused the click.
#[derive(Clone, Debug)]
pub struct ClickInformation {
    menu: Arc<Menu>,
    viewer: ViewerId,
    slot: usize,
    action: InventoryAction,
    click: ClickType,
    region: Region,
    result: ClickResult,
    raw_item: Option<ItemStack>,
    adding: Option<ItemStack>,
    cursor: Option<ItemStack>,
    current: Option<ItemStack>,
    hotbar: Option<ItemStack>,
}

impl ClickInformation {
    pub(crate) fn new(
        menu: Arc<Menu>,
        viewer: ViewerId,
        slot: usize,
        action: InventoryAction,
        click: ClickType,
        region: Region,
        result: ClickResult,
    ) -> Self {
        Self {
            menu,
            viewer,
            slot,
            action,
            click,
            region,
            result,
            raw_item: None,
            adding: None,
            cursor: None,
            current: None,
            hotbar: None,
        }
    }

    pub(crate) fn with_raw_item(mut self, item: Option<ItemStack>) -> Self {
        self.raw_item = item;
        self
    }

    /// Fix the stack being added instead of deriving it from the action.
    pub(crate) fn with_adding(mut self, item: Option<ItemStack>) -> Self {
        self.adding = item;
        self
    }

    pub(crate) fn with_items(
        mut self,
        cursor: Option<ItemStack>,
        current: Option<ItemStack>,
        hotbar: Option<ItemStack>,
    ) -> Self {
        self.cursor = cursor;
        self.current = current;
        self.hotbar = hotbar;
        self
    }

    pub fn menu(&self) -> &Arc<Menu> {
        &self.menu
    }

    #[inline]
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// The clicked slot.
    pub fn slot(&self) -> Slot<'_> {
        Slot::new(&self.menu, self.slot)
    }

    #[inline]
    pub fn slot_index(&self) -> usize {
        self.slot
    }

    #[inline]
    pub fn action(&self) -> InventoryAction {
        self.action
    }

    #[inline]
    pub fn click_type(&self) -> ClickType {
        self.click
    }

    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    #[inline]
    pub fn result(&self) -> ClickResult {
        self.result
    }

    #[inline]
    pub fn set_result(&mut self, result: ClickResult) {
        self.result = result;
    }

    pub fn allow(&mut self) {
        self.result = ClickResult::Allow;
    }

    pub fn deny(&mut self) {
        self.result = ClickResult::Deny;
    }

    /// What the viewer's container holds at the slot before the click.
    pub fn raw_item(&self) -> Option<&ItemStack> {
        self.raw_item.as_ref()
    }

    pub fn cursor(&self) -> Option<&ItemStack> {
        self.cursor.as_ref()
    }

    /// Whether the click puts items into the slot.
    pub fn is_adding_item(&self) -> bool {
        use InventoryAction as A;
        match self.action {
            A::PlaceAll
            | A::PlaceSome
            | A::PlaceOne
            | A::SwapWithCursor
            | A::HotbarSwap
            | A::HotbarMoveAndReadd => true,
            A::MoveToOtherInventory => self.region == Region::Foreign,
            _ => false,
        }
    }

    /// The stack being put into the slot. `None` unless the click adds.
    pub fn adding_item(&self) -> Option<&ItemStack> {
        use InventoryAction as A;
        if !self.is_adding_item() {
            return None;
        }
        if self.adding.is_some() {
            return self.adding.as_ref();
        }
        match self.action {
            A::HotbarSwap | A::HotbarMoveAndReadd => self.hotbar.as_ref(),
            A::MoveToOtherInventory => self.current.as_ref(),
            _ => self.cursor.as_ref(),
        }
    }

    /// How many items the click puts into the slot.
    pub fn adding_item_amount(&self) -> u32 {
        let Some(adding) = self.adding_item() else {
            return 0;
        };
        match self.action {
            InventoryAction::PlaceOne => 1,
            InventoryAction::PlaceSome => {
                let max = self
                    .raw_item
                    .as_ref()
                    .map_or(DEFAULT_MAX_STACK, |raw| raw.max_stack_size);
                max.min(adding.amount)
            }
            _ => adding.amount,
        }
    }

    /// Whether the click takes items out of the slot.
    pub fn is_taking_item(&self) -> bool {
        use InventoryAction as A;
        match self.action {
            A::PickupAll | A::PickupSome | A::PickupHalf | A::PickupOne | A::SwapWithCursor => true,
            A::MoveToOtherInventory | A::HotbarSwap | A::HotbarMoveAndReadd => {
                self.region == Region::Menu
            }
            _ => self.is_dropping_item(),
        }
    }

    /// The stack the click takes from; the slot's current contents. `None`
    /// unless the click takes.
    pub fn taking_item(&self) -> Option<&ItemStack> {
        if !self.is_taking_item() {
            return None;
        }
        self.raw_item.as_ref()
    }

    /// How many items the click takes out of the slot.
    pub fn taking_item_amount(&self) -> u32 {
        let Some(raw) = self.taking_item() else {
            return 0;
        };
        match self.action {
            InventoryAction::PickupOne | InventoryAction::DropOneSlot => 1,
            InventoryAction::PickupHalf => raw.amount.div_ceil(2),
            InventoryAction::PickupSome => raw.max_stack_size,
            _ => raw.amount,
        }
    }

    /// Whether the click drops the slot's items out of the window.
    pub fn is_dropping_item(&self) -> bool {
        matches!(
            self.action,
            InventoryAction::DropAllSlot | InventoryAction::DropOneSlot
        )
    }
}

// ---------------------------------------------------------------------------
// CursorDropInformation
// ---------------------------------------------------------------------------

/// A drop from the cursor as seen by a
/// [`CursorDropHandler`](crate::CursorDropHandler).
///
/// Starts denied; a handler must allow it explicitly.
#[derive(Clone, Debug)]
pub struct CursorDropInformation {
    menu: Arc<Menu>,
    viewer: ViewerId,
    action: InventoryAction,
    click: ClickType,
    cursor: Option<ItemStack>,
    result: ClickResult,
}

impl CursorDropInformation {
    pub(crate) fn new(
        menu: Arc<Menu>,
        viewer: ViewerId,
        action: InventoryAction,
        click: ClickType,
        cursor: Option<ItemStack>,
    ) -> Self {
        Self {
            menu,
            viewer,
            action,
            click,
            cursor,
            result: ClickResult::Deny,
        }
    }

    pub fn menu(&self) -> &Arc<Menu> {
        &self.menu
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
    pub fn click_type(&self) -> ClickType {
        self.click
    }

    /// The stack on the cursor.
    pub fn cursor_item(&self) -> Option<&ItemStack> {
        self.cursor.as_ref()
    }

    /// How many items leave the cursor.
    pub fn item_amount(&self) -> u32 {
        match (&self.cursor, self.action) {
            (None, _) => 0,
            (Some(_), InventoryAction::DropOneCursor) => 1,
            (Some(item), _) => item.amount,
        }
    }

    #[inline]
    pub fn result(&self) -> ClickResult {
        self.result
    }

    #[inline]
    pub fn set_result(&mut self, result: ClickResult) {
        self.result = result;
    }

    pub fn allow(&mut self) {
        self.result = ClickResult::Allow;
    }

    pub fn deny(&mut self) {
        self.result = ClickResult::Deny;
    }
}
