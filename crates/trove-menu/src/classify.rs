//! Mapping of raw `(action, region)` pairs onto routing decisions.

use trove_core::{InventoryAction, Region};

/// What the engine does with a click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Leave the event untouched.
    Pass,
    /// A drop from the cursor: goes to the menu's cursor-drop handler.
    CursorDrop,
    /// Unconditionally denied and suppressed.
    Reject,
    /// Dispatch to the clicked menu slot.
    Slot,
    /// A stack entering the menu from the viewer's own container: split it
    /// over menu slots and dispatch each share.
    Distribute,
}

/// Classify a raw click. Total over every action and region.
pub const fn classify(action: InventoryAction, region: Region) -> Route {
    use InventoryAction as A;
    match action {
        A::Nothing | A::Unknown | A::CloneStack => Route::Pass,
        A::DropAllCursor | A::DropOneCursor => Route::CursorDrop,
        A::CollectToCursor => Route::Reject,
        A::MoveToOtherInventory => match region {
            Region::Menu => Route::Slot,
            Region::Foreign => Route::Distribute,
            Region::Outside => Route::Pass,
        },
        A::PickupAll
        | A::PickupSome
        | A::PickupHalf
        | A::PickupOne
        | A::PlaceAll
        | A::PlaceSome
        | A::PlaceOne
        | A::SwapWithCursor
        | A::DropAllSlot
        | A::DropOneSlot
        | A::HotbarMoveAndReadd
        | A::HotbarSwap => match region {
            Region::Menu => Route::Slot,
            Region::Foreign | Region::Outside => Route::Pass,
        },
    }
}
