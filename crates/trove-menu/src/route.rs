//! Event routing: from a raw click or drag to slot handlers and back.

use std::sync::Arc;

use trove_core::{
    ClickEvent, ClickResult, Container, DragEvent, InventoryAction, ItemStack, Region, Transfer,
};

use crate::classify::{Route, classify};
use crate::distribute;
use crate::info::{ClickInformation, CursorDropInformation};
use crate::menu::Menu;
use crate::runtime::Runtime;

impl Runtime {
    /// Route a click delivered by the host.
    ///
    /// On return `event.result()` is the outcome the host must enforce. A
    /// click from a viewer with no menu open is left untouched.
    pub fn handle_click(&self, event: &mut ClickEvent) {
        if event.is_suppressed() {
            return;
        }
        let viewer = event.viewer();
        let Some(binding) = self.binding(viewer) else {
            return;
        };
        let menu = binding.menu;
        let container = binding.container;

        if event.action() == InventoryAction::MoveToOtherInventory
            && menu.kind().blocks_shift_transfer()
        {
            log::debug!("{viewer}: shift-transfer refused by {:?}", menu.kind());
            event.suppress();
            return;
        }

        let _events = menu.lock_events();
        let route = classify(event.action(), event.region());
        log::trace!(
            "{viewer}: {:?}/{:?} in {:?} -> {route:?}",
            event.action(),
            event.click(),
            event.region()
        );
        match route {
            Route::Pass => {}
            Route::Reject => event.suppress(),
            Route::CursorDrop => cursor_drop(&menu, event),
            Route::Slot => {
                let Some(slot) = event.slot() else {
                    return;
                };
                if slot >= menu.size() {
                    log::warn!("{viewer}: slot {slot} outside {:?}", menu.title());
                    return;
                }
                let info = ClickInformation::new(
                    Arc::clone(&menu),
                    viewer,
                    slot,
                    event.action(),
                    event.click(),
                    event.region(),
                    event.result(),
                )
                .with_raw_item(container.item(slot))
                .with_items(
                    event.cursor().cloned(),
                    event.current().cloned(),
                    event.hotbar().cloned(),
                );
                let result = dispatch(&menu, info);
                event.set_result(result);
            }
            Route::Distribute => self.distribute(&menu, container.as_ref(), event),
        }
    }

    /// Route a drag delivered by the host.
    ///
    /// Menu cells are visited in ascending index order; the first denied
    /// cell ends the walk and its result is the drag's result.
    pub fn handle_drag(&self, event: &mut DragEvent) {
        let viewer = event.viewer();
        let Some(binding) = self.binding(viewer) else {
            return;
        };
        let menu = binding.menu;
        let container = binding.container;

        let _events = menu.lock_events();
        let click = event.drag_type().click_type();
        let cells: Vec<(usize, ItemStack)> = event
            .new_items()
            .range(..menu.size())
            .map(|(slot, item)| (*slot, item.clone()))
            .collect();

        for (slot, item) in cells {
            let action = if item.amount > 1 {
                InventoryAction::PlaceSome
            } else {
                InventoryAction::PlaceOne
            };
            let info = ClickInformation::new(
                Arc::clone(&menu),
                viewer,
                slot,
                action,
                click,
                Region::Menu,
                event.result(),
            )
            .with_raw_item(container.item(slot))
            .with_adding(Some(item))
            .with_items(event.cursor().cloned(), None, None);
            let result = dispatch(&menu, info);
            event.set_result(result);
            if result == ClickResult::Deny {
                log::debug!("{viewer}: drag denied at slot {slot}");
                break;
            }
        }
    }

    /// Spread the stack being shift-transferred into the menu, dispatching
    /// and applying one share at a time until a share is denied.
    fn distribute(&self, menu: &Arc<Menu>, container: &dyn Container, event: &mut ClickEvent) {
        let viewer = event.viewer();
        let Some(moving) = event.current().cloned() else {
            return;
        };
        let shares = distribute::plan(&container.contents(), &moving);
        if shares.is_empty() {
            log::debug!("{viewer}: no room for {moving}");
            event.set_result(ClickResult::Deny);
            return;
        }

        let mut remaining = moving.amount;
        let mut applied = 0usize;
        for Transfer { slot, amount } in shares {
            let raw = container.item(slot);
            let info = ClickInformation::new(
                Arc::clone(menu),
                viewer,
                slot,
                event.action(),
                event.click(),
                Region::Foreign,
                event.result(),
            )
            .with_raw_item(raw.clone())
            .with_adding(Some(moving.clone().with_amount(amount)))
            .with_items(
                event.cursor().cloned(),
                Some(moving.clone().with_amount(remaining)),
                event.hotbar().cloned(),
            );
            let result = dispatch(menu, info);
            event.set_result(result);
            if result == ClickResult::Deny {
                log::debug!("{viewer}: transfer denied at slot {slot}");
                break;
            }

            let merged = match raw {
                Some(mut stack) if stack.is_similar(&moving) => {
                    stack.amount += amount;
                    stack
                }
                _ => moving.clone().with_amount(amount),
            };
            container.set_item(slot, Some(merged));
            event.push_transfer(Transfer::new(slot, amount));
            remaining -= amount;
            applied += 1;
        }

        event.set_current((remaining > 0).then(|| moving.with_amount(remaining)));
        if applied > 0 {
            if event.result() != ClickResult::Deny {
                event.set_result(ClickResult::Allow);
            }
            self.host().sync(viewer);
        }
    }
}

/// Gate `info` by its slot's policy, run the slot's handler and return the
/// resulting outcome.
fn dispatch(menu: &Menu, mut info: ClickInformation) -> ClickResult {
    let (permitted, handler) = {
        let state = menu.slot_state(info.slot_index()).read();
        (
            state.options.permits(info.action(), info.click_type()),
            state.handler.clone(),
        )
    };
    if !permitted {
        info.deny();
    }
    if let Some(handler) = handler {
        handler(info.viewer(), &mut info);
    }
    log::trace!(
        "{}: slot {} {:?} -> {:?}",
        info.viewer(),
        info.slot_index(),
        info.action(),
        info.result()
    );
    info.result()
}

fn cursor_drop(menu: &Arc<Menu>, event: &mut ClickEvent) {
    let viewer = event.viewer();
    let Some(handler) = menu.cursor_drop_handler() else {
        event.suppress();
        return;
    };
    let mut info = CursorDropInformation::new(
        Arc::clone(menu),
        viewer,
        event.action(),
        event.click(),
        event.cursor().cloned(),
    );
    handler(viewer, &mut info);
    event.set_result(info.result());
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use trove_core::{ClickType, DragType, HeadlessHost, ViewerId};

    use super::*;
    use crate::options::ClickOptions;

    const V: ViewerId = ViewerId(1);

    fn setup() -> (Arc<HeadlessHost>, Arc<Runtime>) {
        let host = Arc::new(HeadlessHost::new());
        let rt = Runtime::new(host.clone());
        (host, rt)
    }

    fn stone(n: u32) -> ItemStack {
        ItemStack::new("stone", n)
    }

    fn counter(menu: &Menu, slot: usize) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        menu.slot(slot).expect("slot").set_click_handler(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        calls
    }

    fn shift_in(amount: u32) -> ClickEvent {
        ClickEvent::new(
            V,
            InventoryAction::MoveToOtherInventory,
            ClickType::ShiftLeft,
            Region::Foreign,
        )
        .at_slot(0)
        .with_current(stone(amount))
    }

    #[test]
    fn shift_click_fills_first_compatible_slot() {
        let (host, rt) = setup();
        let menu = rt.chest(3).expect("rows").build();
        let four = menu.slot(4).expect("slot");
        four.set_click_options(ClickOptions::ALLOW_ALL);
        four.set_item(Some(stone(10)));
        let five = menu.slot(5).expect("slot");
        five.set_click_options(ClickOptions::DENY_ALL);
        five.set_item(Some(stone(10)));
        let five_calls = counter(&menu, 5);
        menu.open(V);

        let mut event = shift_in(20);
        rt.handle_click(&mut event);

        let container = host.open_container_of(V).expect("open");
        assert_eq!(container.item(4).map(|i| i.amount), Some(30));
        assert_eq!(container.item(5).map(|i| i.amount), Some(10));
        assert_eq!(event.result(), ClickResult::Allow);
        assert_eq!(event.transfers(), &[Transfer::new(4, 20)]);
        assert!(event.current().is_none());
        assert_eq!(five_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn distribution_stops_at_first_denied_slot() {
        let (host, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        for i in 0..3 {
            let slot = menu.slot(i).expect("slot");
            slot.set_item(Some(stone(60)));
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        menu.slot(1)
            .expect("slot")
            .set_click_options(ClickOptions::DENY_ALL);
        let calls: Vec<_> = (0..3).map(|i| counter(&menu, i)).collect();
        menu.open(V);

        let mut event = shift_in(10);
        rt.handle_click(&mut event);

        let container = host.open_container_of(V).expect("open");
        assert_eq!(container.item(0).map(|i| i.amount), Some(64));
        assert_eq!(container.item(1).map(|i| i.amount), Some(60));
        assert_eq!(container.item(2).map(|i| i.amount), Some(60));
        let counts: Vec<usize> = calls.iter().map(|c| c.load(Ordering::SeqCst)).collect();
        assert_eq!(counts, vec![1, 1, 0]);
        assert_eq!(event.result(), ClickResult::Deny);
        assert_eq!(event.transfers(), &[Transfer::new(0, 4)]);
        assert_eq!(event.current().map(|i| i.amount), Some(6));
    }

    #[test]
    fn transfer_shares_see_result_of_earlier_share() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        for slot in menu.slots() {
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        menu.slot(0).expect("slot").set_item(Some(stone(60)));
        menu.slot(1).expect("slot").set_item(Some(stone(60)));
        menu.slot(0)
            .expect("slot")
            .set_click_handler(|_, info| info.allow());
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let slot_seen = seen.clone();
        menu.slot(1).expect("slot").set_click_handler(move |_, info| {
            *slot_seen.lock() = Some(info.result());
        });
        menu.open(V);

        let mut event = shift_in(6);
        rt.handle_click(&mut event);

        assert_eq!(*seen.lock(), Some(ClickResult::Allow));
        assert_eq!(event.transfers(), &[Transfer::new(0, 4), Transfer::new(1, 2)]);
        assert_eq!(event.result(), ClickResult::Allow);
    }

    #[test]
    fn full_menu_rejects_transfer() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        for slot in menu.slots() {
            slot.set_item(Some(ItemStack::new("dirt", 64)));
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        menu.open(V);
        let mut event = shift_in(5);
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Deny);
        assert!(event.transfers().is_empty());
        assert_eq!(event.current().map(|i| i.amount), Some(5));
    }

    #[test]
    fn denied_policy_reaches_handler_as_deny() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let slot_seen = seen.clone();
        menu.slot(0).expect("slot").set_click_handler(move |_, info| {
            *slot_seen.lock() = Some(info.result());
        });
        menu.open(V);

        let mut event =
            ClickEvent::new(V, InventoryAction::PickupAll, ClickType::Left, Region::Menu)
                .at_slot(0);
        rt.handle_click(&mut event);
        assert_eq!(*seen.lock(), Some(ClickResult::Deny));
        assert_eq!(event.result(), ClickResult::Deny);
    }

    #[test]
    fn handler_can_override_policy() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        menu.slot(0).expect("slot").set_click_handler(|_, info| info.allow());
        menu.open(V);
        let mut event =
            ClickEvent::new(V, InventoryAction::PickupAll, ClickType::Left, Region::Menu)
                .at_slot(0);
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Allow);
    }

    #[test]
    fn permitted_click_without_handler_keeps_default() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        menu.slot(2)
            .expect("slot")
            .set_click_options(ClickOptions::ALLOW_ALL);
        menu.open(V);
        let mut event = ClickEvent::new(V, InventoryAction::PlaceAll, ClickType::Left, Region::Menu)
            .at_slot(2)
            .with_cursor(stone(3));
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Default);
    }

    #[test]
    fn cursor_drop_without_handler_is_suppressed() {
        let (_, rt) = setup();
        let menu = rt.hopper().build();
        menu.open(V);
        let mut event = ClickEvent::new(
            V,
            InventoryAction::DropAllCursor,
            ClickType::WindowBorderLeft,
            Region::Outside,
        )
        .with_cursor(stone(4));
        rt.handle_click(&mut event);
        assert!(event.is_suppressed());
        assert_eq!(event.result(), ClickResult::Deny);
    }

    #[test]
    fn cursor_drop_handler_must_opt_in() {
        let (_, rt) = setup();
        let menu = rt.hopper().build();
        let amount = Arc::new(AtomicUsize::new(0));
        let seen = amount.clone();
        menu.set_cursor_drop_handler(move |_, info| {
            seen.store(info.item_amount() as usize, Ordering::SeqCst);
        });
        menu.open(V);
        let drop = || {
            ClickEvent::new(
                V,
                InventoryAction::DropAllCursor,
                ClickType::WindowBorderLeft,
                Region::Outside,
            )
            .with_cursor(stone(4))
        };

        let mut event = drop();
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Deny);
        assert_eq!(amount.load(Ordering::SeqCst), 4);

        menu.allow_cursor_dropping();
        let mut event = drop();
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Allow);
    }

    #[test]
    fn collect_to_cursor_never_dispatches() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        for slot in menu.slots() {
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        let calls: Vec<_> = (0..menu.size()).map(|i| counter(&menu, i)).collect();
        menu.open(V);
        for region in Region::ALL {
            let mut event = ClickEvent::new(
                V,
                InventoryAction::CollectToCursor,
                ClickType::DoubleClick,
                region,
            )
            .at_slot(3);
            rt.handle_click(&mut event);
            assert!(event.is_suppressed());
        }
        assert!(calls.iter().all(|c| c.load(Ordering::SeqCst) == 0));
    }

    #[test]
    fn shift_transfer_blocked_for_special_shapes() {
        let (_, rt) = setup();
        let menu = rt.boxed(trove_core::ContainerKind::Workbench).expect("box").build();
        for slot in menu.slots() {
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        let calls = counter(&menu, 0);
        menu.open(V);
        let mut event = shift_in(3);
        rt.handle_click(&mut event);
        assert!(event.is_suppressed());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn foreign_clicks_pass_through() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        menu.open(V);
        let mut event =
            ClickEvent::new(V, InventoryAction::PickupAll, ClickType::Left, Region::Foreign)
                .at_slot(0);
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Default);
        assert!(!event.is_suppressed());
    }

    #[test]
    fn clicks_without_menu_are_ignored() {
        let (_, rt) = setup();
        let mut event = ClickEvent::new(
            V,
            InventoryAction::CollectToCursor,
            ClickType::DoubleClick,
            Region::Menu,
        );
        rt.handle_click(&mut event);
        assert!(!event.is_suppressed());
    }

    #[test]
    fn drag_visits_menu_cells_in_order_and_stops_on_deny() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        for i in 0..menu.size() {
            let slot = menu.slot(i).expect("slot");
            slot.set_click_options(ClickOptions::ALLOW_ALL);
            let order = order.clone();
            slot.set_click_handler(move |_, info| {
                order.lock().push((info.slot_index(), info.action()));
                if info.slot_index() == 6 {
                    info.deny();
                }
            });
        }
        menu.open(V);

        let mut event = DragEvent::new(V, DragType::Even)
            .with_cursor(stone(12))
            .with_cell(8, stone(3))
            .with_cell(2, stone(3))
            .with_cell(6, stone(1))
            .with_cell(30, stone(3));
        rt.handle_drag(&mut event);

        assert_eq!(
            *order.lock(),
            vec![
                (2, InventoryAction::PlaceSome),
                (6, InventoryAction::PlaceOne),
            ]
        );
        assert_eq!(event.result(), ClickResult::Deny);
    }

    #[test]
    fn drag_cells_see_result_of_earlier_cell() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        for slot in menu.slots() {
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        menu.slot(2)
            .expect("slot")
            .set_click_handler(|_, info| info.allow());
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let slot_seen = seen.clone();
        menu.slot(6).expect("slot").set_click_handler(move |_, info| {
            *slot_seen.lock() = Some(info.result());
        });
        menu.open(V);

        let mut event = DragEvent::new(V, DragType::Single)
            .with_cursor(stone(2))
            .with_cell(2, stone(1))
            .with_cell(6, stone(1));
        rt.handle_drag(&mut event);

        assert_eq!(*seen.lock(), Some(ClickResult::Allow));
        assert_eq!(event.result(), ClickResult::Allow);
    }

    #[test]
    fn drag_outside_menu_is_untouched() {
        let (_, rt) = setup();
        let menu = rt.hopper().build();
        menu.open(V);
        let mut event = DragEvent::new(V, DragType::Single).with_cell(7, stone(1));
        rt.handle_drag(&mut event);
        assert_eq!(event.result(), ClickResult::Default);
    }

    #[test]
    fn handler_can_route_nested_event_for_same_menu() {
        let (_, rt) = setup();
        let menu = rt.chest(1).expect("rows").build();
        let inner = Arc::clone(&rt);
        menu.slot(0).expect("slot").set_click_handler(move |viewer, info| {
            let mut nested =
                ClickEvent::new(viewer, InventoryAction::PickupOne, ClickType::Right, Region::Menu)
                    .at_slot(1);
            inner.handle_click(&mut nested);
            info.set_result(nested.result());
        });
        menu.open(V);
        let mut event =
            ClickEvent::new(V, InventoryAction::PickupAll, ClickType::Left, Region::Menu)
                .at_slot(0);
        rt.handle_click(&mut event);
        assert_eq!(event.result(), ClickResult::Deny);
    }
}
