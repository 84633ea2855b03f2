//! Scripted headless session through the demo menus.
//!
//! Run: RUST_LOG=debug cargo run --bin showcase

use trove_core::{
    ClickEvent, ClickType, DragEvent, DragType, InventoryAction, ItemStack, Region, ViewerId,
};
use trove_demos::{DEBUG_SLOT, NEXT_SLOT, SHOP_SLOT, Showcase};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let demo = match Showcase::new() {
        Ok(demo) => demo,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let viewer = ViewerId(1);
    let index = |(row, column): (u32, u32)| {
        demo.base
            .dimension()
            .index_of(row, column)
            .unwrap_or_default()
    };

    demo.base.open(viewer);

    let mut click =
        ClickEvent::new(viewer, InventoryAction::PickupHalf, ClickType::Right, Region::Menu)
            .at_slot(index(DEBUG_SLOT))
            .with_current(ItemStack::one("command_block"));
    demo.runtime.handle_click(&mut click);
    log::info!("debug slot pickup -> {:?}", click.result());

    let mut shop =
        ClickEvent::new(viewer, InventoryAction::PickupAll, ClickType::Left, Region::Menu)
            .at_slot(index(SHOP_SLOT));
    demo.runtime.handle_click(&mut shop);
    if let Some(first) = demo.shop.first() {
        log::info!("shop open: {}", first.is_open(viewer));
    }
    let mut next_page =
        ClickEvent::new(viewer, InventoryAction::PickupAll, ClickType::Left, Region::Menu)
            .at_slot(26);
    demo.runtime.handle_click(&mut next_page);
    if let Some(second) = demo.shop.get(1) {
        log::info!("shop page 2 open: {}", second.is_open(viewer));
    }

    demo.base.open(viewer);
    let mut next =
        ClickEvent::new(viewer, InventoryAction::PickupAll, ClickType::Left, Region::Menu)
            .at_slot(index(NEXT_SLOT));
    demo.runtime.handle_click(&mut next);
    log::info!("movable menu open: {}", demo.movable.is_open(viewer));

    let mut shift = ClickEvent::new(
        viewer,
        InventoryAction::MoveToOtherInventory,
        ClickType::ShiftLeft,
        Region::Foreign,
    )
    .at_slot(0)
    .with_current(ItemStack::new("stone", 80));
    demo.runtime.handle_click(&mut shift);
    log::info!(
        "shift-click 80 stone -> {:?}, moved {:?}, left {:?}",
        shift.result(),
        shift.transfers(),
        shift.current().map(|i| i.amount)
    );

    let mut drag = DragEvent::new(viewer, DragType::Even)
        .with_cursor(ItemStack::new("dirt", 6))
        .with_cell(10, ItemStack::new("dirt", 3))
        .with_cell(11, ItemStack::new("dirt", 3));
    demo.runtime.handle_drag(&mut drag);
    log::info!("drag -> {:?}", drag.result());

    let mut drop = ClickEvent::new(
        viewer,
        InventoryAction::DropAllCursor,
        ClickType::WindowBorderLeft,
        Region::Outside,
    )
    .with_cursor(ItemStack::new("dirt", 6));
    demo.runtime.handle_click(&mut drop);
    log::info!("cursor drop -> {:?}", drop.result());

    demo.runtime.handle_close(viewer);
    if let Some(parent) = demo.movable.parent() {
        parent.open(viewer);
    }
    if let Err(e) = demo.movable.update(viewer) {
        log::info!("update after leaving: {e}");
    }

    log::info!("host calls: {:?}", demo.host.stats());
}
