//! Shared menus for the demos.
//!
//! Demonstrates: a bordered base menu built from a mask, per-viewer item
//! templates, a debug slot that logs every click, navigation to a child
//! menu of freely movable items, and a paginated shop.

use std::error::Error;
use std::sync::Arc;

use trove_core::{HeadlessHost, ItemStack, ViewerId};
use trove_layout::{BinaryMask, Mask, PaginatedMenuBuilder};
use trove_menu::{ClickOptions, ItemTemplate, Menu, Runtime};

/// Where the base menu keeps its interactive slots, as 1-based positions.
pub const NAME_SLOT: (u32, u32) = (2, 2);
pub const LEVEL_SLOT: (u32, u32) = (2, 3);
pub const SHOP_SLOT: (u32, u32) = (2, 4);
pub const DEBUG_SLOT: (u32, u32) = (2, 5);
pub const NEXT_SLOT: (u32, u32) = (2, 8);

/// Stand-in for a player profile lookup.
pub fn viewer_name(viewer: ViewerId) -> String {
    format!("Viewer #{}", viewer.0)
}

/// Stand-in for a player level lookup.
pub fn viewer_level(viewer: ViewerId) -> u32 {
    (viewer.0 % 30) as u32 + 1
}

/// Every menu of the demo, wired together.
pub struct Showcase {
    pub host: Arc<HeadlessHost>,
    pub runtime: Arc<Runtime>,
    pub base: Arc<Menu>,
    pub movable: Arc<Menu>,
    pub shop: Vec<Arc<Menu>>,
}

impl Showcase {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let host = Arc::new(HeadlessHost::new());
        let runtime = Runtime::new(host.clone());

        let base = runtime.chest(3)?.title("Base Menu").build();
        let border = BinaryMask::for_menu(&base)
            .item(ItemStack::one("gray_stained_glass_pane").with_name(" "))
            .pattern("111111111")
            .pattern("100000001")
            .pattern("111111111")
            .build()?;
        border.apply(&base);

        let movable = runtime
            .chest(3)?
            .title("Movable Items")
            .parent(base.clone())
            .build();
        for slot in movable.slots() {
            slot.set_click_options(ClickOptions::ALLOW_ALL);
        }
        movable.allow_cursor_dropping();
        movable.set_close_handler(|viewer, menu| {
            log::info!("{viewer} closed {:?}", menu.title());
        });

        let shop = shop_pages(&runtime, &base)?;

        install_base_slots(&base, &movable, &shop);

        Ok(Self {
            host,
            runtime,
            base,
            movable,
            shop,
        })
    }
}

fn install_base_slots(base: &Arc<Menu>, movable: &Arc<Menu>, shop: &[Arc<Menu>]) {
    if let Some(name) = base.slot_at(NAME_SLOT.0, NAME_SLOT.1) {
        name.set_item_template(ItemTemplate::per_viewer(|viewer| {
            Some(ItemStack::one("name_tag").with_name(viewer_name(viewer)))
        }));
    }

    if let Some(level) = base.slot_at(LEVEL_SLOT.0, LEVEL_SLOT.1) {
        level.set_item_template(ItemTemplate::per_viewer(|viewer| {
            let level = viewer_level(viewer);
            Some(
                ItemStack::new("experience_bottle", level)
                    .with_name(format!("Level {level}")),
            )
        }));
    }

    if let Some(debug) = base.slot_at(DEBUG_SLOT.0, DEBUG_SLOT.1) {
        debug.set_item(Some(ItemStack::one("command_block").with_name("Debug")));
        debug.set_click_options(ClickOptions::ALLOW_ALL);
        debug.set_click_handler(|viewer, info| {
            log::info!(
                "{viewer} debug click: {:?}/{:?} adding={} ({}) taking={} ({})",
                info.action(),
                info.click_type(),
                info.is_adding_item(),
                info.adding_item_amount(),
                info.is_taking_item(),
                info.taking_item_amount(),
            );
        });
    }

    if let Some(next) = base.slot_at(NEXT_SLOT.0, NEXT_SLOT.1) {
        next.set_item(Some(ItemStack::one("arrow").with_name("Next Menu")));
        let target = Arc::downgrade(movable);
        next.set_click_handler(move |viewer, _| {
            if let Some(menu) = target.upgrade() {
                menu.open(viewer);
            }
        });
    }

    if let (Some(button), Some(first)) = (base.slot_at(SHOP_SLOT.0, SHOP_SLOT.1), shop.first()) {
        button.set_item(Some(ItemStack::one("emerald").with_name("Shop")));
        let target = Arc::downgrade(first);
        button.set_click_handler(move |viewer, _| {
            if let Some(page) = target.upgrade() {
                page.open(viewer);
            }
        });
    }
}

fn shop_pages(runtime: &Arc<Runtime>, base: &Arc<Menu>) -> Result<Vec<Arc<Menu>>, Box<dyn Error>> {
    let page = runtime.chest(3)?.title("Shop").parent(base.clone());
    let goods = BinaryMask::builder(page.dimension())
        .pattern("011111110")
        .pattern("011111110")
        .build()?;
    let wares = ["apple", "bread", "carrot", "potato", "melon", "cookie", "cake"];
    let pages = PaginatedMenuBuilder::new(page)
        .slots(&goods)
        .previous_button_slot(18)
        .next_button_slot(26)
        .previous_button(ItemStack::one("arrow").with_name("Previous"))
        .next_button(ItemStack::one("arrow").with_name("Next"))
        .previous_button_empty(ItemStack::one("barrier"))
        .next_button_empty(ItemStack::one("barrier"))
        .add_items(
            (0..24u32).map(|i| ItemStack::new(wares[i as usize % wares.len()], i % 16 + 1)),
        )
        .build()?;
    Ok(pages)
}
