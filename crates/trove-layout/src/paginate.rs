//! Paginated menus.
//!
//! Both builders stamp pages out of one [`MenuBuilder`], fill item slots
//! from masks, and link neighbouring pages through their previous/next
//! buttons. A button on the first or last page shows its "empty" icon and
//! does nothing. Links hold weak references, so dropping the pages drops
//! the whole chain.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Weak};

use trove_core::ViewerId;
use trove_menu::{ClickHandler, ClickInformation, ItemTemplate, Menu, MenuBuilder, SlotSettings};

use crate::error::LayoutError;
use crate::mask::Mask;

type PageModifier = Arc<dyn Fn(&Menu) + Send + Sync>;

// ---------------------------------------------------------------------------
// Shared page controls
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct PageControls {
    page_builder: MenuBuilder,
    modifier: Option<PageModifier>,
    previous_slot: Option<usize>,
    next_slot: Option<usize>,
    previous_icon: ItemTemplate,
    previous_empty: ItemTemplate,
    next_icon: ItemTemplate,
    next_empty: ItemTemplate,
}

impl PageControls {
    fn new(page_builder: MenuBuilder) -> Self {
        Self {
            page_builder,
            modifier: None,
            previous_slot: None,
            next_slot: None,
            previous_icon: ItemTemplate::empty(),
            previous_empty: ItemTemplate::empty(),
            next_icon: ItemTemplate::empty(),
            next_empty: ItemTemplate::empty(),
        }
    }

    /// A fresh page with both buttons showing their empty icons.
    fn new_page(&self) -> Arc<Menu> {
        let page = self.page_builder.build();
        if let Some(modifier) = &self.modifier {
            modifier(&page);
        }
        set_button(&page, self.previous_slot, &self.previous_empty, None);
        set_button(&page, self.next_slot, &self.next_empty, None);
        page
    }

    fn link_pages(&self, pages: &[Arc<Menu>]) {
        for pair in pages.windows(2) {
            let (previous, page) = (&pair[0], &pair[1]);
            set_button(
                previous,
                self.next_slot,
                &self.next_icon,
                Some(open_on_click(Arc::downgrade(page))),
            );
            set_button(
                page,
                self.previous_slot,
                &self.previous_icon,
                Some(open_on_click(Arc::downgrade(previous))),
            );
        }
    }
}

fn set_button(
    page: &Menu,
    slot: Option<usize>,
    icon: &ItemTemplate,
    handler: Option<ClickHandler>,
) {
    let Some(slot) = slot.and_then(|index| page.slot(index)) else {
        return;
    };
    slot.set_item_template(icon.clone());
    match handler {
        Some(handler) => slot.set_shared_click_handler(handler),
        None => slot.clear_click_handler(),
    }
}

fn open_on_click(target: Weak<Menu>) -> ClickHandler {
    Arc::new(move |viewer: ViewerId, _: &mut ClickInformation| {
        if let Some(page) = target.upgrade() {
            page.open(viewer);
        }
    })
}

/// Shared builder surface of the two paginated builders.
macro_rules! page_control_setters {
    () => {
        /// Run `modifier` on every page right after it is built.
        pub fn new_menu_modifier<F>(mut self, modifier: F) -> Self
        where
            F: Fn(&Menu) + Send + Sync + 'static,
        {
            self.controls.modifier = Some(Arc::new(modifier));
            self
        }

        pub fn previous_button_slot(mut self, index: usize) -> Self {
            self.controls.previous_slot = Some(index);
            self
        }

        pub fn next_button_slot(mut self, index: usize) -> Self {
            self.controls.next_slot = Some(index);
            self
        }

        /// Use the first slot of `mask` as the previous button.
        pub fn previous_button_mask(mut self, mask: &dyn Mask) -> Self {
            self.controls.previous_slot = mask.slots().first().copied();
            self
        }

        /// Use the first slot of `mask` as the next button.
        pub fn next_button_mask(mut self, mask: &dyn Mask) -> Self {
            self.controls.next_slot = mask.slots().first().copied();
            self
        }

        pub fn previous_button(mut self, icon: impl Into<ItemTemplate>) -> Self {
            self.controls.previous_icon = icon.into();
            self
        }

        /// Icon of the previous button on the first page.
        pub fn previous_button_empty(mut self, icon: impl Into<ItemTemplate>) -> Self {
            self.controls.previous_empty = icon.into();
            self
        }

        pub fn next_button(mut self, icon: impl Into<ItemTemplate>) -> Self {
            self.controls.next_icon = icon.into();
            self
        }

        /// Icon of the next button on the last page.
        pub fn next_button_empty(mut self, icon: impl Into<ItemTemplate>) -> Self {
            self.controls.next_empty = icon.into();
            self
        }
    };
}

// ---------------------------------------------------------------------------
// PaginatedMenuBuilder
// ---------------------------------------------------------------------------

/// Spreads one list of items over as many pages as it takes.
#[derive(Clone)]
pub struct PaginatedMenuBuilder {
    controls: PageControls,
    slots: Vec<usize>,
    items: Vec<SlotSettings>,
}

impl PaginatedMenuBuilder {
    pub fn new(page_builder: MenuBuilder) -> Self {
        Self {
            controls: PageControls::new(page_builder),
            slots: Vec::new(),
            items: Vec::new(),
        }
    }

    page_control_setters!();

    /// Item slots of each page, taken from `mask`.
    pub fn slots(mut self, mask: &dyn Mask) -> Self {
        self.slots = mask.slots();
        self
    }

    pub fn add_item(mut self, item: impl Into<ItemTemplate>) -> Self {
        self.items.push(SlotSettings::from_template(item));
        self
    }

    pub fn add_slot_settings(mut self, settings: SlotSettings) -> Self {
        self.items.push(settings);
        self
    }

    pub fn add_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemTemplate>,
    {
        self.items
            .extend(items.into_iter().map(SlotSettings::from_template));
        self
    }

    /// Build the pages. There is always at least one.
    pub fn build(&self) -> Result<Vec<Arc<Menu>>, LayoutError> {
        let mut items: VecDeque<SlotSettings> = self.items.iter().cloned().collect();
        let mut pages = Vec::new();
        loop {
            let page = self.controls.new_page();
            let mut placed = 0usize;
            for slot in self.slots.iter().filter_map(|&i| page.slot(i)) {
                let Some(item) = items.pop_front() else {
                    break;
                };
                slot.apply_settings(&item);
                placed += 1;
            }
            pages.push(page);
            if items.is_empty() {
                break;
            }
            if placed == 0 {
                return Err(LayoutError::NoItemSlots);
            }
        }
        self.controls.link_pages(&pages);
        log::debug!("paginated {} items over {} pages", self.items.len(), pages.len());
        Ok(pages)
    }
}

impl fmt::Debug for PaginatedMenuBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedMenuBuilder")
            .field("page_builder", &self.controls.page_builder)
            .field("slots", &self.slots)
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// MultiSectionPaginatedMenuBuilder
// ---------------------------------------------------------------------------

/// Like [`PaginatedMenuBuilder`], with several independent item lists, each
/// filling its own section of the page. Pages keep coming until every
/// section is exhausted.
#[derive(Clone)]
pub struct MultiSectionPaginatedMenuBuilder {
    controls: PageControls,
    sections: BTreeMap<char, Vec<usize>>,
    items: BTreeMap<char, Vec<SlotSettings>>,
}

impl MultiSectionPaginatedMenuBuilder {
    pub fn new(page_builder: MenuBuilder) -> Self {
        Self {
            controls: PageControls::new(page_builder),
            sections: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    page_control_setters!();

    /// Slots of section `key`, taken from `mask`.
    pub fn slots(mut self, key: char, mask: &dyn Mask) -> Self {
        self.sections.insert(key, mask.slots());
        self
    }

    pub fn add_item(mut self, key: char, item: impl Into<ItemTemplate>) -> Self {
        self.items
            .entry(key)
            .or_default()
            .push(SlotSettings::from_template(item));
        self
    }

    pub fn add_slot_settings(mut self, key: char, settings: SlotSettings) -> Self {
        self.items.entry(key).or_default().push(settings);
        self
    }

    pub fn add_items<I, T>(mut self, key: char, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemTemplate>,
    {
        self.items
            .entry(key)
            .or_default()
            .extend(items.into_iter().map(SlotSettings::from_template));
        self
    }

    pub fn build(&self) -> Result<Vec<Arc<Menu>>, LayoutError> {
        let mut queues: Vec<(&[usize], VecDeque<SlotSettings>)> = Vec::new();
        for (key, items) in &self.items {
            if items.is_empty() {
                continue;
            }
            let slots = self
                .sections
                .get(key)
                .ok_or(LayoutError::UnknownSection(*key))?;
            queues.push((slots.as_slice(), items.iter().cloned().collect()));
        }

        let mut pages = Vec::new();
        loop {
            let page = self.controls.new_page();
            let mut placed = 0usize;
            for (slots, items) in &mut queues {
                for slot in slots.iter().filter_map(|&i| page.slot(i)) {
                    let Some(item) = items.pop_front() else {
                        break;
                    };
                    slot.apply_settings(&item);
                    placed += 1;
                }
            }
            pages.push(page);
            if queues.iter().all(|(_, items)| items.is_empty()) {
                break;
            }
            if placed == 0 {
                return Err(LayoutError::NoItemSlots);
            }
        }
        self.controls.link_pages(&pages);
        log::debug!("paginated {} sections over {} pages", queues.len(), pages.len());
        Ok(pages)
    }
}

impl fmt::Debug for MultiSectionPaginatedMenuBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSectionPaginatedMenuBuilder")
            .field("page_builder", &self.controls.page_builder)
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}
