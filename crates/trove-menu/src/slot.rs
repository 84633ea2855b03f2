//! Slots: the addressable cells of a [`Menu`].
//!
//! Each slot holds an [`ItemTemplate`], a [`ClickOptions`] policy and an
//! optional click handler. [`Slot`] is a borrowed handle onto one of them;
//! the state itself lives in the menu and is only ever changed through the
//! handle's setters.

use std::fmt;
use std::sync::Arc;

use trove_core::{Container, ItemStack, SlotPos, ViewerId};

use crate::error::MenuError;
use crate::info::{ClickInformation, CursorDropInformation};
use crate::menu::Menu;
use crate::options::ClickOptions;

/// Called when a permitted or denied click reaches a slot. The handler may
/// change the click's result.
pub type ClickHandler = Arc<dyn Fn(ViewerId, &mut ClickInformation) + Send + Sync>;

/// Called after a viewer closes a menu.
pub type CloseHandler = Arc<dyn Fn(ViewerId, &Arc<Menu>) + Send + Sync>;

/// Called when a viewer drops the cursor stack while a menu is open.
pub type CursorDropHandler = Arc<dyn Fn(ViewerId, &mut CursorDropInformation) + Send + Sync>;

// ---------------------------------------------------------------------------
// ItemTemplate
// ---------------------------------------------------------------------------

/// Produces the item a slot shows to a given viewer.
#[derive(Clone)]
pub enum ItemTemplate {
    /// The same item (or nothing) for everybody.
    Static(Option<ItemStack>),
    /// An item computed per viewer.
    Dynamic(Arc<dyn Fn(ViewerId) -> Option<ItemStack> + Send + Sync>),
}

impl ItemTemplate {
    /// A template that always shows `item`.
    pub fn fixed(item: ItemStack) -> Self {
        Self::Static(Some(item))
    }

    /// A template that shows nothing.
    pub const fn empty() -> Self {
        Self::Static(None)
    }

    /// A template computed from the viewer.
    pub fn per_viewer<F>(f: F) -> Self
    where
        F: Fn(ViewerId) -> Option<ItemStack> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Render the template for `viewer`.
    pub fn render(&self, viewer: ViewerId) -> Option<ItemStack> {
        match self {
            Self::Static(item) => item.clone(),
            Self::Dynamic(f) => f(viewer),
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<ItemStack> for ItemTemplate {
    fn from(item: ItemStack) -> Self {
        Self::fixed(item)
    }
}

impl From<Option<ItemStack>> for ItemTemplate {
    fn from(item: Option<ItemStack>) -> Self {
        Self::Static(item)
    }
}

impl fmt::Debug for ItemTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(item) => f.debug_tuple("Static").field(item).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// SlotState
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct SlotState {
    pub(crate) template: ItemTemplate,
    pub(crate) options: ClickOptions,
    pub(crate) handler: Option<ClickHandler>,
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// A handle onto one slot of a [`Menu`].
#[derive(Clone, Copy)]
pub struct Slot<'a> {
    menu: &'a Menu,
    index: usize,
}

impl<'a> Slot<'a> {
    /// `index` must be below the menu's slot count.
    pub(crate) fn new(menu: &'a Menu, index: usize) -> Self {
        Self { menu, index }
    }

    /// Flat 0-based index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based `(row, column)` position.
    pub fn position(&self) -> SlotPos {
        let columns = self.menu.dimension().columns.max(1) as usize;
        SlotPos::new(
            (self.index / columns) as u32 + 1,
            (self.index % columns) as u32 + 1,
        )
    }

    /// The owning menu.
    pub fn menu(&self) -> &'a Menu {
        self.menu
    }

    pub fn click_options(&self) -> ClickOptions {
        self.menu.slot_state(self.index).read().options.clone()
    }

    pub fn set_click_options(&self, options: ClickOptions) {
        self.menu.slot_state(self.index).write().options = options;
    }

    pub fn item_template(&self) -> ItemTemplate {
        self.menu.slot_state(self.index).read().template.clone()
    }

    /// The slot's item, when it does not depend on the viewer.
    pub fn item(&self) -> Result<Option<ItemStack>, MenuError> {
        match &self.menu.slot_state(self.index).read().template {
            ItemTemplate::Static(item) => Ok(item.clone()),
            ItemTemplate::Dynamic(_) => Err(MenuError::DynamicTemplate),
        }
    }

    /// The slot's item as rendered for `viewer`.
    pub fn item_for(&self, viewer: ViewerId) -> Option<ItemStack> {
        let template = self.item_template();
        template.render(viewer)
    }

    /// Show the same `item` to everybody.
    pub fn set_item(&self, item: Option<ItemStack>) {
        self.set_item_template(ItemTemplate::Static(item));
    }

    /// Replace the template and push the result to every current viewer.
    pub fn set_item_template(&self, template: ItemTemplate) {
        self.menu.slot_state(self.index).write().template = template.clone();
        for (viewer, container) in self.menu.viewer_containers() {
            container.set_item(self.index, template.render(viewer));
        }
    }

    /// What `viewer`'s container actually holds at this slot right now.
    pub fn raw_item(&self, viewer: ViewerId) -> Result<Option<ItemStack>, MenuError> {
        let container = self.menu.container_of(viewer)?;
        Ok(container.item(self.index))
    }

    /// Overwrite `viewer`'s container at this slot without touching the
    /// template.
    pub fn set_raw_item(&self, viewer: ViewerId, item: Option<ItemStack>) -> Result<(), MenuError> {
        let container = self.menu.container_of(viewer)?;
        container.set_item(self.index, item);
        Ok(())
    }

    pub fn click_handler(&self) -> Option<ClickHandler> {
        self.menu.slot_state(self.index).read().handler.clone()
    }

    pub fn set_click_handler<F>(&self, handler: F)
    where
        F: Fn(ViewerId, &mut ClickInformation) + Send + Sync + 'static,
    {
        self.menu.slot_state(self.index).write().handler = Some(Arc::new(handler));
    }

    /// Install an already shared handler.
    pub fn set_shared_click_handler(&self, handler: ClickHandler) {
        self.menu.slot_state(self.index).write().handler = Some(handler);
    }

    pub fn clear_click_handler(&self) {
        self.menu.slot_state(self.index).write().handler = None;
    }

    /// Snapshot of this slot's template, policy and handler.
    pub fn settings(&self) -> SlotSettings {
        let state = self.menu.slot_state(self.index).read();
        SlotSettings {
            click_options: Some(state.options.clone()),
            click_handler: state.handler.clone(),
            item_template: Some(state.template.clone()),
        }
    }

    /// Apply `settings`. The template and handler are always replaced; the
    /// policy only when the settings carry one.
    pub fn apply_settings(&self, settings: &SlotSettings) {
        {
            let mut state = self.menu.slot_state(self.index).write();
            state.handler = settings.click_handler.clone();
            if let Some(options) = &settings.click_options {
                state.options = options.clone();
            }
        }
        self.set_item_template(settings.item_template.clone().unwrap_or_default());
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("index", &self.index)
            .field("position", &self.position())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SlotSettings
// ---------------------------------------------------------------------------

/// A bundle of slot state applied in bulk by masks and pagination.
#[derive(Clone, Default)]
pub struct SlotSettings {
    click_options: Option<ClickOptions>,
    click_handler: Option<ClickHandler>,
    item_template: Option<ItemTemplate>,
}

impl SlotSettings {
    pub fn builder() -> SlotSettingsBuilder {
        SlotSettingsBuilder::default()
    }

    /// Settings that only set a template.
    pub fn from_template(template: impl Into<ItemTemplate>) -> Self {
        Self {
            item_template: Some(template.into()),
            ..Self::default()
        }
    }

    pub fn click_options(&self) -> Option<&ClickOptions> {
        self.click_options.as_ref()
    }

    pub fn click_handler(&self) -> Option<&ClickHandler> {
        self.click_handler.as_ref()
    }

    pub fn item_template(&self) -> Option<&ItemTemplate> {
        self.item_template.as_ref()
    }
}

impl fmt::Debug for SlotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotSettings")
            .field("click_options", &self.click_options)
            .field("click_handler", &self.click_handler.as_ref().map(|_| ".."))
            .field("item_template", &self.item_template)
            .finish()
    }
}

/// Builder for [`SlotSettings`].
#[derive(Clone, Default)]
pub struct SlotSettingsBuilder {
    inner: SlotSettings,
}

impl SlotSettingsBuilder {
    pub fn click_options(mut self, options: ClickOptions) -> Self {
        self.inner.click_options = Some(options);
        self
    }

    pub fn click_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(ViewerId, &mut ClickInformation) + Send + Sync + 'static,
    {
        self.inner.click_handler = Some(Arc::new(handler));
        self
    }

    /// Use an already shared handler.
    pub fn shared_click_handler(mut self, handler: ClickHandler) -> Self {
        self.inner.click_handler = Some(handler);
        self
    }

    pub fn item_template(mut self, template: impl Into<ItemTemplate>) -> Self {
        self.inner.item_template = Some(template.into());
        self
    }

    pub fn build(self) -> SlotSettings {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use trove_core::HeadlessHost;

    fn runtime() -> Arc<Runtime> {
        Runtime::new(Arc::new(HeadlessHost::new()))
    }

    #[test]
    fn dynamic_template_has_no_shared_item() {
        let menu = runtime().chest(1).expect("rows").build();
        let slot = menu.slot(0).expect("slot");
        slot.set_item_template(ItemTemplate::per_viewer(|v| {
            Some(ItemStack::new("paper", v.0 as u32))
        }));
        assert_eq!(slot.item(), Err(MenuError::DynamicTemplate));
        assert_eq!(slot.item_for(ViewerId(3)).map(|i| i.amount), Some(3));
    }

    #[test]
    fn set_item_reaches_open_viewers() {
        let menu = runtime().chest(1).expect("rows").build();
        menu.open(ViewerId(1));
        let slot = menu.slot(2).expect("slot");
        slot.set_item(Some(ItemStack::one("diamond")));
        assert_eq!(
            slot.raw_item(ViewerId(1)).expect("open").map(|i| i.material),
            Some("diamond".to_string())
        );
        assert_eq!(
            slot.raw_item(ViewerId(2)),
            Err(MenuError::NotOpen {
                viewer: ViewerId(2)
            })
        );
    }

    #[test]
    fn raw_writes_leave_template_alone() {
        let menu = runtime().hopper().build();
        menu.open(ViewerId(1));
        let slot = menu.slot(0).expect("slot");
        slot.set_raw_item(ViewerId(1), Some(ItemStack::one("stick")))
            .expect("open");
        assert_eq!(slot.item(), Ok(None));
        assert!(slot.raw_item(ViewerId(1)).expect("open").is_some());
    }

    #[test]
    fn apply_keeps_policy_when_settings_have_none() {
        let menu = runtime().hopper().build();
        let slot = menu.slot(1).expect("slot");
        slot.set_click_options(ClickOptions::ALLOW_ALL);
        slot.set_click_handler(|_, info| info.deny());

        slot.apply_settings(&SlotSettings::from_template(ItemStack::one("glass")));
        assert_eq!(slot.click_options(), ClickOptions::ALLOW_ALL);
        assert!(slot.click_handler().is_none());
        assert_eq!(slot.item().expect("static").map(|i| i.material), Some("glass".into()));

        let settings = SlotSettings::builder()
            .click_options(ClickOptions::DENY_ALL)
            .build();
        slot.apply_settings(&settings);
        assert_eq!(slot.click_options(), ClickOptions::DENY_ALL);
        assert_eq!(slot.item(), Ok(None));
    }

    #[test]
    fn position_is_one_based() {
        let menu = runtime().chest(3).expect("rows").build();
        let slot = menu.slot(16).expect("slot");
        assert_eq!(slot.position(), SlotPos::new(2, 8));
        assert_eq!(menu.slot_at(2, 8).map(|s| s.index()), Some(16));
    }
}
