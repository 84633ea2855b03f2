//! Menus and their per-viewer lifecycle.
//!
//! A viewer is bound to at most one menu at a time through the
//! [`Runtime`]'s binding map. Opening a menu while another is open first
//! releases the old binding without running its close handler. When both
//! menus redraw and share a shape, the viewer's container is reused and only
//! retitled; otherwise it is closed and a new one opened.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard, RwLock};
use trove_core::{Container, ContainerKind, Dimension, ViewerId};

use crate::error::MenuError;
use crate::info::CursorDropInformation;
use crate::runtime::{Binding, Runtime};
use crate::slot::{CloseHandler, CursorDropHandler, Slot, SlotState};

// ---------------------------------------------------------------------------
// MenuBuilder
// ---------------------------------------------------------------------------

/// Configuration for a [`Menu`]. Cloneable so one builder can stamp out
/// several menus of the same shape.
#[derive(Clone)]
pub struct MenuBuilder {
    runtime: Arc<Runtime>,
    kind: ContainerKind,
    title: Option<String>,
    parent: Option<Arc<Menu>>,
    redraw: bool,
}

impl MenuBuilder {
    /// A chest menu of `rows` rows (1 to 6) by nine columns.
    pub fn chest(runtime: Arc<Runtime>, rows: u32) -> Result<Self, MenuError> {
        if !(1..=6).contains(&rows) {
            return Err(MenuError::InvalidRows(rows));
        }
        Ok(Self::of_kind(runtime, ContainerKind::Chest { rows }))
    }

    /// A 1×5 hopper menu.
    pub fn hopper(runtime: Arc<Runtime>) -> Self {
        Self::of_kind(runtime, ContainerKind::Hopper)
    }

    /// A 3×3 menu backed by `kind`, which must be one of the box kinds.
    pub fn boxed(runtime: Arc<Runtime>, kind: ContainerKind) -> Result<Self, MenuError> {
        if !kind.is_box() {
            return Err(MenuError::NotBoxShaped);
        }
        Ok(Self::of_kind(runtime, kind))
    }

    fn of_kind(runtime: Arc<Runtime>, kind: ContainerKind) -> Self {
        Self {
            runtime,
            kind,
            title: None,
            parent: None,
            redraw: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn parent(mut self, parent: Arc<Menu>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Reuse the viewer's container when switching between redraw menus of
    /// the same shape.
    pub fn redraw(mut self, redraw: bool) -> Self {
        self.redraw = redraw;
        self
    }

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.kind.dimension()
    }

    #[inline]
    pub fn is_redraw(&self) -> bool {
        self.redraw
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    pub fn build(&self) -> Arc<Menu> {
        let size = self.kind.dimension().area();
        let menu = Menu {
            runtime: Arc::clone(&self.runtime),
            kind: self.kind,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| self.kind.default_title().to_string()),
            parent: self.parent.clone(),
            redraw: self.redraw,
            slots: (0..size).map(|_| RwLock::new(SlotState::default())).collect(),
            close_handler: RwLock::new(None),
            cursor_drop_handler: RwLock::new(None),
            viewers: Mutex::new(HashMap::new()),
            events: ReentrantMutex::new(()),
        };
        log::trace!("built {} menu {:?}", self.kind.dimension(), menu.title);
        Arc::new(menu)
    }
}

impl fmt::Debug for MenuBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuBuilder")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("redraw", &self.redraw)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// A titled grid of slots shown to any number of viewers.
///
/// Dimensions are fixed at construction. Slots are created eagerly and live
/// as long as the menu.
pub struct Menu {
    runtime: Arc<Runtime>,
    kind: ContainerKind,
    title: String,
    parent: Option<Arc<Menu>>,
    redraw: bool,
    slots: Vec<RwLock<SlotState>>,
    close_handler: RwLock<Option<CloseHandler>>,
    cursor_drop_handler: RwLock<Option<CursorDropHandler>>,
    viewers: Mutex<HashMap<ViewerId, Arc<dyn Container>>>,
    events: ReentrantMutex<()>,
}

impl Menu {
    // -- geometry --

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.kind.dimension()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The menu this one was opened from, if any.
    pub fn parent(&self) -> Option<&Arc<Menu>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn is_redraw(&self) -> bool {
        self.redraw
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    // -- slots --

    /// Number of slots.
    #[inline]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<Slot<'_>> {
        (index < self.slots.len()).then(|| Slot::new(self, index))
    }

    /// The slot at a 1-based `(row, column)`.
    pub fn slot_at(&self, row: u32, column: u32) -> Option<Slot<'_>> {
        let index = self.dimension().index_of(row, column)?;
        self.slot(index)
    }

    /// Every slot in index order.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = Slot<'_>> + '_ {
        (0..self.slots.len()).map(move |i| Slot::new(self, i))
    }

    /// Empty every slot's item. Click options and handlers are kept.
    pub fn clear(&self) {
        for slot in self.slots() {
            slot.set_item(None);
        }
    }

    pub fn clear_slot(&self, index: usize) {
        if let Some(slot) = self.slot(index) {
            slot.set_item(None);
        }
    }

    pub(crate) fn slot_state(&self, index: usize) -> &RwLock<SlotState> {
        &self.slots[index]
    }

    // -- handlers --

    pub fn close_handler(&self) -> Option<CloseHandler> {
        self.close_handler.read().clone()
    }

    pub fn set_close_handler<F>(&self, handler: F)
    where
        F: Fn(ViewerId, &Arc<Menu>) + Send + Sync + 'static,
    {
        *self.close_handler.write() = Some(Arc::new(handler));
    }

    pub fn clear_close_handler(&self) {
        *self.close_handler.write() = None;
    }

    pub fn cursor_drop_handler(&self) -> Option<CursorDropHandler> {
        self.cursor_drop_handler.read().clone()
    }

    pub fn set_cursor_drop_handler<F>(&self, handler: F)
    where
        F: Fn(ViewerId, &mut CursorDropInformation) + Send + Sync + 'static,
    {
        *self.cursor_drop_handler.write() = Some(Arc::new(handler));
    }

    pub fn clear_cursor_drop_handler(&self) {
        *self.cursor_drop_handler.write() = None;
    }

    /// Install a cursor-drop handler that allows every drop.
    pub fn allow_cursor_dropping(&self) {
        self.set_cursor_drop_handler(|_, info| info.allow());
    }

    // -- viewers --

    /// Viewers currently looking at this menu.
    pub fn viewers(&self) -> Vec<ViewerId> {
        let mut viewers: Vec<ViewerId> = self.viewers.lock().keys().copied().collect();
        viewers.sort_unstable();
        viewers
    }

    /// Whether `viewer` is currently bound to this menu.
    pub fn is_open(&self, viewer: ViewerId) -> bool {
        self.runtime
            .binding(viewer)
            .is_some_and(|b| std::ptr::eq(Arc::as_ptr(&b.menu), self))
    }

    pub(crate) fn viewer_containers(&self) -> Vec<(ViewerId, Arc<dyn Container>)> {
        self.viewers
            .lock()
            .iter()
            .map(|(v, c)| (*v, Arc::clone(c)))
            .collect()
    }

    pub(crate) fn container_of(&self, viewer: ViewerId) -> Result<Arc<dyn Container>, MenuError> {
        self.viewers
            .lock()
            .get(&viewer)
            .cloned()
            .ok_or(MenuError::NotOpen { viewer })
    }

    /// Serialises event routing for this menu.
    pub(crate) fn lock_events(&self) -> ReentrantMutexGuard<'_, ()> {
        self.events.lock()
    }

    // -- lifecycle --

    /// Show this menu to `viewer`.
    ///
    /// A no-op if the viewer already has it open. Any other menu the viewer
    /// has open is released without running its close handler.
    pub fn open(self: &Arc<Self>, viewer: ViewerId) {
        let host = self.runtime.host();
        let (previous, container, in_place) = loop {
            let seen = self.runtime.binding(viewer);
            if seen.as_ref().is_some_and(|b| Arc::ptr_eq(&b.menu, self)) {
                return;
            }
            let in_place = seen
                .as_ref()
                .is_some_and(|b| self.can_redraw_over(&b.menu));
            let container = match &seen {
                Some(b) if in_place => Arc::clone(&b.container),
                _ => host.create_container(self.kind, &self.title),
            };
            let binding = Binding {
                menu: Arc::clone(self),
                container: Arc::clone(&container),
            };
            match self.runtime.swap_binding(viewer, seen.as_ref(), binding) {
                Ok(previous) => break (previous, container, in_place),
                Err(_) => log::trace!("{viewer}: binding changed during open, retrying"),
            }
        };

        self.render_into(viewer, container.as_ref());

        if in_place {
            log::debug!("{viewer}: redraw {:?} in place", self.title);
            host.retitle(viewer, &self.title);
            host.sync(viewer);
        } else {
            log::debug!("{viewer}: open {:?} ({})", self.title, self.dimension());
            if previous.is_some() {
                host.close_container(viewer);
            }
            host.open_container(viewer, &container);
        }
    }

    /// Close this menu for `viewer` and run the close handler.
    pub fn close(self: &Arc<Self>, viewer: ViewerId) -> Result<(), MenuError> {
        if self.runtime.take_binding_if(viewer, self).is_none() {
            return Err(MenuError::NotOpen { viewer });
        }
        self.runtime.host().close_container(viewer);
        log::debug!("{viewer}: closed {:?}", self.title);
        self.fire_close(viewer);
        Ok(())
    }

    /// Re-render every slot into `viewer`'s container.
    pub fn update(&self, viewer: ViewerId) -> Result<(), MenuError> {
        if !self.is_open(viewer) {
            return Err(MenuError::NotOpen { viewer });
        }
        let container = self.container_of(viewer)?;
        self.render_into(viewer, container.as_ref());
        self.runtime.host().sync(viewer);
        Ok(())
    }

    /// Re-render for every viewer.
    pub fn update_all(&self) {
        for viewer in self.viewers() {
            if let Err(err) = self.update(viewer) {
                log::trace!("skipping update: {err}");
            }
        }
    }

    /// Add `viewer` to the registry. Called with the binding map locked.
    pub(crate) fn register(&self, viewer: ViewerId, container: Arc<dyn Container>) {
        self.viewers.lock().insert(viewer, container);
    }

    /// Drop `viewer` from the registry. Called with the binding map locked.
    pub(crate) fn release(&self, viewer: ViewerId) -> bool {
        self.viewers.lock().remove(&viewer).is_some()
    }

    pub(crate) fn fire_close(self: &Arc<Self>, viewer: ViewerId) {
        if let Some(handler) = self.close_handler() {
            handler(viewer, self);
        }
    }

    fn can_redraw_over(&self, other: &Menu) -> bool {
        self.redraw && other.redraw && self.kind == other.kind
    }

    fn render_into(&self, viewer: ViewerId, container: &dyn Container) {
        for (index, state) in self.slots.iter().enumerate() {
            let template = state.read().template.clone();
            container.set_item(index, template.render(viewer));
        }
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("redraw", &self.redraw)
            .field("viewers", &self.viewers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trove_core::{HeadlessHost, HostStats, ItemStack};

    fn setup() -> (Arc<HeadlessHost>, Arc<Runtime>) {
        let host = Arc::new(HeadlessHost::new());
        let runtime = Runtime::new(host.clone());
        (host, runtime)
    }

    #[test]
    fn builder_validates_shape() {
        let (_, rt) = setup();
        assert_eq!(
            MenuBuilder::chest(rt.clone(), 7).err(),
            Some(MenuError::InvalidRows(7))
        );
        assert_eq!(rt.chest(0).err(), Some(MenuError::InvalidRows(0)));
        assert_eq!(
            rt.boxed(ContainerKind::Hopper).err(),
            Some(MenuError::NotBoxShaped)
        );
        let menu = rt.boxed(ContainerKind::Dispenser).expect("box").build();
        assert_eq!(menu.size(), 9);
        assert_eq!(menu.title(), "Dispenser");
    }

    #[test]
    fn open_renders_per_viewer() {
        let (host, rt) = setup();
        let menu = rt.chest(1).expect("rows").title("Who").build();
        menu.slot(0)
            .expect("slot")
            .set_item_template(crate::ItemTemplate::per_viewer(|v| {
                Some(ItemStack::new("head", v.0 as u32))
            }));
        menu.open(ViewerId(4));
        let container = host.open_container_of(ViewerId(4)).expect("open");
        assert_eq!(container.item(0).map(|i| i.amount), Some(4));
        assert_eq!(container.title(), "Who");
        assert!(menu.is_open(ViewerId(4)));
        assert_eq!(menu.viewers(), vec![ViewerId(4)]);
    }

    #[test]
    fn reopening_same_menu_is_noop() {
        let (host, rt) = setup();
        let menu = rt.hopper().build();
        menu.open(ViewerId(1));
        menu.open(ViewerId(1));
        assert_eq!(host.stats().opened, 1);
        assert_eq!(host.stats().created, 1);
    }

    #[test]
    fn redraw_reuses_container() {
        let (host, rt) = setup();
        let a = rt.chest(3).expect("rows").redraw(true).title("A").build();
        let b = rt.chest(3).expect("rows").redraw(true).title("B").build();
        b.slot(0).expect("slot").set_item(Some(ItemStack::one("gold")));

        a.open(ViewerId(1));
        let before = host.stats();
        b.open(ViewerId(1));
        let after = host.stats();

        assert_eq!(after.opened, before.opened);
        assert_eq!(after.closed, before.closed);
        assert_eq!(after.created, before.created);
        assert_eq!(after.retitled, 1);
        assert_eq!(after.synced, 1);
        assert!(!a.is_open(ViewerId(1)));
        assert!(b.is_open(ViewerId(1)));
        assert!(a.viewers().is_empty());
        let container = host.open_container_of(ViewerId(1)).expect("open");
        assert_eq!(container.item(0).map(|i| i.material), Some("gold".into()));
    }

    #[test]
    fn different_shape_reopens_fully() {
        let (host, rt) = setup();
        let a = rt.chest(3).expect("rows").redraw(true).build();
        let c = rt.chest(6).expect("rows").redraw(true).build();
        a.open(ViewerId(1));
        c.open(ViewerId(1));
        assert_eq!(
            host.stats(),
            HostStats {
                created: 2,
                opened: 2,
                closed: 1,
                retitled: 0,
                synced: 0,
            }
        );
    }

    #[test]
    fn replacing_does_not_run_close_handler() {
        let (_, rt) = setup();
        let calls = Arc::new(AtomicUsize::new(0));
        let a = rt.chest(1).expect("rows").build();
        let seen = calls.clone();
        a.set_close_handler(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let b = rt.chest(1).expect("rows").build();
        a.open(ViewerId(1));
        b.open(ViewerId(1));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        a.open(ViewerId(1));
        a.close(ViewerId(1)).expect("open");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn close_and_update_need_a_binding() {
        let (_, rt) = setup();
        let a = rt.chest(1).expect("rows").build();
        let b = rt.chest(1).expect("rows").build();
        let v = ViewerId(9);
        assert_eq!(a.close(v), Err(MenuError::NotOpen { viewer: v }));
        assert_eq!(a.update(v), Err(MenuError::NotOpen { viewer: v }));
        b.open(v);
        assert_eq!(a.close(v), Err(MenuError::NotOpen { viewer: v }));
        assert!(b.is_open(v));
        assert!(b.update(v).is_ok());
    }

    #[test]
    fn update_pushes_template_changes() {
        let (host, rt) = setup();
        let menu = rt.hopper().build();
        menu.open(ViewerId(1));
        let container = host.open_container_of(ViewerId(1)).expect("open");
        container.set_item(3, Some(ItemStack::one("junk")));
        menu.update(ViewerId(1)).expect("open");
        assert_eq!(container.item(3), None);
    }

    #[test]
    fn clear_empties_items_but_keeps_buttons() {
        let (host, rt) = setup();
        let menu = rt.hopper().build();
        let slot = menu.slot(1).expect("slot");
        slot.set_click_options(crate::ClickOptions::ALLOW_ALL);
        slot.set_click_handler(|_, info| info.deny());
        slot.set_item(Some(ItemStack::one("apple")));
        menu.slot(3)
            .expect("slot")
            .set_item(Some(ItemStack::one("pear")));
        menu.open(ViewerId(1));

        menu.clear_slot(3);
        let container = host.open_container_of(ViewerId(1)).expect("open");
        assert!(container.item(3).is_none());
        assert!(container.item(1).is_some());

        menu.clear();
        assert_eq!(slot.click_options(), crate::ClickOptions::ALLOW_ALL);
        assert!(slot.click_handler().is_some());
        assert_eq!(slot.item(), Ok(None));
        assert!(container.item(1).is_none());
    }

    #[test]
    fn binding_is_exclusive_across_threads() {
        let (_, rt) = setup();
        let menus: Vec<Arc<Menu>> = (0..4)
            .map(|i| rt.chest(1).expect("rows").redraw(i % 2 == 0).build())
            .collect();
        let viewer = ViewerId(1);
        std::thread::scope(|s| {
            for menu in &menus {
                s.spawn(move || {
                    for _ in 0..50 {
                        menu.open(viewer);
                    }
                });
            }
        });
        let open: Vec<_> = menus.iter().filter(|m| m.is_open(viewer)).collect();
        assert_eq!(open.len(), 1);
        let registered: Vec<_> = menus
            .iter()
            .filter(|m| m.viewers().contains(&viewer))
            .collect();
        assert_eq!(registered.len(), 1);
        assert!(Arc::ptr_eq(open[0], registered[0]));
    }
}
