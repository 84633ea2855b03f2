//! The shared engine state: the host and the viewer → menu binding map.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use trove_core::{Container, ContainerKind, Host, ViewerId};

use crate::error::MenuError;
use crate::menu::{Menu, MenuBuilder};

/// One viewer's active binding: the menu and the container rendering it.
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) menu: Arc<Menu>,
    pub(crate) container: Arc<dyn Container>,
}

impl Binding {
    fn same_as(&self, other: &Binding) -> bool {
        Arc::ptr_eq(&self.menu, &other.menu) && Arc::ptr_eq(&self.container, &other.container)
    }
}

/// The binding map moved on between a peek and a swap.
#[derive(Debug)]
pub(crate) struct Raced;

/// Entry point of the engine.
///
/// Owns the [`Host`] and the single map from viewer to active binding. Menus
/// are built from a runtime and keep it alive; raw events are fed to
/// [`handle_click`](Runtime::handle_click),
/// [`handle_drag`](Runtime::handle_drag) and
/// [`handle_close`](Runtime::handle_close).
pub struct Runtime {
    host: Arc<dyn Host>,
    bindings: Mutex<HashMap<ViewerId, Binding>>,
}

impl Runtime {
    pub fn new(host: Arc<dyn Host>) -> Arc<Self> {
        Arc::new(Self {
            host,
            bindings: Mutex::new(HashMap::new()),
        })
    }

    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// Builder for a chest menu of `rows` rows.
    pub fn chest(self: &Arc<Self>, rows: u32) -> Result<MenuBuilder, MenuError> {
        MenuBuilder::chest(Arc::clone(self), rows)
    }

    /// Builder for a hopper menu.
    pub fn hopper(self: &Arc<Self>) -> MenuBuilder {
        MenuBuilder::hopper(Arc::clone(self))
    }

    /// Builder for a 3×3 menu backed by `kind`.
    pub fn boxed(self: &Arc<Self>, kind: ContainerKind) -> Result<MenuBuilder, MenuError> {
        MenuBuilder::boxed(Arc::clone(self), kind)
    }

    /// The menu `viewer` currently has open.
    pub fn open_menu(&self, viewer: ViewerId) -> Option<Arc<Menu>> {
        self.bindings.lock().get(&viewer).map(|b| Arc::clone(&b.menu))
    }

    /// Number of viewers with a menu open.
    pub fn open_count(&self) -> usize {
        self.bindings.lock().len()
    }

    /// The viewer closed whatever they were looking at, natively.
    ///
    /// Drops the binding and runs the menu's close handler. Returns `false`
    /// when the viewer had no menu open.
    pub fn handle_close(&self, viewer: ViewerId) -> bool {
        let removed = {
            let mut bindings = self.bindings.lock();
            let removed = bindings.remove(&viewer);
            if let Some(binding) = &removed {
                binding.menu.release(viewer);
            }
            removed
        };
        match removed {
            Some(binding) => {
                log::debug!("{viewer}: closed {:?} natively", binding.menu.title());
                binding.menu.fire_close(viewer);
                true
            }
            None => false,
        }
    }

    pub(crate) fn binding(&self, viewer: ViewerId) -> Option<Binding> {
        self.bindings.lock().get(&viewer).cloned()
    }

    /// Replace `viewer`'s binding if it is still `expected`, moving the
    /// viewer between the two menus' registries under the same lock.
    pub(crate) fn swap_binding(
        &self,
        viewer: ViewerId,
        expected: Option<&Binding>,
        binding: Binding,
    ) -> Result<Option<Binding>, Raced> {
        let mut bindings = self.bindings.lock();
        let unchanged = match (bindings.get(&viewer), expected) {
            (None, None) => true,
            (Some(current), Some(expected)) => current.same_as(expected),
            _ => false,
        };
        if !unchanged {
            return Err(Raced);
        }
        binding.menu.register(viewer, Arc::clone(&binding.container));
        let previous = bindings.insert(viewer, binding);
        if let Some(previous) = &previous {
            previous.menu.release(viewer);
        }
        Ok(previous)
    }

    /// Remove `viewer`'s binding if it points at `menu`.
    pub(crate) fn take_binding_if(&self, viewer: ViewerId, menu: &Arc<Menu>) -> Option<Binding> {
        let mut bindings = self.bindings.lock();
        if !bindings
            .get(&viewer)
            .is_some_and(|b| Arc::ptr_eq(&b.menu, menu))
        {
            return None;
        }
        let removed = bindings.remove(&viewer);
        menu.release(viewer);
        removed
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("open", &self.open_count())
            .finish_non_exhaustive()
    }
}
