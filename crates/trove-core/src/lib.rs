//! **trove-core** — value types shared across the *trove* inventory-menu
//! engine.
//!
//! This crate provides the foundational pieces the engine reasons about:
//! menu geometry, item stacks, the shared-buffer container a viewer sees,
//! raw interaction events delivered by a host, and the [`Host`] seam through
//! which containers are created, opened and closed.

pub mod container;
pub mod geom;
pub mod host;
pub mod item;
pub mod messages;

pub use container::{Container, ContainerKind, Inventory};
pub use geom::{Dimension, SlotPos};
pub use host::{HeadlessHost, Host, HostStats};
pub use item::ItemStack;
pub use messages::*;
