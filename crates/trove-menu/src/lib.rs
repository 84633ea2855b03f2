//! **trove-menu** — grid menus over shared inventories.
//!
//! A [`Menu`] is a titled grid of [`Slot`]s shown to any number of viewers
//! through a [`Host`](trove_core::Host). Raw clicks and drags enter through
//! the [`Runtime`], are classified, gated by each slot's [`ClickOptions`],
//! and handed to the slot's click handler, whose verdict becomes the
//! event's authoritative [`ClickResult`](trove_core::ClickResult).
//!
//! ```text
//! ClickEvent ─▶ Runtime::handle_click ─▶ classify ─┬─▶ dispatch(slot)
//!                                                  └─▶ distribute::plan ─▶ dispatch(slot)*
//! ```

pub mod animated;
pub mod classify;
pub mod distribute;
mod error;
pub mod info;
pub mod menu;
pub mod options;
mod route;
pub mod runtime;
pub mod slot;

pub use animated::{AnimatedMenu, FramePlayer};
pub use classify::{Route, classify};
pub use error::MenuError;
pub use info::{ClickInformation, CursorDropInformation};
pub use menu::{Menu, MenuBuilder};
pub use options::{ActionSet, ClickOptions, ClickOptionsBuilder, ClickSet};
pub use runtime::Runtime;
pub use slot::{
    ClickHandler, CloseHandler, CursorDropHandler, ItemTemplate, Slot, SlotSettings,
    SlotSettingsBuilder,
};
