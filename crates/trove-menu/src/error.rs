use thiserror::Error;
use trove_core::ViewerId;

/// Errors surfaced by menu operations.
///
/// Policy denials and structural rejections are ordinary outcomes and show
/// up as [`ClickResult::Deny`](trove_core::ClickResult::Deny) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The operation needs `viewer` to be looking at this menu.
    #[error("{viewer} is not viewing this menu")]
    NotOpen { viewer: ViewerId },

    /// Chest menus have 1 to 6 rows.
    #[error("chest menus have 1..=6 rows, got {0}")]
    InvalidRows(u32),

    /// Box menus are backed by a 3×3 container.
    #[error("box menus need a 3x3 container kind")]
    NotBoxShaped,

    /// The slot's item depends on the viewer; use `item_for`.
    #[error("slot item is rendered per viewer")]
    DynamicTemplate,

    /// Every frame of an animation is already registered.
    #[error("all {capacity} frames are already registered")]
    FramesExhausted { capacity: usize },
}
