//! **trove-layout** — setup-time helpers for [`trove_menu`] menus.
//!
//! Nothing here takes part in click routing. Masks turn textual row
//! patterns into sets of slots and assign items or [`SlotSettings`] to them;
//! paginated builders spread a list of items over as many pages as needed
//! and wire up previous/next buttons.
//!
//! ```text
//! BinaryMask::builder(dim)          PaginatedMenuBuilder::new(page)
//!     .pattern("111111111")             .slots(&mask)
//!     .pattern("100000001")             .next_button_slot(26)
//!     .build()?  ──apply──▶ Menu         .build()? ──▶ Vec<Arc<Menu>>
//! ```
//!
//! [`SlotSettings`]: trove_menu::SlotSettings

mod error;
pub mod mask;
pub mod paginate;

pub use error::LayoutError;
pub use mask::{BinaryMask, BinaryMaskBuilder, Mask, RecipeMask, RecipeMaskBuilder};
pub use paginate::{MultiSectionPaginatedMenuBuilder, PaginatedMenuBuilder};
