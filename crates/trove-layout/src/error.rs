use thiserror::Error;

/// Errors raised while building masks or pages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A mask builder addressed a row outside `1..=rows`.
    #[error("row {row} is outside 1..={rows}")]
    RowOutOfRange { row: u32, rows: u32 },

    /// Items were supplied but no page slot can hold them.
    #[error("items were added but no page has a slot for them")]
    NoItemSlots,

    /// Items were added to a section that has no slots.
    #[error("section '{0}' has items but no slots")]
    UnknownSection(char),
}
