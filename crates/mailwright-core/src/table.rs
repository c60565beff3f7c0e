//! Table markup abstraction.
//!
//! The width model never touches a DOM directly. It reads spans and widths and
//! writes widths back through [`TableMarkup`], which the browser crate
//! implements over `HtmlTableElement` and [`MemTable`](crate::MemTable)
//! implements in memory.

/// Marker attribute set on tables whose resize handles are disabled.
pub const RESIZE_DISABLED_ATTR: &str = "data-resize-disabled";

/// Access to the width-relevant parts of a table's markup.
///
/// Implementations must return rows in document order and cells in source
/// order within each row. Only width styles and the resize marker may be
/// mutated; structure is never changed through this trait.
pub trait TableMarkup {
    /// Handle to one markup cell. Cheap to clone.
    type Cell: Clone;

    /// All rows of the table, each as its cells in source order.
    fn rows(&self) -> Vec<Vec<Self::Cell>>;

    /// Raw `colspan` value. Zero and missing are both fine; the grid clamps.
    fn col_span(&self, cell: &Self::Cell) -> u32;

    /// Raw `rowspan` value.
    fn row_span(&self, cell: &Self::Cell) -> u32;

    /// The cell's own inline `width` value, if any (e.g. `"25%"`, `"120px"`).
    fn cell_width(&self, cell: &Self::Cell) -> Option<String>;

    /// Set the cell's inline `width`.
    fn set_cell_width(&mut self, cell: &Self::Cell, width: &str);

    /// Switch the table to `table-layout: fixed; width: 100%`.
    fn set_fixed_layout(&mut self);

    /// Set or clear the resize-disabled marker.
    fn set_resize_disabled(&mut self, disabled: bool);

    /// Whether the resize-disabled marker is present.
    fn is_resize_disabled(&self) -> bool;
}
