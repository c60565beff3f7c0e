//! mailwright-core: table width model and authoring state, without framework
//! dependencies.
//!
//! This crate provides:
//! - `TableMarkup` trait for table access, with `MemTable` as the in-memory
//!   implementation
//! - grid reconstruction under `colspan`/`rowspan`
//! - the column-percent model (read, apply, normalize)
//! - boundary visibility and the resize state machine
//! - width snapshots for full content replacement
//! - selection, cell styles, sync direction, configuration

pub mod boundary;
pub mod cell_style;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod layout_sync;
pub mod mem;
pub mod percent;
pub mod resize;
pub mod selection;
pub mod style;
pub mod sync;
pub mod table;

#[cfg(test)]
mod fixtures;

pub use boundary::compute_visible_boundaries;
pub use cell_style::{CellStyle, Padding, TextAlign};
pub use color::{rgb_to_hex, rgb_to_hex_triplet};
pub use config::{AuthoringConfig, ElementIds};
pub use error::{AuthoringError, Result};
pub use export::{ExportOptions, export_style, wrap_for_email};
pub use grid::{PlacedCell, TableStructure, compute_table_structure};
pub use layout_sync::{TableWidths, WidthSnapshot};
pub use mem::{CellId, MemCell, MemTable};
pub use percent::{
    ColumnPercents, apply_column_percents, ensure_table_percent_widths, read_column_percents,
};
pub use resize::{
    DragSnapshot, HandlePlacement, MIN_COLUMN_PERCENT, ResizeController, ResizeState,
    handle_placements, resize_pair,
};
pub use selection::{SelectMode, SelectionDelta, SelectionManager};
pub use smol_str::SmolStr;
pub use style::{InlineStyle, format_percent, parse_percent};
pub use sync::{SyncDirection, SyncGuard, SyncPhase, SyncState};
pub use table::{RESIZE_DISABLED_ATTR, TableMarkup};
