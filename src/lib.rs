//! # tablegrid
//!
//! Table grid reconciliation engine written in Rust.
//!
//! Tables arrive as rows of cells that may span several rows and columns.
//! The engine indexes them into a canonical occupancy map, expands that map
//! into a dense gap-filled grid that editing operations can work on, and
//! coalesces an edited grid back into one record per spanning cell, ready to
//! be written out as `<tr>`/`<td rowspan colspan>` markup.
//!
//! ## Features
//!
//! - **Lenient placement**: cells skip columns claimed by taller cells above;
//!   malformed spans are repaired and reported, or rejected in strict mode
//! - **Dense grids**: every coordinate filled, gaps synthesized on demand
//! - **Stable coalescing**: one detail per spanning cell at its anchor
//! - **WASM Support**: compiles to WebAssembly for browser editors
//!
//! ## Usage Example
//!
//! ```rust
//! use tablegrid::{coalesce, materialize, same_element, Cell, Row, Warehouse};
//!
//! let rows = vec![
//!     Row::body(vec![Cell::with_spans(1, 2, 1), Cell::new(2)]),
//!     Row::body(vec![Cell::new(3), Cell::new(4)]),
//! ];
//!
//! let warehouse = Warehouse::build(&rows);
//! assert_eq!(warehouse.grid().columns, 3);
//!
//! // Gaps need handles of their own; equal handles would merge.
//! let mut next_gap = 100;
//! let mut gap = || {
//!     next_gap += 1;
//!     next_gap
//! };
//! let grid = materialize(&warehouse, &mut gap, false);
//! // Cell 2 has no neighbour in row 0, so a gap fills (0, 2).
//! assert_eq!(grid[0].cells[2].element, 101);
//! assert!(grid[0].cells[2].is_new);
//!
//! let details = coalesce(&grid, same_element);
//! assert_eq!(details[0].details[0].rowspan, 2);
//! ```

/// Core reconciliation engine
pub mod core;

/// Feature modules - documents and layout output
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types and operations
pub use crate::core::grid::{
    coalesce, materialize, reconcile, same_element, subgrid, Address, Cell, DenseGrid, DetailExt,
    DetailNew, ElementNew, Generators, Grid, Occupancy, Placement, Row, RowCells, RowData,
    RowDetails, Section, Span, Warehouse, WarehouseOptions, MAX_COLSPAN, MAX_ROWSPAN,
};

// Re-export feature modules
#[cfg(feature = "serde")]
pub use features::document;
pub use features::layout;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{GridError, GridResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_plain_table() {
        let rows = vec![
            Row::body(vec![Cell::new(1), Cell::new(2)]),
            Row::body(vec![Cell::new(3), Cell::new(4)]),
        ];
        let mut gap = || 0;
        let details = reconcile(&rows, &mut gap, same_element);
        assert_eq!(details.len(), 2);
        assert!(details
            .iter()
            .flat_map(|row| &row.details)
            .all(|d| d.span() == Span::single() && !d.is_new));
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("thead".parse::<Section>().unwrap(), Section::Header);
        assert_eq!("Body".parse::<Section>().unwrap(), Section::Body);
        assert_eq!("tfoot".parse::<Section>().unwrap(), Section::Footer);
        assert!("caption".parse::<Section>().is_err());
        assert_eq!(Section::Footer.to_string(), "tfoot");
    }
}
