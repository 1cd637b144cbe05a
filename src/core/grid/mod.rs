//! Table Grid Reconciliation
//!
//! Converts rows of spanning cells into a canonical dense grid and back into
//! anchor-only cell details.
//!
//! # Architecture
//!
//! ```text
//! Rows -> Warehouse (occupancy index) -> Dense Grid (gap-filled) -> Row Details
//!                                            ^
//!                                  table editing operations
//! ```
//!
//! - [`Warehouse`] places every cell at the first free column of its row and
//!   answers which cell covers a coordinate.
//! - [`subgrid`] resolves the rectangle of identical cells at an anchor.
//! - [`materialize`] fills the extent, synthesizing gaps where no cell sits.
//! - [`coalesce`] turns a dense grid back into one detail per spanning cell.
//!
//! # Example
//!
//! ```rust
//! use tablegrid::core::grid::{coalesce, materialize, same_element, Cell, Row, Warehouse};
//!
//! let rows = vec![
//!     Row::body(vec![Cell::with_spans("a", 2, 2)]),
//!     Row::body(vec![]),
//!     Row::body(vec![]),
//! ];
//! let warehouse = Warehouse::build(&rows);
//! let mut gaps = ["g0", "g1"].into_iter();
//! let mut gap = || gaps.next().unwrap_or_default();
//! let grid = materialize(&warehouse, &mut gap, false);
//! let details = coalesce(&grid, same_element);
//!
//! assert_eq!(details[0].details.len(), 1);
//! assert!(details[1].details.is_empty());
//! // Each gap is its own 1x1 detail.
//! assert_eq!(details[2].details.len(), 2);
//! ```

mod structs;
mod table_grid;
mod transitions;
mod warehouse;


// Re-export public API
pub use structs::{
    Address, Cell, DenseGrid, DetailExt, DetailNew, ElementNew, Grid, Row, RowCells, RowData,
    RowDetails, Section, Span,
};
pub use table_grid::{same_element, subgrid, Occupancy};
pub use transitions::{coalesce, materialize, reconcile, Generators};
pub use warehouse::{Placement, Warehouse, WarehouseOptions, MAX_COLSPAN, MAX_ROWSPAN};
