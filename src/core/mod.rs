//! Core reconciliation engine
//!
//! - `grid`: warehouse, subgrid span resolution and transitions

pub mod grid;

// Re-export main types and functions from grid
pub use grid::{
    coalesce, materialize, reconcile, same_element, subgrid, Address, Cell, DenseGrid, DetailExt,
    DetailNew, ElementNew, Generators, Grid, Occupancy, Placement, Row, RowCells, RowData,
    RowDetails, Section, Span, Warehouse, WarehouseOptions, MAX_COLSPAN, MAX_ROWSPAN,
};
