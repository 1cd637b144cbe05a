//! JSON table documents
//!
//! A small interchange format for tables whose cells are named by id. It is
//! what the `tgrid` CLI and the WASM bindings accept:
//!
//! ```json
//! { "rows": [
//!     { "section": "thead", "cells": [ { "id": "a", "colspan": 2 } ] },
//!     { "cells": [ { "id": "b" }, { "id": "c", "rowspan": 2, "new": true } ] }
//! ] }
//! ```
//!
//! Omitted spans default to 1, an omitted section to `tbody`.

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::grid::{
    coalesce, materialize, same_element, Cell, DenseGrid, Grid, Row, RowDetails,
    Section, Warehouse, WarehouseOptions,
};
use crate::utils::error::{GridError, GridResult};

fn default_span() -> usize {
    1
}

fn default_section() -> String {
    Section::Body.tag().to_string()
}

/// One cell of a table document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCell {
    pub id: String,
    #[serde(default = "default_span")]
    pub rowspan: usize,
    #[serde(default = "default_span")]
    pub colspan: usize,
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

/// One row of a table document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    #[serde(default = "default_section")]
    pub section: String,
    #[serde(default)]
    pub cells: Vec<DocumentCell>,
}

/// A table described by rows of id-named cells
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableDocument {
    pub rows: Vec<DocumentRow>,
}

impl TableDocument {
    /// Parse a document from JSON text
    pub fn from_json(input: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Convert into engine rows, checking sections and id uniqueness
    pub fn to_rows(&self) -> GridResult<Vec<Row<String>>> {
        let mut ids = FxHashSet::default();
        let mut rows = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let section: Section = row.section.parse()?;
            let mut cells = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                if cell.id.is_empty() {
                    return Err(GridError::invalid("cell id cannot be empty"));
                }
                if !ids.insert(cell.id.as_str()) {
                    return Err(GridError::DuplicateId {
                        id: cell.id.clone(),
                    });
                }
                cells.push(Cell {
                    element: cell.id.clone(),
                    rowspan: cell.rowspan,
                    colspan: cell.colspan,
                    is_new: cell.is_new,
                });
            }
            rows.push(Row::new(cells, section));
        }

        Ok(rows)
    }
}

/// Options for reconciling a document
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Mark every pre-existing cell as new in the dense grid
    pub mark_cells_as_new: bool,
    /// Reject malformed spans instead of repairing them
    pub strict: bool,
}

impl ReconcileOptions {
    fn warehouse_options(&self) -> WarehouseOptions {
        if self.strict {
            WarehouseOptions::strict()
        } else {
            WarehouseOptions::lenient()
        }
    }
}

/// Everything the engine derives from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub grid: Grid,
    pub dense: DenseGrid<String>,
    pub details: Vec<RowDetails<String>>,
    /// Repairs made during lenient placement, formatted for display
    pub diagnostics: Vec<String>,
}

/// Gap ids `gap-0`, `gap-1`, ... skipping ids the document already uses
struct GapNames<'a> {
    taken: FxHashSet<&'a str>,
    next: usize,
}

impl<'a> GapNames<'a> {
    fn new(rows: &'a [Row<String>]) -> Self {
        let taken = rows
            .iter()
            .flat_map(|row| row.cells.iter().map(|cell| cell.element.as_str()))
            .collect();
        GapNames { taken, next: 0 }
    }

    fn fresh(&mut self) -> String {
        loop {
            let name = format!("gap-{}", self.next);
            self.next += 1;
            if !self.taken.contains(name.as_str()) {
                return name;
            }
        }
    }
}

/// Build, materialize and coalesce a document
pub fn reconcile_document(doc: &TableDocument, options: &ReconcileOptions) -> GridResult<TableReport> {
    let rows = doc.to_rows()?;
    let warehouse = Warehouse::build_with_options(&rows, &options.warehouse_options())?;

    let mut names = GapNames::new(&rows);
    let mut gap = || names.fresh();
    let dense = materialize(&warehouse, &mut gap, options.mark_cells_as_new);
    let details = coalesce(&dense, same_element);

    debug!(
        cells = warehouse.cell_count(),
        repairs = warehouse.diagnostics().len(),
        "reconciled table document"
    );

    Ok(TableReport {
        grid: warehouse.grid(),
        diagnostics: warehouse
            .diagnostics()
            .iter()
            .map(|diag| diag.to_string())
            .collect(),
        dense,
        details,
    })
}
