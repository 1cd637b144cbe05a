//! Span-aware occupancy index over input rows
//!
//! The warehouse walks rows top-to-bottom and cells left-to-right, placing
//! each cell at the first column of its row not already claimed by a taller
//! cell above (or an earlier cell of the same row). The result answers
//! "which cell covers `(row, column)`" in O(1).

use tracing::debug;

use super::structs::{Address, DetailExt, Grid, Row, RowData};
use crate::utils::diagnostics::Diagnostic;
use crate::utils::error::{GridError, GridResult};

/// How malformed spans are handled while placing cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Repair the input: normalize zero spans, clip spans that overlap or
    /// leave the table, and record a diagnostic for every repair.
    #[default]
    Lenient,
    /// Reject the input with a [`GridError`] instead of repairing it.
    Strict,
}

/// Largest rowspan honoured by default (the HTML table limit)
pub const MAX_ROWSPAN: usize = 65_534;

/// Largest colspan honoured by default (the HTML table limit)
pub const MAX_COLSPAN: usize = 1_000;

/// Warehouse construction options
#[derive(Debug, Clone)]
pub struct WarehouseOptions {
    pub placement: Placement,
    /// Declared rowspans above this are clipped (lenient) or rejected (strict)
    pub max_rowspan: usize,
    /// Declared colspans above this are clipped (lenient) or rejected (strict)
    pub max_colspan: usize,
}

impl Default for WarehouseOptions {
    fn default() -> Self {
        WarehouseOptions {
            placement: Placement::default(),
            max_rowspan: MAX_ROWSPAN,
            max_colspan: MAX_COLSPAN,
        }
    }
}

impl WarehouseOptions {
    /// Repairing placement (the default)
    pub fn lenient() -> Self {
        WarehouseOptions {
            placement: Placement::Lenient,
            ..Default::default()
        }
    }

    /// Rejecting placement
    pub fn strict() -> Self {
        WarehouseOptions {
            placement: Placement::Strict,
            ..Default::default()
        }
    }
}

/// Position of a placed cell inside `Warehouse::all`
type Slot = (usize, usize);

/// Canonical occupancy index derived from a sequence of rows
#[derive(Debug)]
pub struct Warehouse<'a, T> {
    grid: Grid,
    /// Flat `rows * columns` lookup, indexed by `row * columns + column`
    access: Vec<Option<Slot>>,
    all: Vec<RowData<'a, T>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, T> Warehouse<'a, T> {
    /// Build a warehouse with lenient placement. Never fails.
    pub fn build(rows: &'a [Row<T>]) -> Self {
        match Self::build_with_options(rows, &WarehouseOptions::lenient()) {
            Ok(warehouse) => warehouse,
            Err(err) => unreachable!("lenient placement rejected input: {}", err),
        }
    }

    /// Build a warehouse with the given placement policy
    pub fn build_with_options(rows: &'a [Row<T>], options: &WarehouseOptions) -> GridResult<Self> {
        let mut builder = Builder::new(rows.len(), options);
        for (r, row) in rows.iter().enumerate() {
            builder.place_row(r, row)?;
        }
        Ok(builder.finish())
    }

    /// Logical extent of the table
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The placed cell covering `(row, column)`, if any
    pub fn access(&self, row: usize, column: usize) -> Option<&DetailExt<'a, T>> {
        if !self.grid.contains(row, column) {
            return None;
        }
        self.access[row * self.grid.columns + column].map(|(r, c)| &self.all[r].cells[c])
    }

    /// Alias of [`Warehouse::access`]
    pub fn get_at(&self, row: usize, column: usize) -> Option<&DetailExt<'a, T>> {
        self.access(row, column)
    }

    /// Placed rows in input order
    pub fn all(&self) -> &[RowData<'a, T>] {
        &self.all
    }

    /// All placed cells in discovery order
    pub fn just_cells(&self) -> impl Iterator<Item = &DetailExt<'a, T>> + '_ {
        self.all.iter().flat_map(|row| row.cells.iter())
    }

    /// Number of placed (non-gap) cells
    pub fn cell_count(&self) -> usize {
        self.all.iter().map(|row| row.cells.len()).sum()
    }

    /// First placed cell whose element matches `element` under `comparator`
    pub fn find_item<F>(&self, element: &T, comparator: F) -> Option<&DetailExt<'a, T>>
    where
        F: Fn(&T, &T) -> bool,
    {
        self.just_cells()
            .find(|detail| comparator(detail.element, element))
    }

    /// Placed cells satisfying `predicate`
    pub fn filter_items<P>(&self, predicate: P) -> Vec<&DetailExt<'a, T>>
    where
        P: Fn(&DetailExt<'a, T>) -> bool,
    {
        self.just_cells().filter(|detail| predicate(detail)).collect()
    }

    /// Repairs made during lenient placement
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Mutable placement state used while building a warehouse
struct Builder<'a, T> {
    placement: Placement,
    max_rowspan: usize,
    max_colspan: usize,
    row_count: usize,
    /// Per-row occupancy, grown on demand as columns are claimed
    occupied: Vec<Vec<Option<Slot>>>,
    all: Vec<RowData<'a, T>>,
    columns: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, T> Builder<'a, T> {
    fn new(row_count: usize, options: &WarehouseOptions) -> Self {
        Builder {
            placement: options.placement,
            max_rowspan: options.max_rowspan.max(1),
            max_colspan: options.max_colspan.max(1),
            row_count,
            occupied: vec![Vec::new(); row_count],
            all: Vec::with_capacity(row_count),
            columns: 0,
            diagnostics: Vec::new(),
        }
    }

    fn owner(&self, row: usize, column: usize) -> Option<Slot> {
        self.occupied
            .get(row)
            .and_then(|cols| cols.get(column).copied().flatten())
    }

    /// Anchor of the cell in `slot`; `current` holds this row's cells so far
    fn anchor_of(&self, slot: Slot, row: usize, current: &[DetailExt<'a, T>]) -> Address {
        let (r, c) = slot;
        if r == row {
            current[c].anchor
        } else {
            self.all[r].cells[c].anchor
        }
    }

    fn first_free_column(&self, row: usize) -> usize {
        let mut column = 0;
        while self.owner(row, column).is_some() {
            column += 1;
        }
        column
    }

    /// Record a repair, or fail in strict mode
    fn repair(&mut self, address: Address, err: GridError, message: String) -> GridResult<()> {
        match self.placement {
            Placement::Strict => Err(err),
            Placement::Lenient => {
                debug!(%err, "repairing table layout");
                self.diagnostics
                    .push(Diagnostic::warning_at(address, message));
                Ok(())
            }
        }
    }

    fn place_row(&mut self, r: usize, row: &'a Row<T>) -> GridResult<()> {
        let mut placed: Vec<DetailExt<'a, T>> = Vec::with_capacity(row.cells.len());

        for cell in &row.cells {
            let start = self.first_free_column(r);
            let anchor = Address::new(r, start);

            let mut rowspan = cell.rowspan;
            if rowspan == 0 {
                self.repair(
                    anchor,
                    GridError::ZeroSpan {
                        address: anchor,
                        axis: "rowspan",
                    },
                    "rowspan of 0 treated as 1".to_string(),
                )?;
                rowspan = 1;
            }
            let mut colspan = cell.colspan;
            if colspan == 0 {
                self.repair(
                    anchor,
                    GridError::ZeroSpan {
                        address: anchor,
                        axis: "colspan",
                    },
                    "colspan of 0 treated as 1".to_string(),
                )?;
                colspan = 1;
            }

            if rowspan > self.max_rowspan {
                self.repair(
                    anchor,
                    GridError::SpanTooLarge {
                        address: anchor,
                        axis: "rowspan",
                        span: rowspan,
                        limit: self.max_rowspan,
                    },
                    format!("rowspan clipped from {} to {}", rowspan, self.max_rowspan),
                )?;
                rowspan = self.max_rowspan;
            }
            if colspan > self.max_colspan {
                self.repair(
                    anchor,
                    GridError::SpanTooLarge {
                        address: anchor,
                        axis: "colspan",
                        span: colspan,
                        limit: self.max_colspan,
                    },
                    format!("colspan clipped from {} to {}", colspan, self.max_colspan),
                )?;
                colspan = self.max_colspan;
            }

            // Spans only consume rows that already exist.
            let available = self.row_count - r;
            if rowspan > available {
                self.repair(
                    anchor,
                    GridError::SpanOutOfBounds {
                        address: anchor,
                        rowspan,
                        available,
                    },
                    format!("rowspan clipped from {} to {}", rowspan, available),
                )?;
                rowspan = available;
            }

            // A cell may only grow right over unclaimed columns.
            let blocked = (1..colspan)
                .find_map(|k| self.owner(r, start + k).map(|slot| (k, slot)));
            if let Some((offset, slot)) = blocked {
                let occupied_by = self.anchor_of(slot, r, &placed);
                self.repair(
                    anchor,
                    GridError::Overlap {
                        address: anchor,
                        occupied_by,
                    },
                    format!("colspan clipped from {} to {}", colspan, offset),
                )?;
                colspan = offset;
            }

            // Spans above are rectangles that include this row, so once the
            // colspan fits here the rows below are free as well.
            debug_assert!((1..rowspan).all(|j| (start..start + colspan)
                .all(|c| self.owner(r + j, c).is_none())));

            let slot = (r, placed.len());
            for cr in r..r + rowspan {
                let cols = &mut self.occupied[cr];
                if cols.len() < start + colspan {
                    cols.resize(start + colspan, None);
                }
                for slot_ref in &mut cols[start..start + colspan] {
                    *slot_ref = Some(slot);
                }
            }
            self.columns = self.columns.max(start + colspan);

            placed.push(DetailExt {
                element: &cell.element,
                rowspan,
                colspan,
                is_new: cell.is_new,
                anchor,
            });
        }

        self.all.push(RowData {
            cells: placed,
            section: row.section,
        });
        Ok(())
    }

    fn finish(self) -> Warehouse<'a, T> {
        let grid = Grid::new(self.row_count, self.columns);
        let mut access = vec![None; grid.area()];
        for (r, cols) in self.occupied.iter().enumerate() {
            for (c, slot) in cols.iter().enumerate() {
                access[r * grid.columns + c] = *slot;
            }
        }

        debug!(
            rows = grid.rows,
            columns = grid.columns,
            repairs = self.diagnostics.len(),
            "built table warehouse"
        );

        Warehouse {
            grid,
            access,
            all: self.all,
            diagnostics: self.diagnostics,
        }
    }
}
