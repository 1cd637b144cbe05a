//! Transitions between the warehouse, dense grids and row details

use tracing::trace;

use super::structs::{DenseGrid, DetailNew, ElementNew, Row, RowCells, RowDetails};
use super::table_grid::{subgrid, Occupancy};
use super::warehouse::Warehouse;

/// Supplier of placeholder elements for coordinates no cell covers
pub trait Generators<T> {
    /// A freshly created placeholder element
    fn gap(&mut self) -> T;
}

impl<T, F> Generators<T> for F
where
    F: FnMut() -> T,
{
    fn gap(&mut self) -> T {
        self()
    }
}

/// Expand a warehouse into a dense grid with one entry per coordinate
///
/// Covered coordinates carry the covering cell's element marked with
/// `mark_cells_as_new`. Uncovered coordinates get a placeholder from
/// `generators`, always marked new since it did not exist in the source.
pub fn materialize<T, G>(
    warehouse: &Warehouse<'_, T>,
    generators: &mut G,
    mark_cells_as_new: bool,
) -> DenseGrid<T>
where
    T: Clone,
    G: Generators<T> + ?Sized,
{
    let extent = warehouse.grid();
    let mut gaps = 0usize;

    let grid: DenseGrid<T> = warehouse
        .all()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let cells = (0..extent.columns)
                .map(|c| match warehouse.access(r, c) {
                    Some(detail) => ElementNew::new(detail.element.clone(), mark_cells_as_new),
                    None => {
                        gaps += 1;
                        ElementNew::new(generators.gap(), true)
                    }
                })
                .collect();
            RowCells::new(cells, row.section)
        })
        .collect();

    trace!(
        rows = extent.rows,
        columns = extent.columns,
        gaps,
        "materialized dense grid"
    );
    grid
}

/// Visited coordinates for [`coalesce`], stored row-major
struct SeenMatrix {
    columns: usize,
    cells: Vec<bool>,
}

impl SeenMatrix {
    fn new(rows: usize, columns: usize) -> Self {
        SeenMatrix {
            columns,
            cells: vec![false; rows * columns],
        }
    }

    fn is_seen(&self, row: usize, column: usize) -> bool {
        self.cells[row * self.columns + column]
    }

    fn mark(&mut self, row: usize, column: usize, rowspan: usize, colspan: usize) {
        for r in row..row + rowspan {
            let start = r * self.columns + column;
            self.cells[start..start + colspan].fill(true);
        }
    }
}

/// Coalesce a dense grid into per-row details
///
/// Walking row-major reaches every rectangle at its top-left coordinate
/// first, so each unseen coordinate is an anchor: its span is resolved with
/// [`subgrid`], the whole rectangle is marked seen, and one detail is emitted.
/// Rows entirely covered by spans from above yield no details.
pub fn coalesce<T, F>(grid: &[RowCells<T>], comparator: F) -> Vec<RowDetails<T>>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let extent = grid.extent();
    let mut seen = SeenMatrix::new(extent.rows, extent.columns);

    let rows: Vec<RowDetails<T>> = grid
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let mut details = Vec::new();
            for (c, cell) in row.cells.iter().enumerate() {
                if seen.is_seen(r, c) {
                    continue;
                }
                let span = subgrid(grid, r, c, &comparator);
                seen.mark(r, c, span.rowspan, span.colspan);
                details.push(DetailNew::new(
                    cell.element.clone(),
                    span.rowspan,
                    span.colspan,
                    cell.is_new,
                ));
            }
            RowDetails::new(details, row.section)
        })
        .collect();

    trace!(
        rows = rows.len(),
        details = rows.iter().map(|row| row.details.len()).sum::<usize>(),
        "coalesced row details"
    );
    rows
}

/// Build, materialize and coalesce in one pass
///
/// Existing cells are marked as not new; gaps are filled from `generators`.
pub fn reconcile<T, G, F>(rows: &[Row<T>], generators: &mut G, comparator: F) -> Vec<RowDetails<T>>
where
    T: Clone,
    G: Generators<T> + ?Sized,
    F: Fn(&T, &T) -> bool,
{
    let warehouse = Warehouse::build(rows);
    let grid = materialize(&warehouse, generators, false);
    coalesce(&grid, comparator)
}
