//! Subgrid span resolution

use super::structs::{Grid, RowCells, Span};
use super::warehouse::Warehouse;

/// Read access to a rectangular arrangement of element handles
///
/// Implemented for dense grids (`[RowCells<T>]`) and for [`Warehouse`], so
/// spans can be resolved against either the materialized form or the index
/// built from raw rows.
pub trait Occupancy<T> {
    /// Declared extent; probes never go past it
    fn extent(&self) -> Grid;

    /// Element occupying `(row, column)`, if any
    fn occupant(&self, row: usize, column: usize) -> Option<&T>;
}

impl<T> Occupancy<T> for [RowCells<T>] {
    fn extent(&self) -> Grid {
        let columns = self.iter().map(|row| row.cells.len()).max().unwrap_or(0);
        Grid::new(self.len(), columns)
    }

    fn occupant(&self, row: usize, column: usize) -> Option<&T> {
        self.get(row)
            .and_then(|r| r.cells.get(column))
            .map(|cell| &cell.element)
    }
}

impl<T> Occupancy<T> for Vec<RowCells<T>> {
    fn extent(&self) -> Grid {
        self.as_slice().extent()
    }

    fn occupant(&self, row: usize, column: usize) -> Option<&T> {
        self.as_slice().occupant(row, column)
    }
}

impl<T> Occupancy<T> for Warehouse<'_, T> {
    fn extent(&self) -> Grid {
        self.grid()
    }

    fn occupant(&self, row: usize, column: usize) -> Option<&T> {
        self.access(row, column).map(|detail| detail.element)
    }
}

/// Default comparator: two handles denote the same logical cell when equal
pub fn same_element<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Resolve the rectangle of cells identical to the one anchored at `(row, column)`
///
/// The colspan grows along the anchor row and the rowspan down the anchor
/// column for as long as `comparator` reports the same logical cell. Both
/// probes start one step past the anchor, so the result is at least 1x1
/// whatever the comparator says.
///
/// Calling this where nothing occupies `(row, column)` is a caller bug; debug
/// builds assert, release builds answer 1x1.
pub fn subgrid<T, G, F>(grid: &G, row: usize, column: usize, comparator: F) -> Span
where
    G: Occupancy<T> + ?Sized,
    F: Fn(&T, &T) -> bool,
{
    let anchor = match grid.occupant(row, column) {
        Some(element) => element,
        None => {
            debug_assert!(false, "subgrid anchored at empty coordinate ({row}, {column})");
            return Span::single();
        }
    };

    let extent = grid.extent();
    let same = |r: usize, c: usize| {
        grid.occupant(r, c)
            .map(|other| comparator(anchor, other))
            .unwrap_or(false)
    };

    let colspan = 1 + (column + 1..extent.columns)
        .take_while(|&c| same(row, c))
        .count();
    let rowspan = 1 + (row + 1..extent.rows)
        .take_while(|&r| same(r, column))
        .count();

    Span::new(rowspan, colspan)
}
