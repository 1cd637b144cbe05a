//! Property tests over randomly shaped tables

use fxhash::{FxHashMap, FxHashSet};
use proptest::prelude::*;
use tablegrid::{coalesce, materialize, same_element, subgrid, Cell, Row, Warehouse};

/// Gap ids start here so they never collide with cell ids.
const GAP_BASE: u32 = 1_000_000;

fn gap_ids() -> impl FnMut() -> u32 {
    let mut next = GAP_BASE;
    move || {
        next += 1;
        next
    }
}

/// Rows of cells with spans up to 3x3, each cell a unique id.
fn table_strategy() -> impl Strategy<Value = Vec<Row<u32>>> {
    prop::collection::vec(
        prop::collection::vec((1usize..=3, 1usize..=3), 0..5),
        1..6,
    )
    .prop_map(|shape| {
        let mut id = 0u32;
        shape
            .into_iter()
            .map(|cells| {
                Row::body(
                    cells
                        .into_iter()
                        .map(|(rowspan, colspan)| {
                            id += 1;
                            Cell::with_spans(id, rowspan, colspan)
                        })
                        .collect(),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_materialize_covers_every_coordinate(rows in table_strategy()) {
        let warehouse = Warehouse::build(&rows);
        let extent = warehouse.grid();
        let mut gap = gap_ids();
        let grid = materialize(&warehouse, &mut gap, false);

        prop_assert_eq!(grid.len(), extent.rows);
        for row in &grid {
            prop_assert_eq!(row.cells.len(), extent.columns);
        }
    }

    #[test]
    fn prop_coalesce_recovers_placed_cells(rows in table_strategy()) {
        let warehouse = Warehouse::build(&rows);
        let mut gap = gap_ids();
        let grid = materialize(&warehouse, &mut gap, false);
        let details = coalesce(&grid, same_element);

        let mut recovered = 0;
        for (r, row) in details.iter().enumerate() {
            for detail in &row.details {
                if detail.element > GAP_BASE {
                    prop_assert_eq!(detail.span().rowspan, 1);
                    prop_assert_eq!(detail.span().colspan, 1);
                    prop_assert!(detail.is_new);
                    continue;
                }
                recovered += 1;
                let placed = warehouse
                    .find_item(&detail.element, same_element)
                    .expect("detail refers to a placed cell");
                prop_assert_eq!(placed.anchor.row, r);
                prop_assert_eq!(placed.span(), detail.span());
            }
        }
        prop_assert_eq!(recovered, warehouse.cell_count());
    }

    #[test]
    fn prop_each_region_emitted_once(rows in table_strategy()) {
        let warehouse = Warehouse::build(&rows);
        let mut gap = gap_ids();
        let grid = materialize(&warehouse, &mut gap, false);
        let details = coalesce(&grid, same_element);

        let mut seen = FxHashSet::default();
        let mut area = 0;
        for detail in details.iter().flat_map(|row| &row.details) {
            prop_assert!(seen.insert(detail.element));
            area += detail.rowspan * detail.colspan;
        }
        prop_assert_eq!(area, warehouse.grid().area());
    }

    #[test]
    fn prop_subgrid_stays_in_extent(rows in table_strategy()) {
        let warehouse = Warehouse::build(&rows);
        let extent = warehouse.grid();
        let mut gap = gap_ids();
        let grid = materialize(&warehouse, &mut gap, false);

        for r in 0..extent.rows {
            for c in 0..extent.columns {
                let span = subgrid(&grid, r, c, same_element);
                prop_assert!(span.rowspan >= 1 && span.colspan >= 1);
                prop_assert!(r + span.rowspan <= extent.rows);
                prop_assert!(c + span.colspan <= extent.columns);
            }
        }
    }

    #[test]
    fn prop_details_rebuild_to_same_layout(rows in table_strategy()) {
        let warehouse = Warehouse::build(&rows);
        let mut gap = gap_ids();
        let grid = materialize(&warehouse, &mut gap, false);
        let details = coalesce(&grid, same_element);

        // Writing the details back out as rows and reconciling again must be
        // a fixed point: same anchors, same spans, no new gaps.
        let rebuilt: Vec<Row<u32>> = details
            .iter()
            .map(|row| Row::new(
                row.details
                    .iter()
                    .map(|d| Cell::with_spans(d.element, d.rowspan, d.colspan))
                    .collect(),
                row.section,
            ))
            .collect();
        let again = Warehouse::build(&rebuilt);
        prop_assert!(again.diagnostics().is_empty());
        prop_assert_eq!(again.grid(), warehouse.grid());

        let mut no_gap = || -> u32 { panic!("rebuilt table has no gaps") };
        let regrid = materialize(&again, &mut no_gap, false);
        let redetails = coalesce(&regrid, same_element);

        let spans = |rows: &[tablegrid::RowDetails<u32>]| -> Vec<Vec<(u32, usize, usize)>> {
            rows.iter()
                .map(|row| row.details.iter().map(|d| (d.element, d.rowspan, d.colspan)).collect())
                .collect()
        };
        prop_assert_eq!(spans(&details), spans(&redetails));
    }

    #[test]
    fn prop_warehouse_cells_never_overlap(rows in table_strategy()) {
        let warehouse = Warehouse::build(&rows);
        let extent = warehouse.grid();

        let mut owners: FxHashMap<(usize, usize), u32> = FxHashMap::default();
        for detail in warehouse.just_cells() {
            for r in detail.anchor.row..detail.anchor.row + detail.rowspan {
                for c in detail.anchor.column..detail.anchor.column + detail.colspan {
                    prop_assert!(extent.contains(r, c));
                    prop_assert!(owners.insert((r, c), *detail.element).is_none());
                    let covering = warehouse.access(r, c).map(|d| *d.element);
                    prop_assert_eq!(covering, Some(*detail.element));
                }
            }
        }
    }
}
