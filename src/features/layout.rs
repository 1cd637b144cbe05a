//! Plain-text layout of dense grids and row details
//!
//! Used by the CLI to show what the engine produced. New cells are suffixed
//! with `*`; details print as `element[rowspan x colspan]`.

use std::fmt::{Display, Write};

use crate::core::grid::{RowCells, RowDetails};

/// Render a dense grid as an aligned text matrix, one line per row
pub fn format_grid<T: Display>(grid: &[RowCells<T>]) -> String {
    let labels: Vec<Vec<String>> = grid
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| {
                    if cell.is_new {
                        format!("{}*", cell.element)
                    } else {
                        cell.element.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let width = labels
        .iter()
        .flat_map(|row| row.iter().map(|label| label.chars().count()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (row, cells) in grid.iter().zip(&labels) {
        let _ = write!(output, "{:<5} |", row.section.tag());
        for label in cells {
            let _ = write!(output, " {:<width$}", label, width = width);
        }
        output.truncate(output.trim_end().len());
        output.push('\n');
    }
    output
}

/// Render row details, one line per row; covered rows print empty
pub fn format_details<T: Display>(rows: &[RowDetails<T>]) -> String {
    let mut output = String::new();
    for row in rows {
        let _ = write!(output, "{:<5} |", row.section.tag());
        for detail in &row.details {
            let _ = write!(
                output,
                " {}[{}x{}]{}",
                detail.element,
                detail.rowspan,
                detail.colspan,
                if detail.is_new { "*" } else { "" }
            );
        }
        output.push('\n');
    }
    output
}
