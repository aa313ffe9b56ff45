//! Table types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::util::{display_width, split_nonempty};

/// Cell delimiter inside a table row.
pub const CELL_DELIMITER: char = '|';

/// A table as rows of cells. Rows may have different cell counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Rows in source order
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Parse table text: one row per line, cells separated by `|`.
    ///
    /// Empty lines and empty cells are dropped.
    pub fn parse(text: &str) -> Self {
        let rows = split_nonempty(text, '\n')
            .map(|line| {
                split_nonempty(line, CELL_DELIMITER)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();
        Self { rows }
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate mutably over every cell.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.rows.iter_mut().flatten()
    }
}

/// Column widths per row class.
///
/// Rows are compared only with rows that have the same number of cells, so
/// every cell count gets its own list of column widths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    by_cell_count: HashMap<usize, Vec<usize>>,
}

impl ColumnWidths {
    /// Measure the widest cell of every (cell count, column) pair.
    pub fn measure(grid: &TableGrid) -> Self {
        let mut by_cell_count: HashMap<usize, Vec<usize>> = HashMap::new();
        for row in &grid.rows {
            let widths = by_cell_count
                .entry(row.len())
                .or_insert_with(|| vec![0; row.len()]);
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        Self { by_cell_count }
    }

    /// Width of `column` in rows with `cell_count` cells.
    pub fn get(&self, cell_count: usize, column: usize) -> usize {
        self.by_cell_count
            .get(&cell_count)
            .and_then(|widths| widths.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Widest row over all classes, counting one column per cell separator.
    pub fn max_row_len(&self) -> usize {
        self.by_cell_count
            .values()
            .map(|widths| widths.iter().sum::<usize>() + widths.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }
}
