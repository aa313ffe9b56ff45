//! Structured data parsed from tag content before layout.

mod histogram;
mod table;

pub use histogram::{parse_entries, HistogramEntry, HistogramValue, NAME_DELIMITER};
pub use table::{ColumnWidths, TableGrid, CELL_DELIMITER};
