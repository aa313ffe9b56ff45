//! `table` tag.
//!
//! Flags: `nb` draws no border (and implies `na`), `nc` skips cell
//! arithmetic, `na` keeps numbers left-aligned.
//!
//! Layout runs in three passes. Cells are first padded to their column
//! width, where columns are shared only by rows with the same cell count.
//! Every row is then stretched to the widest row (at least `width - 2`)
//! one space at a time, always widening the first shortest cell. Finally
//! the grid borders are derived from the `|` positions of adjacent rows.

use crate::expr::{evaluate, format_number};
use crate::model::{ColumnWidths, TableGrid, CELL_DELIMITER};
use crate::parser::Attributes;
use crate::render::Context;
use crate::util::{display_width, is_number_like, pad_left, pad_right};

/// Rendering flags of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableFlags {
    /// Draw the grid border
    pub border: bool,
    /// Evaluate cells as arithmetic
    pub calculate: bool,
    /// Right-align numeric cells
    pub align_numbers: bool,
}

impl TableFlags {
    /// Read flags from tag attributes.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let border = !attrs.has_flag("nb");
        Self {
            border,
            calculate: !attrs.has_flag("nc"),
            align_numbers: border && !attrs.has_flag("na"),
        }
    }
}

/// `<table>`.
pub fn table(ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    let flags = TableFlags::from_attributes(attrs);
    let mut grid = TableGrid::parse(content);
    if grid.is_empty() {
        return String::new();
    }
    if flags.calculate {
        calculate_cells(&mut grid);
    }
    render_grid(&mut grid, flags, ctx.width())
}

/// Replace every cell that evaluates as arithmetic with its result.
pub fn calculate_cells(grid: &mut TableGrid) {
    for cell in grid.cells_mut() {
        if let Ok(value) = evaluate(&cell.replace(',', ".")) {
            *cell = format_number(value);
        }
    }
}

/// Lay out a grid at document width `width`.
pub fn render_grid(grid: &mut TableGrid, flags: TableFlags, width: usize) -> String {
    let pads_left = |cell: &str| flags.align_numbers && is_number_like(cell);

    let widths = ColumnWidths::measure(grid);
    for row in &mut grid.rows {
        let count = row.len();
        for (column, cell) in row.iter_mut().enumerate() {
            let target = widths.get(count, column);
            *cell = if pads_left(cell) {
                pad_left(cell, target)
            } else {
                pad_right(cell, target)
            };
        }
    }

    let row_len = widths.max_row_len().max(width.saturating_sub(2));
    for row in &mut grid.rows {
        stretch_row(row, row_len, &pads_left);
    }

    if flags.border {
        let lines: Vec<String> = grid
            .rows
            .iter()
            .map(|row| format!("{d}{}{d}", row.join("|"), d = CELL_DELIMITER))
            .collect();
        draw_borders(&lines)
    } else {
        let mut out = String::new();
        for row in &grid.rows {
            for cell in row {
                out.push_str(cell);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

/// Widen the shortest cells of `row` until it spans `row_len` columns.
fn stretch_row(row: &mut [String], row_len: usize, pads_left: &impl Fn(&str) -> bool) {
    let mut lens: Vec<usize> = row.iter().map(|cell| display_width(cell)).collect();
    let current = lens.iter().sum::<usize>() + lens.len().saturating_sub(1);

    for _ in 0..row_len.saturating_sub(current) {
        let Some(shortest) = lens
            .iter()
            .enumerate()
            .min_by_key(|&(_, len)| *len)
            .map(|(i, _)| i)
        else {
            return;
        };
        let cell = &mut row[shortest];
        if pads_left(cell) {
            cell.insert(0, ' ');
        } else {
            cell.push(' ');
        }
        lens[shortest] += 1;
    }
}

/// Interleave `rows` with border lines, including top and bottom borders.
fn draw_borders(rows: &[String]) -> String {
    let pipes: Vec<Vec<bool>> = rows.iter().map(|row| pipe_columns(row)).collect();

    let mut out = Vec::with_capacity(rows.len() * 2 + 1);
    for (i, row) in rows.iter().enumerate() {
        let above = i.checked_sub(1).map(|j| pipes[j].as_slice());
        out.push(border_line(above, Some(pipes[i].as_slice())));
        out.push(row.clone());
    }
    out.push(border_line(pipes.last().map(Vec::as_slice), None));
    out.join("\n")
}

/// Display columns holding a `|`.
fn pipe_columns(row: &str) -> Vec<bool> {
    let mut columns = Vec::with_capacity(row.len());
    for ch in row.chars() {
        let width = display_width(ch.encode_utf8(&mut [0; 4]));
        if width == 0 {
            continue;
        }
        columns.push(ch == CELL_DELIMITER);
        columns.extend(std::iter::repeat(false).take(width - 1));
    }
    columns
}

fn border_line(above: Option<&[bool]>, below: Option<&[bool]>) -> String {
    let len = above
        .map_or(0, <[bool]>::len)
        .max(below.map_or(0, <[bool]>::len));
    let is_pipe = |row: Option<&[bool]>, i: usize| {
        row.and_then(|r| r.get(i)).copied().unwrap_or(false)
    };

    (0..len)
        .map(|i| {
            if is_pipe(above, i) || is_pipe(below, i) {
                '+'
            } else {
                '-'
            }
        })
        .collect()
}
