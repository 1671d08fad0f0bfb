//! Terminal preview of the leading rows of a table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table as TextTable};

use recode_model::{CellValue, Table};

/// Rows shown by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Builds the preview grid for the first `limit` rows.
pub fn preview_table(table: &Table, limit: usize) -> TextTable {
    let mut grid = TextTable::new();
    grid.load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    grid.set_header(table.columns.iter().map(|column| header_cell(column)));
    for row in table.rows.iter().take(limit) {
        grid.add_row(table.columns.iter().map(|column| value_cell(row.get(column))));
    }
    grid
}

/// `showing N of M rows`.
pub fn preview_footer(table: &Table, limit: usize) -> String {
    format!("showing {} of {} rows", table.len().min(limit), table.len())
}

/// Preview grid followed by the footer line.
pub fn render_preview(table: &Table, limit: usize) -> String {
    format!(
        "{}\n{}",
        preview_table(table, limit),
        preview_footer(table, limit)
    )
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Empty => Cell::new(""),
        CellValue::Number(_) => Cell::new(value).fg(Color::Yellow),
        CellValue::Text(text) => Cell::new(text),
    }
}
