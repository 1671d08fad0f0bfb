use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recode_map::MappingReport;
use recode_model::MappingSet;
use recode_output::render_preview;

use crate::types::RunResult;

pub fn print_run_summary(result: &RunResult) {
    println!("Source: {}", result.source.display());
    println!("Mapping: {}", result.mapping.display());
    match &result.output {
        Some(path) => println!("Output ({}): {}", result.format, path.display()),
        None => println!("Output: dry run, nothing written"),
    }
    println!("{}", run_table(result));
    if result.preview_rows > 0 {
        println!();
        println!("Preview:");
        println!("{}", render_preview(&result.table, result.preview_rows));
    }
}

pub fn print_mappings(set: &MappingSet, report: &MappingReport) {
    println!("{}", mappings_table(set, report));
}

fn run_table(result: &RunResult) -> Table {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Result")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Source sheet"), Cell::new(&report.source_sheet)]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(report.rows)]);
    table.add_row(vec![
        Cell::new("Date columns"),
        if report.date_columns.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(report.date_columns.join(", "))
        },
    ]);
    table.add_row(vec![
        Cell::new("Mapping sheets"),
        Cell::new(report.mapping.sheets.len()),
    ]);
    table.add_row(vec![
        Cell::new("Mapping entries"),
        Cell::new(report.mapping.total_entries()),
    ]);
    table.add_row(vec![
        Cell::new("Substitutions"),
        count_cell(report.substitutions, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Duration"),
        dim_cell(format!("{} ms", report.duration.as_millis())),
    ]);
    table
}

fn mappings_table(set: &MappingSet, report: &MappingReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Rows"),
        header_cell("Entries"),
        header_cell("Dropped"),
        header_cell("Overwritten"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for sheet in &report.sheets {
        let column = if set.get(&sheet.sheet).is_some_and(|dict| !dict.is_empty()) {
            Cell::new(&sheet.sheet)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell(&sheet.sheet)
        };
        table.add_row(vec![
            column,
            Cell::new(sheet.rows),
            Cell::new(sheet.entries),
            count_cell(sheet.dropped, Color::Yellow),
            count_cell(sheet.overwritten, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.total_entries()).add_attribute(Attribute::Bold),
        count_cell(report.total_dropped(), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(report.total_overwritten(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
