use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use libmap_cli::pipeline::RunSummary;
use libmap_output::ColumnMap;

pub fn print_summary(summary: &RunSummary) {
    match &summary.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("Libraries: {}", summary.libraries);

    let mut sources = Table::new();
    sources.set_header(vec![
        header_cell("Source"),
        header_cell("Files"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut sources);
    align_column(&mut sources, 1, CellAlignment::Right);
    align_column(&mut sources, 2, CellAlignment::Right);
    for source in &summary.sources {
        sources.add_row(vec![
            Cell::new(source.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.files),
            Cell::new(source.rows),
        ]);
    }
    println!("{sources}");

    let mut linkage = Table::new();
    linkage.set_header(vec![header_cell("Demographics from"), header_cell("Libraries")]);
    apply_table_style(&mut linkage);
    align_column(&mut linkage, 1, CellAlignment::Right);
    linkage.add_row(vec![
        Cell::new(summary.fine_geography.as_str()),
        count_cell(summary.linkage.fine, Color::Green),
    ]);
    linkage.add_row(vec![
        Cell::new("zip"),
        count_cell(summary.linkage.zip, Color::Green),
    ]);
    linkage.add_row(vec![
        Cell::new("none"),
        count_cell(summary.linkage.unmatched, Color::Yellow),
    ]);
    if let (Some(counties), Some(matched)) = (summary.election_counties, summary.election_matched)
    {
        linkage.add_row(vec![
            Cell::new(format!("election ({counties} counties)")),
            count_cell(matched, Color::Green),
        ]);
    }
    println!("{linkage}");
    println!("Columns: {}", summary.columns);
}

pub fn print_columns(map: &ColumnMap) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Output"),
        header_cell("Source column"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, mapping) in map.iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx),
            Cell::new(&mapping.output).add_attribute(Attribute::Bold),
            Cell::new(&mapping.source),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
