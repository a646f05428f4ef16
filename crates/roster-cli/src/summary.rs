use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_map::SchemaRegistry;
use roster_model::{ColumnMapping, CommitTally, ValidationIssue};
use roster_validate::IssueSummary;

use roster_cli::pipeline::ImportOutcome;

pub fn print_fields(registry: &SchemaRegistry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Recognised columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in registry.list_fields() {
        table.add_row(vec![
            Cell::new(field.key.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.label),
            Cell::new(if field.required { "yes" } else { "no" }),
            Cell::new(field.aliases.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_outcome(outcome: &ImportOutcome) {
    println!("File: {}", outcome.file_name);
    println!("Rows: {}", outcome.rows);
    print_mapping(&outcome.registry, &outcome.mapping, &outcome.unmapped);
    print_issues(&outcome.issues);
    if let Some(tally) = &outcome.tally {
        print_tally(tally);
        if let Some(path) = &outcome.output {
            println!("Output: {}", path.display());
        }
    } else if outcome.dry_run && outcome.issues.is_empty() {
        println!("Dry run: {} row(s) ready to import.", outcome.rows);
    }
}

fn print_mapping(registry: &SchemaRegistry, mapping: &ColumnMapping, unmapped: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Column")]);
    apply_table_style(&mut table);
    for field in registry.list_fields() {
        let column = match mapping.get(field.key) {
            Some(column) => Cell::new(column),
            None => Cell::new("unmapped").fg(Color::Red),
        };
        table.add_row(vec![Cell::new(field.label), column]);
    }
    println!("{table}");
    if !unmapped.is_empty() {
        println!("Ignored columns: {}", unmapped.join(", "));
    }
}

fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let summary = IssueSummary::from_issues(issues);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Problem"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.sheet_row()),
            Cell::new(issue.field.as_str()),
            Cell::new(issue.kind.label()).fg(Color::Red),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
    eprintln!(
        "{} issue(s) in {} row(s); fix the file and upload it again.",
        summary.total,
        summary.affected_rows()
    );
}

fn print_tally(tally: &CommitTally) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Imported"),
        header_cell("Failed"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(tally.succeeded).fg(Color::Green),
        count_cell(tally.failed),
        Cell::new(tally.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if tally.has_failures() {
        let mut failures = Table::new();
        failures.set_header(vec![header_cell("Row"), header_cell("Reason")]);
        apply_issue_table_style(&mut failures);
        align_column(&mut failures, 0, CellAlignment::Right);
        for failure in &tally.failures {
            failures.add_row(vec![
                Cell::new(failure.row_index + 2),
                Cell::new(&failure.message),
            ]);
        }
        println!("{failures}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(Color::Red)
    }
}
