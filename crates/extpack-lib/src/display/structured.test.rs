use super::*;
use crate::display::test_utils::create_test_styling;

#[test]
fn test_table_aligns_columns() {
    let styling = create_test_styling();
    let display = StructuredDisplay::new(&styling);
    let lines = display
        .table()
        .header(&["Name", "Version"])
        .row(&["python", "2024.1.0"])
        .row(&["go", "0.41.0"])
        .render_lines();

    assert_eq!(
        lines,
        vec![
            "Name   | Version",
            "-------+---------",
            "python | 2024.1.0",
            "go     | 0.41.0",
        ]
    );
}

#[test]
fn test_table_without_rows_or_headers_is_empty() {
    let styling = create_test_styling();
    let display = StructuredDisplay::new(&styling);
    assert!(display.table().render_lines().is_empty());
}

#[test]
fn test_table_truncates_wide_cells() {
    let styling = create_test_styling();
    let display = StructuredDisplay::new(&styling);
    let long = "x".repeat(200);
    let lines = display.table().row(&[&long]).render_lines();

    assert_eq!(lines.len(), 1);
    assert_eq!(measure_text_width(&lines[0]), MAX_COLUMN_WIDTH);
    assert!(lines[0].ends_with("..."));
}

#[test]
fn test_short_rows_are_padded() {
    let styling = create_test_styling();
    let display = StructuredDisplay::new(&styling);
    let lines = display
        .table()
        .header(&["A", "B"])
        .row(&["only"])
        .render_lines();
    assert_eq!(lines[2], "only |");
}

#[test]
fn test_pairs_align_keys() {
    let styling = create_test_styling();
    let display = StructuredDisplay::new(&styling);
    let lines = display.render_pairs(&[("Name", "web"), ("Version", "0.0.1")]);
    assert_eq!(lines, vec!["Name    | web", "Version | 0.0.1"]);
}
