use grade_table::{
    assemble::ResultTable,
    data::CellValue,
    document::NAME_FIELD,
    table::{render_rows, render_table},
};

#[test]
fn render_rows_aligns_text_left_and_numbers_right() {
    let headers = vec!["name".to_string(), "total".to_string()];
    let rows = vec![
        vec![CellValue::from("Ann"), CellValue::Number(7)],
        vec![CellValue::from("Bartholomew"), CellValue::Number(1234)],
    ];

    let rendered = render_rows(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "name         total",
            "-----------  -----",
            "Ann              7",
            "Bartholomew   1234",
        ]
    );
}

#[test]
fn render_rows_flattens_multiline_cells() {
    let headers = vec!["note".to_string()];
    let rows = vec![vec![CellValue::from("line1\nline2\tend")]];

    let rendered = render_rows(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "line1 line2 end");
}

#[test]
fn render_table_counts_characters_for_width() {
    let table = ResultTable::from_columns([
        (NAME_FIELD, vec![CellValue::from("Äänä Öljy")]),
        ("KE01", vec![CellValue::from("X")]),
    ]);

    let rendered = render_table(&table);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Opiskelijan nimi  KE01");
    assert_eq!(lines[2], "Äänä Öljy         X");
}
