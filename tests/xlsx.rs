mod common;

use calamine::{Data, Reader, Xlsx, open_workbook};
use grade_table::{
    assemble::ResultTable,
    data::CellValue,
    document::NAME_FIELD,
    xlsx::{MIN_COLUMN_WIDTH, SHEET_NAME, SheetPlan, write_workbook},
};

use common::TestWorkspace;

fn sample_table() -> ResultTable {
    ResultTable::from_columns([
        (
            NAME_FIELD,
            vec![CellValue::from("Aalto Anna"), CellValue::from("Berg Ben")],
        ),
        ("Math", vec![CellValue::Number(15), CellValue::empty()]),
        ("KE01", vec![CellValue::from("X"), CellValue::from("5")]),
    ])
}

#[test]
fn plan_pads_but_never_truncates() {
    let table = sample_table();
    assert_eq!(SheetPlan::new(&table, None).rows.len(), 2);
    assert_eq!(SheetPlan::new(&table, Some(1)).rows.len(), 2);
    assert_eq!(SheetPlan::new(&table, Some(2)).rows.len(), 2);

    let padded = SheetPlan::new(&table, Some(6));
    assert_eq!(padded.rows.len(), 6);
    assert!(padded.rows[2..].iter().flatten().all(CellValue::is_empty));
    assert_eq!(padded.field_width, MIN_COLUMN_WIDTH);
}

#[test]
fn workbook_round_trips_values_and_types() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("class.xlsx");
    write_workbook(&SheetPlan::new(&sample_table(), Some(4)), &path).expect("write workbook");

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("open workbook");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).expect("sheet range");

    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String(NAME_FIELD.to_string()))
    );
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(15.0)));
    assert_eq!(range.get_value((2, 0)), Some(&Data::String("Berg Ben".into())));
    assert_eq!(range.get_value((2, 2)), Some(&Data::String("5".into())));
}
