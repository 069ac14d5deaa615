use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;
use transfer_tools::{combine::COLUMNS, run};

enum Cell {
    Text(&'static str),
    Number(f64),
}

fn write_plan(path: &Path, headers: &[&str], rows: &[&[Cell]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, *header)
            .expect("header written");
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => worksheet
                    .write_string((row_idx + 1) as u32, col_idx as u16, *text)
                    .expect("text cell written"),
                Cell::Number(value) => worksheet
                    .write_number((row_idx + 1) as u32, col_idx as u16, *value)
                    .expect("number cell written"),
            };
        }
    }
    workbook.save(path).expect("workbook saved");
}

fn read_sheet(path: &Path, name: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook opened");
    let range = workbook
        .worksheet_range(name)
        .expect("sheet present")
        .expect("sheet read");
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

#[test]
fn combine_merges_plans_sorted_by_term_and_source() {
    let temp_dir = tempdir().expect("temporary directory");
    let as_path = temp_dir.path().join("as_plan.xlsx");
    let bs_path = temp_dir.path().join("bs_plan.xlsx");
    let equiv_path = temp_dir.path().join("equivalencies.xlsx");
    let output_path = temp_dir.path().join("combined.xlsx");

    write_plan(
        &as_path,
        &["Term", "Course_Name", "Credit_Hours"],
        &[
            &[Cell::Number(1.0), Cell::Text("ENGL 1301"), Cell::Number(3.0)],
            &[Cell::Number(2.0), Cell::Text("MATH 1342"), Cell::Number(4.0)],
        ],
    );
    write_plan(
        &bs_path,
        &["Term", "Name"],
        &[
            &[Cell::Number(1.0), Cell::Text("ENGL 1310")],
            &[Cell::Number(2.0), Cell::Text("MATH 2413")],
            &[Cell::Number(2.0), Cell::Text("CS 2500")],
        ],
    );
    write_plan(
        &equiv_path,
        &["Course_Code", "Equivalent Course Code"],
        &[
            &[Cell::Text("ENGL 1301"), Cell::Text("ENGL 1310")],
            &[Cell::Text("MATH 1342"), Cell::Text("MATH 2413")],
        ],
    );

    let output = run::combine(&as_path, &bs_path, &equiv_path, None, Some(&output_path))
        .expect("merge ran");
    assert_eq!(output.path, output_path);
    assert_eq!(output.plan.rows.len(), 3);

    let sheet = read_sheet(&output_path, "combined_plan");
    assert_eq!(sheet[0], COLUMNS.map(String::from).to_vec());
    assert_eq!(
        sheet[1],
        ["1", "AS", "✅", "ENGL 1301", "3", "ENGL 1310", "Transferred"]
    );
    assert_eq!(
        sheet[2],
        ["2", "AS", "✅", "MATH 1342", "4", "MATH 2413", "Transferred"]
    );
    assert_eq!(
        sheet[3],
        ["2", "BS", "", "", "", "CS 2500", "To complete at BS"]
    );
}

#[test]
fn term_falls_back_to_row_position_when_column_is_absent() {
    let temp_dir = tempdir().expect("temporary directory");
    let as_path = temp_dir.path().join("as_plan.xlsx");
    let bs_path = temp_dir.path().join("bs_plan.xlsx");
    let equiv_path = temp_dir.path().join("equivalencies.xlsx");
    let output_path = temp_dir.path().join("combined.xlsx");

    // The middle row has no course code. It is skipped, but the rows after it
    // keep their sheet positions as terms.
    write_plan(
        &as_path,
        &["Course_Name", "Credit_Hours"],
        &[
            &[Cell::Text("MATH 1342"), Cell::Number(4.0)],
            &[Cell::Text(""), Cell::Number(3.0)],
            &[Cell::Text("HIST 2300"), Cell::Number(3.0)],
        ],
    );
    write_plan(&bs_path, &["Name"], &[&[Cell::Text("MATH 2413")]]);
    write_plan(
        &equiv_path,
        &["Course_Code", "Equivalent Course Code"],
        &[&[Cell::Text("MATH 1342"), Cell::Text("MATH 2413")]],
    );

    run::combine(&as_path, &bs_path, &equiv_path, None, Some(&output_path)).expect("merge ran");

    let sheet = read_sheet(&output_path, "combined_plan");
    assert_eq!(sheet.len(), 3);
    assert_eq!(
        sheet[1],
        ["1", "AS", "✅", "MATH 1342", "4", "MATH 2413", "Transferred"]
    );
    assert_eq!(
        sheet[2],
        ["3", "AS", "❌", "HIST 2300", "3", "", "Not transferred"]
    );
}

#[test]
fn matched_bs_courses_are_consumed_including_duplicates() {
    let temp_dir = tempdir().expect("temporary directory");
    let as_path = temp_dir.path().join("as_plan.xlsx");
    let bs_path = temp_dir.path().join("bs_plan.xlsx");
    let equiv_path = temp_dir.path().join("equivalencies.xlsx");
    let output_path = temp_dir.path().join("combined.xlsx");

    write_plan(
        &as_path,
        &["Course_Name", "Credit_Hours"],
        &[
            &[Cell::Text("ENGL 1101"), Cell::Number(3.0)],
            &[Cell::Text("ENGL 1102"), Cell::Number(3.0)],
        ],
    );
    // The same BS course listed twice. Once matched, every occurrence is
    // dropped from the remaining list.
    write_plan(
        &bs_path,
        &["Name"],
        &[&[Cell::Text("ENGL 1310")], &[Cell::Text("ENGL 1310")]],
    );
    write_plan(
        &equiv_path,
        &["Course_Code", "Equivalent Course Code"],
        &[
            &[Cell::Text("ENGL 1101"), Cell::Text("ENGL 1310")],
            &[Cell::Text("ENGL 1102"), Cell::Text("ENGL 1310")],
        ],
    );

    let output = run::combine(&as_path, &bs_path, &equiv_path, None, Some(&output_path))
        .expect("merge ran");
    assert_eq!(output.plan.rows.len(), 2);

    let sheet = read_sheet(&output_path, "combined_plan");
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet[1][3], "ENGL 1101");
    assert_eq!(sheet[1][6], "Transferred");
    assert_eq!(sheet[2][3], "ENGL 1102");
    assert_eq!(sheet[2][6], "Transferred");
}

#[test]
fn first_listed_equivalent_wins_when_several_are_in_the_bs_plan() {
    let temp_dir = tempdir().expect("temporary directory");
    let as_path = temp_dir.path().join("as_plan.xlsx");
    let bs_path = temp_dir.path().join("bs_plan.xlsx");
    let equiv_path = temp_dir.path().join("equivalencies.xlsx");
    let output_path = temp_dir.path().join("combined.xlsx");

    write_plan(
        &as_path,
        &["Course_Name", "Credit_Hours"],
        &[&[Cell::Text("BIOL 1406"), Cell::Number(4.0)]],
    );
    write_plan(
        &bs_path,
        &["Name"],
        &[&[Cell::Text("BIOL 2401")], &[Cell::Text("BIOL 2402")]],
    );
    // Both codes in the Equivalent cell are in the BS plan. The first listed
    // one wins and is the only one consumed.
    write_plan(
        &equiv_path,
        &["Course_Code", "Equivalent Course Code"],
        &[&[Cell::Text("BIOL 1406"), Cell::Text("BIOL 2402; BIOL 2401")]],
    );

    let output = run::combine(&as_path, &bs_path, &equiv_path, None, Some(&output_path))
        .expect("merge ran");
    assert_eq!(output.plan.rows.len(), 2);

    let sheet = read_sheet(&output_path, "combined_plan");
    assert_eq!(sheet.len(), 3);
    assert_eq!(
        sheet[1],
        ["1", "AS", "✅", "BIOL 1406", "4", "BIOL 2402", "Transferred"]
    );
    assert_eq!(
        sheet[2],
        ["1", "BS", "", "", "", "BIOL 2401", "To complete at BS"]
    );
}

#[test]
fn labeled_terms_sort_after_numbered_terms() {
    let temp_dir = tempdir().expect("temporary directory");
    let as_path = temp_dir.path().join("as_plan.xlsx");
    let bs_path = temp_dir.path().join("bs_plan.xlsx");
    let equiv_path = temp_dir.path().join("equivalencies.xlsx");
    let output_path = temp_dir.path().join("combined.xlsx");

    write_plan(
        &as_path,
        &["Term", "Course_Name", "Credit_Hours"],
        &[&[
            Cell::Text("Fall 2025"),
            Cell::Text("HIST 2300"),
            Cell::Number(3.0),
        ]],
    );
    write_plan(&bs_path, &["Name"], &[&[Cell::Text("CS 2500")]]);
    write_plan(
        &equiv_path,
        &["Course_Code", "Equivalent Course Code"],
        &[&[Cell::Text("MATH 1342"), Cell::Text("MATH 2413")]],
    );

    run::combine(&as_path, &bs_path, &equiv_path, None, Some(&output_path)).expect("merge ran");

    let sheet = read_sheet(&output_path, "combined_plan");
    assert_eq!(sheet.len(), 3);
    assert_eq!(
        sheet[1],
        ["1", "BS", "", "", "", "CS 2500", "To complete at BS"]
    );
    assert_eq!(
        sheet[2],
        ["Fall 2025", "AS", "❌", "HIST 2300", "3", "", "Not transferred"]
    );
}
