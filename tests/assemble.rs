use std::fs;
use std::io::Cursor;
use std::process::Command;

use calamine::{DataType, Reader, Xlsx};
use gst_returns::assemble::{self, Assembler, FileOutcome, SourceFile};
use gst_returns::classify::Category;
use tempfile::tempdir;

fn sheet_names(bytes: &[u8]) -> Vec<String> {
    let reader: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("valid xlsx package");
    reader.sheet_names().to_owned()
}

fn sheet_rows(bytes: &[u8], name: &str) -> Vec<Vec<DataType>> {
    let mut reader: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("valid xlsx package");
    let range = reader
        .worksheet_range(name)
        .expect("sheet present")
        .expect("sheet readable");
    range.rows().map(|row| row.to_vec()).collect()
}

fn text(value: &str) -> DataType {
    DataType::String(value.to_string())
}

fn b2b_files() -> Vec<SourceFile> {
    let header = "GSTIN/UIN of Recipient,Invoice Number,Taxable Value";
    vec![
        SourceFile::new(
            "sales_b2b.csv",
            format!("{header}\n27ABCDE1234F1Z5,INV001,1000\n"),
        ),
        SourceFile::new(
            "sales_b2b_2.csv",
            format!("{header}\n27XYZAB5678G1Z2,INV002,2500\n"),
        ),
    ]
}

fn template_bytes() -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let b2b = workbook.add_worksheet();
    b2b.set_name("b2b").unwrap();
    let header = [
        "GSTIN/UIN of Recipient",
        "Invoice Number",
        "Invoice date",
        "Place Of Supply",
        "Taxable Value",
    ];
    for (col, title) in header.iter().enumerate() {
        b2b.write_string(0, col as u16, *title).unwrap();
    }
    b2b.write_string(1, 0, "29AAACB1234C1Z9").unwrap();
    b2b.write_string(1, 1, "OPENING-1").unwrap();
    b2b.write_number(1, 4, 42).unwrap();

    let hsn = workbook.add_worksheet();
    hsn.set_name("hsn").unwrap();
    hsn.write_string(0, 0, "HSN").unwrap();
    hsn.write_string(0, 1, "Description").unwrap();
    workbook.save_to_buffer().unwrap()
}

#[test]
fn two_files_of_one_category_accumulate_in_order() {
    let bytes = assemble::generate(&b2b_files(), &[]).expect("workbook generated");

    assert_eq!(sheet_names(&bytes), vec!["b2b".to_string()]);
    let rows = sheet_rows(&bytes, "b2b");
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        vec![
            text("GSTIN/UIN of Recipient"),
            text("Invoice Number"),
            text("Taxable Value"),
        ]
    );
    assert_eq!(
        rows[1],
        vec![text("27ABCDE1234F1Z5"), text("INV001"), DataType::Float(1000.0)]
    );
    assert_eq!(
        rows[2],
        vec![text("27XYZAB5678G1Z2"), text("INV002"), DataType::Float(2500.0)]
    );
}

#[test]
fn template_layout_drives_column_order_and_aliases() {
    let files = vec![SourceFile::new(
        "1700000000_tally_b2b.csv",
        "Voucher Date,Party GSTIN/UIN,Voucher No.,Taxable Amount,Place of Supply\n\
         01-04-2024,27ABCDE1234F1Z5,T-1,\"1,234.50\",27-Maharashtra\n",
    )];

    let generated = Assembler::new()
        .with_template(template_bytes())
        .generate_with_report(&files)
        .expect("workbook generated");

    assert_eq!(
        sheet_names(&generated.bytes),
        vec!["b2b".to_string(), "hsn".to_string()]
    );
    let rows = sheet_rows(&generated.bytes, "b2b");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][4], text("Taxable Value"));
    assert_eq!(rows[1][1], text("OPENING-1"));
    assert_eq!(
        rows[2],
        vec![
            text("27ABCDE1234F1Z5"),
            text("T-1"),
            text("01-04-2024"),
            text("Maharashtra"),
            DataType::Float(1234.5),
        ]
    );
    assert_eq!(
        generated.report.files[0].outcome,
        FileOutcome::Merged {
            category: Category::B2b,
            rows: 1,
            created_sheet: false,
        }
    );

    let hsn = sheet_rows(&generated.bytes, "hsn");
    assert_eq!(hsn, vec![vec![text("HSN"), text("Description")]]);
}

#[test]
fn categories_without_template_sheet_are_appended() {
    let files = vec![SourceFile::new(
        "cdnur.csv",
        "UR Type,Note Number,Note Value\nB2CL,CN-9,\"5,000\"\n",
    )];

    let bytes = Assembler::new()
        .with_template(template_bytes())
        .generate(&files)
        .expect("workbook generated");

    assert_eq!(
        sheet_names(&bytes),
        vec!["b2b".to_string(), "hsn".to_string(), "cdnur".to_string()]
    );
    let rows = sheet_rows(&bytes, "cdnur");
    assert_eq!(rows[1], vec![text("B2CL"), text("CN-9"), DataType::Float(5000.0)]);
}

#[test]
fn generation_is_repeatable() {
    let assembler = Assembler::new().with_template(template_bytes());
    let mut files = b2b_files();
    files.push(SourceFile::new("hsn.csv", "HSN,Description\n8471,Laptops\n"));

    let first = assembler.generate(&files).expect("first run");
    let second = assembler.generate(&files).expect("second run");

    assert_eq!(sheet_names(&first), sheet_names(&second));
    for name in sheet_names(&first) {
        assert_eq!(sheet_rows(&first, &name), sheet_rows(&second, &name));
    }
}

#[test]
fn corrupt_template_falls_back_to_fresh_sheets() {
    let bytes = Assembler::new()
        .with_template(b"not an xlsx package".to_vec())
        .generate(&b2b_files())
        .expect("workbook generated");

    assert_eq!(sheet_names(&bytes), vec!["b2b".to_string()]);
    assert_eq!(sheet_rows(&bytes, "b2b").len(), 3);
}

#[test]
fn unclassified_inputs_still_produce_a_document() {
    let files = vec![SourceFile::new("readme.csv", "A,B\n1,2\n")];

    let generated = Assembler::new()
        .generate_with_report(&files)
        .expect("workbook generated");

    assert_eq!(sheet_names(&generated.bytes), vec!["Sheet1".to_string()]);
    assert_eq!(generated.report.sheets_processed, 0);
    assert_eq!(generated.report.files[0].outcome, FileOutcome::Unclassified);
}

#[test]
fn oversized_inputs_are_clipped_instead_of_aborting() {
    let long_name = "N".repeat(40_000);
    let wide_header: Vec<String> = (0..17_000).map(|col| format!("C{col}")).collect();
    let wide_row: Vec<String> = (0..17_000).map(|col| col.to_string()).collect();
    let files = vec![
        SourceFile::new(
            "b2b.csv",
            format!("Invoice Number,Receiver Name\nINV001,{long_name}\n"),
        ),
        SourceFile::new(
            "hsn.csv",
            format!("{}\n{}\n", wide_header.join(","), wide_row.join(",")),
        ),
    ];

    let bytes = assemble::generate(&files, &[]).expect("workbook generated");

    let b2b = sheet_rows(&bytes, "b2b");
    assert_eq!(b2b[1][0], text("INV001"));
    match &b2b[1][1] {
        DataType::String(name) => assert_eq!(name.chars().count(), 32_767),
        other => panic!("expected text, got {other:?}"),
    }
    let hsn = sheet_rows(&bytes, "hsn");
    assert_eq!(hsn[0].len(), 16_384);
    assert_eq!(hsn[1][16_383], DataType::Float(16_383.0));
}

#[test]
fn cli_writes_workbook_and_report() {
    let dir = tempdir().expect("temporary directory");
    let b2b_path = dir.path().join("sales_b2b.csv");
    let notes_path = dir.path().join("notes.csv");
    let template_path = dir.path().join("template.xlsx");
    let output_path = dir.path().join("gstr1.xlsx");
    let report_path = dir.path().join("report.json");
    fs::write(
        &b2b_path,
        "Invoice Number,Taxable Amt\nINV001,\"1,000\"\nINV002,2500\n",
    )
    .expect("csv written");
    fs::write(&notes_path, "Memo\nremember the milk\n").expect("notes written");
    fs::write(&template_path, template_bytes()).expect("template written");

    let status = Command::new(env!("CARGO_BIN_EXE_gst-returns"))
        .arg("assemble")
        .arg("--input")
        .arg(&b2b_path)
        .arg("--input")
        .arg(&notes_path)
        .arg("--template")
        .arg(&template_path)
        .arg("--output")
        .arg(&output_path)
        .arg("--report")
        .arg(&report_path)
        .env("RUST_LOG", "warn")
        .status()
        .expect("binary runs");
    assert!(status.success());

    let bytes = fs::read(&output_path).expect("output written");
    let rows = sheet_rows(&bytes, "b2b");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2][1], text("INV001"));
    assert_eq!(rows[2][4], DataType::Float(1000.0));
    assert_eq!(rows[3][4], DataType::Float(2500.0));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report written"))
            .expect("report parsed");
    assert_eq!(report["sheets_processed"], 1);
    assert_eq!(report["files"][0]["status"], "merged");
    assert_eq!(report["files"][1]["status"], "unclassified");
}

#[test]
fn cli_rejects_missing_input() {
    let dir = tempdir().expect("temporary directory");

    let output = Command::new(env!("CARGO_BIN_EXE_gst-returns"))
        .arg("assemble")
        .arg("--input")
        .arg(dir.path().join("missing_b2b.csv"))
        .arg("--output")
        .arg(dir.path().join("out.xlsx"))
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input file not found"));
}
