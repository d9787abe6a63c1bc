use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Worksheet};
use tracing::warn;

use crate::gst::returns::error::Result;
use crate::gst::returns::model::Cell;
use crate::gst::returns::workbook::{Sheet, Workbook};

/// Placeholder sheet written when there is nothing else to emit; an xlsx
/// package must contain at least one worksheet.
pub const PLACEHOLDER_SHEET: &str = "Sheet1";

const HEADER_FILL: u32 = 0x1F4E79;
const HEADER_ROW_HEIGHT: f64 = 30.0;
const MIN_COLUMN_WIDTH: usize = 12;
const MAX_COLUMN_WIDTH: usize = 30;

/// Worksheet limits of the xlsx format.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;
const MAX_STRING_CHARS: usize = 32_767;

/// Serializes the workbook into xlsx bytes.
pub fn write_workbook(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut workbook_writer = rust_xlsxwriter::Workbook::new();
    let styles = Styles::new();

    for sheet in workbook.sheets() {
        let worksheet = workbook_writer.add_worksheet();
        write_sheet(worksheet, sheet, &styles)?;
    }

    if workbook.is_empty() {
        workbook_writer.add_worksheet().set_name(PLACEHOLDER_SHEET)?;
    }

    Ok(workbook_writer.save_to_buffer()?)
}

struct Styles {
    header: Format,
    body: Format,
}

impl Styles {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);
        let body = Format::new()
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);
        Self { header, body }
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, styles: &Styles) -> Result<()> {
    worksheet.set_name(sheet.name())?;

    let rows = sheet.rows();
    if rows.len() > MAX_ROWS {
        warn!(
            sheet = sheet.name(),
            rows = rows.len(),
            limit = MAX_ROWS,
            "sheet has more rows than xlsx allows, extra rows dropped"
        );
    }
    let widest = rows.iter().map(Vec::len).max().unwrap_or_default();
    if widest > MAX_COLUMNS {
        warn!(
            sheet = sheet.name(),
            columns = widest,
            limit = MAX_COLUMNS,
            "sheet has more columns than xlsx allows, extra columns dropped"
        );
    }

    for (row_idx, cells) in rows.iter().take(MAX_ROWS).enumerate() {
        let format = if row_idx == 0 {
            &styles.header
        } else {
            &styles.body
        };
        for (col_idx, cell) in cells.iter().take(MAX_COLUMNS).enumerate() {
            write_cell(worksheet, row_idx as u32, col_idx as u16, cell, format)?;
        }
    }

    let header = sheet.header();
    if !header.is_empty() {
        worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;
    }
    for (col_idx, title) in header.iter().take(MAX_COLUMNS).enumerate() {
        worksheet.set_column_width(col_idx as u16, column_width(title) as f64)?;
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: &Format,
) -> Result<()> {
    match cell {
        Cell::Empty => {}
        Cell::Text(value) => {
            let value = fit_string(value, row, col);
            worksheet.write_string_with_format(row, col, value, format)?;
        }
        Cell::Number(value) => {
            worksheet.write_number_with_format(row, col, *value, format)?;
        }
        Cell::Boolean(value) => {
            worksheet.write_boolean_with_format(row, col, *value, format)?;
        }
    }
    Ok(())
}

/// Cuts text down to the longest string a worksheet cell may hold.
fn fit_string(value: &str, row: u32, col: u16) -> &str {
    match value.char_indices().nth(MAX_STRING_CHARS) {
        Some((end, _)) => {
            warn!(
                row,
                col,
                chars = value.chars().count(),
                limit = MAX_STRING_CHARS,
                "cell text truncated to the xlsx limit"
            );
            &value[..end]
        }
        None => value,
    }
}

fn column_width(title: &str) -> usize {
    (title.chars().count().max(MIN_COLUMN_WIDTH) + 2).min(MAX_COLUMN_WIDTH)
}
