use std::io::Cursor;

use calamine::{DataType, Range, Reader, Xlsx};
use tracing::{debug, instrument, warn};

use crate::gst::returns::error::Result;
use crate::gst::returns::model::Cell;
use crate::gst::returns::workbook::{Sheet, Workbook};

/// Builds the starting workbook from template bytes.
///
/// A template that cannot be decoded (including an empty byte slice) is not
/// fatal: the failure is logged and an empty workbook is returned instead.
#[instrument(level = "debug", skip_all, fields(bytes = bytes.len()))]
pub fn load_template(bytes: &[u8]) -> Workbook {
    if bytes.is_empty() {
        debug!("no template supplied, starting from an empty workbook");
        return Workbook::new();
    }

    match read_template(bytes) {
        Ok(workbook) => {
            debug!(sheet_count = workbook.sheets().len(), "template loaded");
            workbook
        }
        Err(error) => {
            warn!(%error, "template could not be decoded, starting from an empty workbook");
            Workbook::new()
        }
    }
}

/// Decodes xlsx bytes into a workbook, keeping sheet order and absolute cell
/// positions.
pub fn read_template(bytes: &[u8]) -> Result<Workbook> {
    let mut reader: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let names = reader.sheet_names().to_owned();

    let mut workbook = Workbook::new();
    for name in &names {
        let range = match reader.worksheet_range(name) {
            Some(result) => result?,
            None => Range::empty(),
        };
        workbook.add_sheet(sheet_from_range(name, &range));
    }
    Ok(workbook)
}

fn sheet_from_range(name: &str, range: &Range<DataType>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

    for (row, col, value) in range.cells() {
        let cell = cell_from_data(value);
        if cell == Cell::Empty {
            continue;
        }
        sheet.set_cell(row_offset as usize + row, col_offset as usize + col, cell);
    }

    sheet.recompute_used_range();
    sheet
}

fn cell_from_data(value: &DataType) -> Cell {
    match value {
        DataType::Empty => Cell::Empty,
        DataType::String(text) => Cell::Text(text.clone()),
        DataType::Float(number) => Cell::Number(*number),
        DataType::Int(number) => Cell::Number(*number as f64),
        DataType::Bool(flag) => Cell::Boolean(*flag),
        other => Cell::Text(other.to_string()),
    }
}
