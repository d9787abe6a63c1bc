use tracing::{debug, instrument, warn};

use crate::gst::returns::classify::Category;
use crate::gst::returns::model::{Cell, Record};
use crate::gst::returns::normalize::normalize;
use crate::gst::returns::schema::{self, ColumnSpec};
use crate::gst::returns::workbook::{Sheet, Workbook};

/// Summary of a single [`merge_into`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Whether the call had to create the category sheet.
    pub created_sheet: bool,
    /// Row index of the first written data row.
    pub first_row: usize,
    /// Number of data rows written.
    pub rows_written: usize,
}

/// Writes `records` into the sheet owned by `category`.
///
/// Without an existing sheet, a new one is created whose header row is the
/// first record's own headers. With an existing (template) sheet, rows are
/// appended below its used range, following the template's column order and
/// resolving each column through the category's alias table.
#[instrument(level = "debug", skip_all, fields(%category, records = records.len()))]
pub fn merge_into(workbook: &mut Workbook, category: Category, records: &[Record]) -> MergeOutcome {
    if records.is_empty() {
        return MergeOutcome {
            created_sheet: false,
            first_row: 0,
            rows_written: 0,
        };
    }

    match workbook.sheet_mut(category.sheet_name()) {
        Some(sheet) => append_rows(sheet, category, records),
        None => {
            let sheet = workbook.add_sheet(Sheet::new(category.sheet_name()));
            create_from_records(sheet, records)
        }
    }
}

fn create_from_records(sheet: &mut Sheet, records: &[Record]) -> MergeOutcome {
    let headers: Vec<String> = records[0].headers().map(str::to_string).collect();

    for (col, header) in headers.iter().enumerate() {
        sheet.set_cell(0, col, Cell::text(header.as_str()));
    }
    for (index, record) in records.iter().enumerate() {
        for (col, header) in headers.iter().enumerate() {
            let raw = record.get(header).unwrap_or_default();
            sheet.set_cell(index + 1, col, normalize(header, raw));
        }
    }

    let last_col = headers.len().saturating_sub(1);
    sheet.extend_used_range(0, 0);
    sheet.extend_used_range(records.len(), last_col);
    debug!(
        sheet = sheet.name(),
        columns = headers.len(),
        "created sheet from source headers"
    );

    MergeOutcome {
        created_sheet: true,
        first_row: 1,
        rows_written: records.len(),
    }
}

struct TargetColumn<'h> {
    index: usize,
    name: &'h str,
    spec: Option<&'static ColumnSpec>,
}

impl TargetColumn<'_> {
    fn resolve<'r>(&self, record: &'r Record) -> &'r str {
        record
            .get(self.name)
            .or_else(|| self.spec.and_then(|spec| spec.resolve(record)))
            .or_else(|| record.get_ignore_case(self.name))
            .unwrap_or_default()
    }
}

fn append_rows(sheet: &mut Sheet, category: Category, records: &[Record]) -> MergeOutcome {
    let header = sheet.header();
    let columns: Vec<TargetColumn<'_>> = header
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(index, name)| TargetColumn {
            index,
            name: name.as_str(),
            spec: schema::column_spec(category, name),
        })
        .collect();

    let first_row = sheet.append_row();
    let Some(last_col) = columns.last().map(|column| column.index) else {
        warn!(
            sheet = sheet.name(),
            "template sheet has no header row, nothing appended"
        );
        return MergeOutcome {
            created_sheet: false,
            first_row,
            rows_written: 0,
        };
    };

    for (offset, record) in records.iter().enumerate() {
        for column in &columns {
            let cell = normalize(column.name, column.resolve(record));
            sheet.set_cell(first_row + offset, column.index, cell);
        }
    }

    sheet.extend_used_range(first_row + records.len() - 1, last_col);
    debug!(
        sheet = sheet.name(),
        first_row,
        columns = columns.len(),
        "appended rows below template data"
    );

    MergeOutcome {
        created_sheet: false,
        first_row,
        rows_written: records.len(),
    }
}
