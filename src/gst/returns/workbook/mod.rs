//! In-memory workbook assembled from the template and the merged sources.

pub mod merge;

pub use merge::{MergeOutcome, merge_into};

use crate::gst::returns::model::Cell;

static EMPTY_CELL: Cell = Cell::Empty;

/// Rectangle spanning every cell of a sheet that holds content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsedRange {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl UsedRange {
    fn single(row: usize, col: usize) -> Self {
        Self {
            first_row: row,
            last_row: row,
            first_col: col,
            last_col: col,
        }
    }

    fn include(&mut self, row: usize, col: usize) {
        self.first_row = self.first_row.min(row);
        self.last_row = self.last_row.max(row);
        self.first_col = self.first_col.min(col);
        self.last_col = self.last_col.max(col);
    }
}

/// A named worksheet. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    used: Option<UsedRange>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            used: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw cell grid. Rows may be ragged; missing positions are empty.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the cell at `(row, col)`, or an empty cell outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Stores `cell` at `(row, col)`, growing the grid as needed.
    ///
    /// The used range is left untouched; callers decide when a write extends
    /// the tracked extent.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        cells[col] = cell;
    }

    /// Trimmed text of every header cell, in column order.
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| cell.display_text().trim().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn used_range(&self) -> Option<UsedRange> {
        self.used
    }

    /// Grows the tracked used range so that it covers `(row, col)`.
    pub fn extend_used_range(&mut self, row: usize, col: usize) {
        match &mut self.used {
            Some(range) => range.include(row, col),
            None => self.used = Some(UsedRange::single(row, col)),
        }
    }

    /// Rebuilds the used range by scanning every cell for content.
    pub fn recompute_used_range(&mut self) {
        let mut used: Option<UsedRange> = None;
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.has_content() {
                    continue;
                }
                match &mut used {
                    Some(range) => range.include(row, col),
                    None => used = Some(UsedRange::single(row, col)),
                }
            }
        }
        self.used = used;
    }

    /// First row available for appended data: directly below the used
    /// range, and never above row 1.
    pub fn append_row(&self) -> usize {
        self.used
            .map(|range| range.last_row + 1)
            .unwrap_or(1)
            .max(1)
    }

    /// Number of rows below the header that lie inside the used range.
    pub fn data_row_count(&self) -> usize {
        self.append_row() - 1
    }
}

/// Ordered collection of sheets making up the output document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates a workbook without any sheets.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Finds a sheet by name, ignoring case and surrounding whitespace.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.position(name).map(|index| &self.sheets[index])
    }

    /// Mutable variant of [`Workbook::sheet`].
    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.position(name).map(|index| &mut self.sheets[index])
    }

    /// Appends `sheet` after the existing sheets and returns it.
    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Sheet {
        self.sheets.push(sheet);
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.sheets
            .iter()
            .position(|sheet| sheet.name.trim().eq_ignore_ascii_case(name))
    }
}
