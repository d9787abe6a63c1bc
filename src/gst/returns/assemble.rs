use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::gst::returns::classify::{Category, classify, strip_upload_prefix};
use crate::gst::returns::error::Result;
use crate::gst::returns::io::csv_read::parse_records;
use crate::gst::returns::io::excel_write;
use crate::gst::returns::io::template::load_template;
use crate::gst::returns::model::Record;
use crate::gst::returns::workbook::{Workbook, merge_into};

/// A source file handed to the assembler: its name and its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// What happened to one source file during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Rows were written to the category sheet.
    Merged {
        category: Category,
        rows: usize,
        created_sheet: bool,
    },
    /// The file name carries no category keyword.
    Unclassified,
    /// The file had no data rows.
    Empty { category: Category },
    /// The category's template sheet has no header row to map columns onto.
    Headerless { category: Category },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Per-file outcomes of a generation run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub files: Vec<FileReport>,
    /// Number of distinct category sheets that received rows.
    pub sheets_processed: usize,
}

impl GenerationReport {
    fn record(&mut self, name: &str, outcome: FileOutcome) {
        self.files.push(FileReport {
            name: name.to_string(),
            outcome,
        });
    }

    /// Total number of data rows written across all files.
    pub fn rows_written(&self) -> usize {
        self.files
            .iter()
            .map(|file| match file.outcome {
                FileOutcome::Merged { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }

    /// Number of files that were skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|file| !matches!(file.outcome, FileOutcome::Merged { .. }))
            .count()
    }
}

/// Serialized workbook together with the report describing how it was built.
#[derive(Debug, Clone)]
pub struct Generated {
    pub bytes: Vec<u8>,
    pub report: GenerationReport,
}

/// Assembles source files into a return workbook, optionally on top of a
/// template.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    template: Vec<u8>,
}

impl Assembler {
    /// Creates an assembler that starts from an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `bytes` as the xlsx template for every generation run.
    pub fn with_template(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.template = bytes.into();
        self
    }

    /// Builds the workbook and serializes it to xlsx bytes.
    pub fn generate(&self, files: &[SourceFile]) -> Result<Vec<u8>> {
        Ok(self.generate_with_report(files)?.bytes)
    }

    /// Builds and serializes the workbook, also returning the per-file report.
    #[instrument(level = "info", skip_all, fields(files = files.len()))]
    pub fn generate_with_report(&self, files: &[SourceFile]) -> Result<Generated> {
        let (workbook, report) = self.assemble(files);
        let bytes = excel_write::write_workbook(&workbook)?;
        info!(
            sheets = report.sheets_processed,
            rows = report.rows_written(),
            skipped = report.skipped(),
            bytes = bytes.len(),
            "workbook generated"
        );
        Ok(Generated { bytes, report })
    }

    /// Builds the in-memory workbook without serializing it.
    pub fn assemble(&self, files: &[SourceFile]) -> (Workbook, GenerationReport) {
        let mut workbook = load_template(&self.template);
        let report = merge_files(&mut workbook, files);
        (workbook, report)
    }
}

/// Generates a workbook from `files`, using `template` when it decodes.
pub fn generate(files: &[SourceFile], template: &[u8]) -> Result<Vec<u8>> {
    Assembler::new().with_template(template).generate(files)
}

fn merge_files(workbook: &mut Workbook, files: &[SourceFile]) -> GenerationReport {
    let mut report = GenerationReport::default();
    let mut touched: BTreeSet<Category> = BTreeSet::new();

    for file in files {
        let Some(category) = classify(strip_upload_prefix(&file.name)) else {
            info!(file = %file.name, "no category keyword in file name, skipping");
            report.record(&file.name, FileOutcome::Unclassified);
            continue;
        };

        let mut records = parse_records(&file.content);
        if records.is_empty() {
            info!(file = %file.name, %category, "no data rows, skipping");
            report.record(&file.name, FileOutcome::Empty { category });
            continue;
        }
        records.iter_mut().for_each(Record::trim_values);

        let outcome = merge_into(workbook, category, &records);
        if outcome.rows_written == 0 {
            report.record(&file.name, FileOutcome::Headerless { category });
            continue;
        }
        debug!(file = %file.name, first_row = outcome.first_row, "merge placement");
        info!(
            file = %file.name,
            %category,
            rows = outcome.rows_written,
            "merged file"
        );
        touched.insert(category);
        report.record(
            &file.name,
            FileOutcome::Merged {
                category,
                rows: outcome.rows_written,
                created_sheet: outcome.created_sheet,
            },
        );
    }

    report.sheets_processed = touched.len();
    report
}
