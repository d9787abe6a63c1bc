//! Adapters between the in-memory workbook and external formats: delimited
//! source text, xlsx templates, and the xlsx output package.

pub mod csv_read;
pub mod excel_write;
pub mod template;
