//! Core library for the gst-returns command line application.
//!
//! The library turns batches of delimited sales exports into a single GST
//! return workbook. Source files are classified by name
//! ([`gst::returns::classify`]), parsed ([`gst::returns::io::csv_read`]),
//! reconciled against the per-category column tables in
//! [`gst::returns::schema`], typed by [`gst::returns::normalize`], and merged
//! into template or freshly created sheets by [`gst::returns::workbook`].
//! [`gst::returns::assemble`] drives the whole run and serializes the result.

pub mod gst;

pub use gst::returns::{
    Result, ReturnsError, assemble, classify, error, io, model, normalize, schema, workbook,
};
