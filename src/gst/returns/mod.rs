pub mod assemble;
pub mod classify;
pub mod error;
pub mod io;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod workbook;

pub use error::{Result, ReturnsError};
