//! HTML table reader
//!
//! Reads one table out of a parsed HTML document as rows of cells:
//! - picks the best table, or the one named by a CSS selector and index
//! - infers column headings, synthesizing `col0`, `col1`, ... when missing
//! - iterates rows lazily over the resolved table
//! - FFI interface taking HTML plus a JSON request

pub mod error;
pub mod ffi;
pub mod reader;
pub mod table;

pub use error::{Error, Result};
pub use ffi::*;
pub use reader::TableReader;
pub use table::*;
