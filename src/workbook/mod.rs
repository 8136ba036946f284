//! Spreadsheet input and output
//!
//! This module reads the URL table from an `.xlsx` workbook and writes
//! the merged results to a new, timestamped workbook.

pub mod reader;
pub mod table;
pub mod writer;

// Re-export commonly used items
pub use reader::{InputSheet, read_input, read_table};
pub use table::{Cell, Table};
pub use writer::{output_path, write_table};
