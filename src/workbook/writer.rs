use chrono::{DateTime, TimeZone};
use log::info;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use std::path::{Path, PathBuf};

use crate::core::constants::workbook;
use crate::core::{MailScrapeError, Result};
use crate::workbook::table::{Cell, Table};

/// `<input dir>/<prefix>_<YYYYMMDD_HHMMSS>.xlsx`.
///
/// When a file with that name already exists (two runs within one second) a
/// counter is appended, so earlier output is never overwritten.
pub fn output_path<Tz: TimeZone>(input: &Path, prefix: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let stamp = now.format(workbook::FILE_TIMESTAMP_FORMAT);

    let candidate = dir.join(format!("{prefix}_{stamp}.{}", workbook::EXTENSION));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| dir.join(format!("{prefix}_{stamp}_{n}.{}", workbook::EXTENSION)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Write a table to a new workbook with a single sheet
pub fn write_table(table: &Table, path: &Path, sheet: &str) -> Result<()> {
    let mut book = Workbook::new();
    let worksheet = book.add_worksheet();
    worksheet.set_name(sheet)?;

    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(workbook::DATE_FORMAT);
    let datetime_format = Format::new().set_num_format(workbook::DATETIME_FORMAT);
    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, header, &header_format)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let row_num = row_num(index + 1)?;
        for (col, cell) in row.iter().enumerate() {
            let col = col_num(col)?;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                Cell::Number(num) => {
                    worksheet.write_number(row_num, col, *num)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                Cell::DateTime(serial) => {
                    let format = if serial.fract() == 0.0 {
                        &date_format
                    } else {
                        &datetime_format
                    };
                    worksheet.write_number_with_format(row_num, col, *serial, format)?;
                }
            }
        }
    }

    book.save(path)?;
    info!("Wrote {} row(s) to {}", table.len(), path.display());
    Ok(())
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| {
        MailScrapeError::InvalidArgument(format!("column {index} is out of range for xlsx"))
    })
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| {
        MailScrapeError::InvalidArgument(format!("row {index} is out of range for xlsx"))
    })
}
