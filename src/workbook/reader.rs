use calamine::{Data, Reader, Xlsx, open_workbook};
use log::{debug, info, warn};
use std::path::Path;

use crate::core::{MailScrapeError, Result};
use crate::workbook::table::{Cell, Table};

/// Input rows and the URL of each row, in row order
#[derive(Debug, Clone)]
pub struct InputSheet {
    pub table: Table,
    pub urls: Vec<String>,
}

/// Read `sheet` from an `.xlsx` workbook. The first row holds the headers and
/// must contain `url_column`.
pub fn read_input<P: AsRef<Path>>(path: P, sheet: &str, url_column: &str) -> Result<InputSheet> {
    let table = read_table(path.as_ref(), sheet)?;
    let urls = table
        .column(url_column)
        .ok_or_else(|| MailScrapeError::MissingColumn {
            column: url_column.to_string(),
            sheet: sheet.to_string(),
        })?;

    if table.is_empty() {
        warn!("Sheet '{sheet}' has a header row but no data rows");
    }
    info!(
        "Loaded {} URL(s) from sheet '{sheet}' of {}",
        urls.len(),
        path.as_ref().display()
    );
    Ok(InputSheet { table, urls })
}

/// Read a whole sheet into a table
pub fn read_table(path: &Path, sheet: &str) -> Result<Table> {
    if !path.is_file() {
        return Err(MailScrapeError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(MailScrapeError::MissingSheet {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| MailScrapeError::EmptySheet(sheet.to_string()))?
        .iter()
        .map(|data| to_cell(data).to_string().trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(MailScrapeError::EmptySheet(sheet.to_string()));
    }

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<Cell>>())
        .filter(|row| !row.iter().all(Cell::is_empty))
        .collect();

    debug!("Sheet '{sheet}': {} column(s), {} row(s)", headers.len(), rows.len());
    Ok(Table::new(headers, rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(num) => Cell::Number(*num),
        Data::Int(num) => Cell::Number(*num as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(date) => Cell::DateTime(date.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(err) => Cell::Text(err.to_string()),
    }
}
