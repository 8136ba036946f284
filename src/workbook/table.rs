use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::fmt;

use crate::core::{MailScrapeError, Result};

/// One spreadsheet cell, reduced to the value kinds that survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel date serial (days since 1899-12-30, time as the fraction)
    DateTime(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => write!(f, "{text}"),
            Cell::Number(num) => write!(f, "{num}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::DateTime(serial) => match serial_to_datetime(*serial) {
                Some(date) if serial.fract() == 0.0 => write!(f, "{}", date.format("%Y-%m-%d")),
                Some(date) => write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S")),
                None => write!(f, "{serial}"),
            },
        }
    }
}

/// Convert an Excel date serial to a calendar date and time
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

/// A sheet as read from disk: a header row and data rows of the same width.
///
/// Tables are never mutated after reading; merging results builds a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, padding or truncating rows to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Trimmed text of every cell in a column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<String>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row[index].to_string().trim().to_string())
                .collect(),
        )
    }

    /// New table with `values` in column `name`, one value per row.
    ///
    /// An existing column is overwritten in place; otherwise the column is
    /// appended after the last one.
    pub fn with_column(&self, name: &str, values: Vec<String>) -> Result<Table> {
        if values.len() != self.rows.len() {
            return Err(MailScrapeError::InvalidArgument(format!(
                "{} value(s) for column '{name}' but the table has {} row(s)",
                values.len(),
                self.rows.len()
            )));
        }

        let mut headers = self.headers.clone();
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        };

        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                row.resize(headers.len(), Cell::Empty);
                row[index] = Cell::Text(value);
                row
            })
            .collect();

        Ok(Table { headers, rows })
    }
}
