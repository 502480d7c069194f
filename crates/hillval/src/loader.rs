//! Curve file ingestion.
//!
//! Curves arrive as delimited text with a header row. Headers are matched
//! case-insensitively and columns may appear in any order; rows need not be
//! sorted. A malformed file is a fatal configuration error, reported before
//! any sweep runs.

use std::fmt;
use std::fs;
use std::path::Path;

use hillval_core::model::{CapexPoint, GradeTonnagePoint};

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    /// The header row is missing a required column
    MissingColumn { column: &'static str },
    /// A data row has fewer fields than the header promised
    ShortRow { line: usize },
    /// A field failed to parse as a number
    BadNumber { line: usize, value: String },
    /// The file has a header but no data rows
    NoRows,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "{e}"),
            LoadError::MissingColumn { column } => {
                write!(f, "curve file is missing required column '{column}'")
            }
            LoadError::ShortRow { line } => {
                write!(f, "curve file line {line} has too few fields")
            }
            LoadError::BadNumber { line, value } => {
                write!(f, "curve file line {line}: '{value}' is not a number")
            }
            LoadError::NoRows => write!(f, "curve file has no data rows"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Load a grade-tonnage curve: columns `Cutoff`, `Tonnage`, `Grade`.
pub fn load_grade_tonnage_curve(path: &Path) -> Result<Vec<GradeTonnagePoint>, LoadError> {
    let rows = parse_columns(&fs::read_to_string(path)?, &["cutoff", "tonnage", "grade"])?;
    Ok(rows
        .into_iter()
        .map(|row| GradeTonnagePoint {
            cutoff: row[0],
            tonnage: row[1],
            grade: row[2],
        })
        .collect())
}

/// Load a CAPEX curve: columns `Production`, `CAPEX`.
pub fn load_capex_curve(path: &Path) -> Result<Vec<CapexPoint>, LoadError> {
    let rows = parse_columns(&fs::read_to_string(path)?, &["production", "capex"])?;
    Ok(rows
        .into_iter()
        .map(|row| CapexPoint {
            production: row[0],
            capex: row[1],
        })
        .collect())
}

/// Parse delimited text, returning the requested columns (by header name,
/// case-insensitive) for each data row, in the order requested.
fn parse_columns(text: &str, columns: &[&'static str]) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut lines = text.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => {}
            Some((_, line)) => break line,
            None => return Err(LoadError::NoRows),
        }
    };

    let names: Vec<String> = header
        .split(',')
        .map(|field| field.trim().to_ascii_lowercase())
        .collect();

    let mut indices = Vec::with_capacity(columns.len());
    for &column in columns {
        let idx = names
            .iter()
            .position(|name| name == column)
            .ok_or(LoadError::MissingColumn { column })?;
        indices.push(idx);
    }

    let mut rows = Vec::new();
    for (line_idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let mut row = Vec::with_capacity(indices.len());
        for &idx in &indices {
            let field = fields.get(idx).ok_or(LoadError::ShortRow {
                line: line_idx + 1,
            })?;
            let value = field.parse::<f64>().map_err(|_| LoadError::BadNumber {
                line: line_idx + 1,
                value: (*field).to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::NoRows);
    }
    Ok(rows)
}
