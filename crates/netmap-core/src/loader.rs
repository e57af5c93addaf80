//! Spreadsheet loading.
//!
//! The sheet is read as raw text cells, the five known columns are picked out by header name,
//! blanks are forward-filled (at most one consecutive blank per column takes the value above)
//! and whatever is still blank becomes the empty string.

use crate::error::LoadError;
use crate::record::Record;
use calamine::{Data, Reader};
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const COL_ID: &str = "ID";
pub const COL_PARENT: &str = "parent";
pub const COL_VALUE: &str = "value";
pub const COL_VALUE_NUM: &str = "value_num";
pub const COL_LEVEL: &str = "level";

const COLUMNS: [&str; 5] = [COL_ID, COL_PARENT, COL_VALUE, COL_VALUE_NUM, COL_LEVEL];

/// Line-break marker used inside labels; flattened to a space in `ID` and `parent`.
const LINE_BREAK: &str = "<br>";

#[derive(Debug, Clone, PartialEq)]
pub enum SheetSource {
    Url(Url),
    Path(PathBuf),
}

impl std::fmt::Display for SheetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetSource::Url(url) => write!(f, "{url}"),
            SheetSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Worksheet name; `None` reads the first worksheet.
    pub sheet: Option<String>,
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// A worksheet as text: header names plus one `Option<String>` per cell, `None` when blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub fn load_records(source: &SheetSource, opts: &LoadOptions) -> Result<Vec<Record>, LoadError> {
    let bytes = match source {
        SheetSource::Url(url) => fetch_bytes(url, opts.timeout)?,
        SheetSource::Path(path) => std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?,
    };
    tracing::info!(source = %source, bytes = bytes.len(), "spreadsheet loaded");

    let table = read_workbook(bytes, opts.sheet.as_deref())?;
    let records = records_from_table(&table)?;
    tracing::info!(records = records.len(), "records parsed");
    Ok(records)
}

pub fn fetch_bytes(url: &Url, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let fetch_err = |source: reqwest::Error| LoadError::Fetch {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_err)?;
    let resp = client
        .get(url.clone())
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;
    let body = resp.bytes().map_err(fetch_err)?;
    Ok(body.to_vec())
}

/// Parses an xlsx/xls/ods workbook into a [`RawTable`].
pub fn read_workbook(bytes: Vec<u8>, sheet: Option<&str>) -> Result<RawTable, LoadError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??,
    };

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or(LoadError::EmptyWorkbook)?
        .iter()
        .map(|c| cell_text(c).unwrap_or_default().trim().to_string())
        .collect();
    let rows = rows
        .map(|r| r.iter().map(cell_text).collect())
        .collect::<Vec<Vec<Option<String>>>>();
    Ok(RawTable { header, rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

pub fn records_from_table(table: &RawTable) -> Result<Vec<Record>, LoadError> {
    let mut columns: Vec<Vec<Option<String>>> = Vec::with_capacity(COLUMNS.len());
    for name in COLUMNS {
        let idx = table
            .header
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn { column: name })?;
        let mut col: Vec<Option<String>> = table
            .rows
            .iter()
            .map(|r| r.get(idx).cloned().flatten())
            .collect();
        let filled = forward_fill(&mut col);
        tracing::debug!(column = name, filled, "forward-filled blanks");
        columns.push(col);
    }

    let mut out = Vec::with_capacity(table.rows.len());
    for i in 0..table.rows.len() {
        let cell = |c: usize| columns[c][i].clone().unwrap_or_default();
        let row = i + 2;
        out.push(Record {
            id: cell(0).replace(LINE_BREAK, " "),
            parent: cell(1).replace(LINE_BREAK, " "),
            value: cell(2),
            value_num: parse_number(&cell(3), row)?,
            level: parse_level(&cell(4), row)?,
        });
    }
    Ok(out)
}

/// Fills each blank from the cell above when that cell was not itself blank. Returns the
/// number of cells filled.
pub fn forward_fill(col: &mut [Option<String>]) -> usize {
    let mut filled = 0;
    let mut prev_raw: Option<String> = None;
    for cell in col.iter_mut() {
        let raw = cell.clone();
        if cell.is_none() {
            if let Some(prev) = &prev_raw {
                *cell = Some(prev.clone());
                filled += 1;
            }
        }
        prev_raw = raw;
    }
    filled
}

fn parse_number(raw: &str, row: usize) -> Result<f64, LoadError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidCell {
            row,
            column: COL_VALUE_NUM,
            value: raw.to_string(),
            expected: "number",
        })
}

fn parse_level(raw: &str, row: usize) -> Result<i64, LoadError> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }
    // Spreadsheet exports sometimes carry integral levels as `2.0`.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
        .ok_or_else(|| LoadError::InvalidCell {
            row,
            column: COL_LEVEL,
            value: raw.to_string(),
            expected: "integer",
        })
}
