//! Tabular loader: delimited text, whitespace columns and spreadsheets into a
//! `ChannelTable`, with every value converted from dB to amplitude.

use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use super::ChannelTable;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Text layouts understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma separated with a header row
    Csv,
    /// Tab separated with a header row
    Tsv,
    /// Runs of whitespace between values, no header; columns named `0`, `1`, ...
    Whitespace,
    /// First sheet of an .xlsx/.xlsm/.xlsb/.xls/.ods workbook, header row first
    Spreadsheet,
}

impl TableFormat {
    /// Pick a format from the file extension
    ///
    /// Unknown extensions fall back to CSV.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "tsv" => Ok(TableFormat::Tsv),
            "txt" | "dat" => Ok(TableFormat::Whitespace),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
            _ => Ok(TableFormat::Csv),
        }
    }
}

/// Load a channel table from a file, dispatching on the extension
///
/// Values are read as power-ratio dB and converted to linear amplitude
/// before the table is returned.
pub fn load_table(path: &Path) -> Result<ChannelTable, LoadError> {
    let format = TableFormat::from_path(path)?;
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let table = parse_table(file, format)?;
    log::info!(
        "Loaded {} channels x {} samples from {}",
        table.channel_count(),
        table.sample_count(),
        path.display()
    );
    Ok(table)
}

/// Parse a channel table from any reader and convert dB to amplitude
pub fn parse_table<R: Read>(reader: R, format: TableFormat) -> Result<ChannelTable, LoadError> {
    let (names, rows) = match format {
        TableFormat::Csv => read_delimited(reader, b',')?,
        TableFormat::Tsv => read_delimited(reader, b'\t')?,
        TableFormat::Whitespace => read_whitespace(reader)?,
        TableFormat::Spreadsheet => read_spreadsheet(reader)?,
    };

    if names.is_empty() || rows.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut table = ChannelTable::from_rows(names, rows).ok_or(LoadError::Empty)?;
    table.convert_db_to_amplitude();
    Ok(table)
}

// ---------------------------------------------------------------------------
// Delimited loader (csv crate)
// ---------------------------------------------------------------------------

/// Header row gives channel names; every following record is one sample
fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<(Vec<String>, Vec<Vec<f64>>), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push(parse_row(record.iter(), &names, row_no)?);
    }

    Ok((names, rows))
}

// ---------------------------------------------------------------------------
// Whitespace loader
// ---------------------------------------------------------------------------

fn read_whitespace<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<f64>>), LoadError> {
    let mut names: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: format!("line {}", line_no + 1),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        if names.is_empty() {
            let width = line.split_whitespace().count();
            names = (0..width).map(|i| i.to_string()).collect();
        }
        let row_no = rows.len();
        rows.push(parse_row(line.split_whitespace(), &names, row_no)?);
    }

    Ok((names, rows))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader (calamine)
// ---------------------------------------------------------------------------

/// First worksheet only; the workbook kind is sniffed from the bytes
fn read_spreadsheet<R: Read>(mut reader: R) -> Result<(Vec<String>, Vec<Vec<f64>>), LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|source| LoadError::Io {
        path: "workbook".to_string(),
        source,
    })?;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(LoadError::Empty),
    };

    read_range(&range)
}

/// Header row gives channel names; every following row is one sample
fn read_range(range: &Range<Data>) -> Result<(Vec<String>, Vec<Vec<f64>>), LoadError> {
    let mut rows_iter = range.rows();
    let names: Vec<String> = match rows_iter.next() {
        Some(header) => header.iter().map(|cell| cell_text(cell).trim().to_string()).collect(),
        None => return Ok((Vec::new(), Vec::new())),
    };

    let mut rows = Vec::new();
    for (row_no, row) in rows_iter.enumerate() {
        let tokens: Vec<String> = row.iter().map(cell_text).collect();
        if tokens.iter().all(|t| t.trim().is_empty()) {
            continue;
        }
        rows.push(parse_row(tokens.iter().map(String::as_str), &names, row_no)?);
    }

    Ok((names, rows))
}

/// Render a cell as the text the delimited path would have seen
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        other => other.to_string(),
    }
}

// -- Shared helpers --

fn parse_row<'a>(
    fields: impl Iterator<Item = &'a str>,
    names: &[String],
    row: usize,
) -> Result<Vec<f64>, LoadError> {
    let values = fields
        .enumerate()
        .map(|(col, tok)| {
            parse_cell(tok).ok_or_else(|| LoadError::NonNumeric {
                column: names.get(col).cloned().unwrap_or_else(|| col.to_string()),
                row,
                value: tok.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, LoadError>>()?;

    if values.len() != names.len() {
        return Err(LoadError::Ragged {
            row,
            expected: names.len(),
            found: values.len(),
        });
    }
    Ok(values)
}

/// Empty cells are missing values
fn parse_cell(tok: &str) -> Option<f64> {
    let tok = tok.trim();
    if tok.is_empty() {
        return Some(f64::NAN);
    }
    tok.parse::<f64>().ok()
}
