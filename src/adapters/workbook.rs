use crate::core::{Record, Sheet, WorkbookReader};
use crate::utils::error::{Result, RosterError};
use calamine::{Data, Reader};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// xlsx / xlsm / xlsb / xls / ods, detected from content.
    Spreadsheet,
    /// Zip archive with one CSV file per sheet.
    CsvBundle,
}

impl WorkbookFormat {
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("zip") => WorkbookFormat::CsvBundle,
            _ => WorkbookFormat::Spreadsheet,
        }
    }

    pub fn read_sheets(self, bytes: &[u8]) -> Result<Vec<Sheet>> {
        match self {
            WorkbookFormat::Spreadsheet => SpreadsheetReader.read_sheets(bytes),
            WorkbookFormat::CsvBundle => CsvBundleReader.read_sheets(bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

impl WorkbookReader for SpreadsheetReader {
    fn read_sheets(&self, bytes: &[u8]) -> Result<Vec<Sheet>> {
        let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| RosterError::WorkbookError {
                message: e.to_string(),
            })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| RosterError::WorkbookError {
                    message: format!("sheet '{}': {}", name, e),
                })?;

            let rows = range
                .rows()
                .map(|row| row.iter().map(cell_value).collect::<Vec<_>>());
            sheets.push(Sheet::new(name.clone(), rows_to_records(rows)));
        }

        tracing::debug!("Read {} sheet(s) from spreadsheet", sheets.len());
        Ok(sheets)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvBundleReader;

impl WorkbookReader for CsvBundleReader {
    fn read_sheets(&self, bytes: &[u8]) -> Result<Vec<Sheet>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut sheets = Vec::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let entry_name = file.name().to_string();
            let path = Path::new(&entry_name);
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                tracing::debug!("Skipping non-CSV bundle entry '{}'", entry_name);
                continue;
            }

            let sheet_name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(&entry_name)
                .to_string();

            let mut content = Vec::new();
            file.read_to_end(&mut content)?;

            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(content.as_slice());

            let mut rows = Vec::new();
            for row in reader.records() {
                let row = row?;
                rows.push(
                    row.iter()
                        .map(|field| {
                            if field.is_empty() {
                                serde_json::Value::Null
                            } else {
                                serde_json::Value::String(field.to_string())
                            }
                        })
                        .collect::<Vec<_>>(),
                );
            }

            sheets.push(Sheet::new(sheet_name, rows_to_records(rows)));
        }

        if sheets.is_empty() {
            return Err(RosterError::WorkbookError {
                message: "archive contains no CSV files".to_string(),
            });
        }

        tracing::debug!("Read {} sheet(s) from CSV bundle", sheets.len());
        Ok(sheets)
    }
}

fn cell_value(cell: &Data) -> serde_json::Value {
    match cell {
        Data::Empty => serde_json::Value::Null,
        Data::String(s) if s.is_empty() => serde_json::Value::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            serde_json::Value::String(s.clone())
        }
        Data::Int(i) => serde_json::Value::from(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            serde_json::Value::from(*f as i64)
        }
        Data::Float(f) => serde_json::Value::from(*f),
        Data::Bool(b) => serde_json::Value::Bool(*b),
        Data::DateTime(dt) => serde_json::Value::from(dt.as_f64()),
        Data::Error(e) => serde_json::Value::String(e.to_string()),
    }
}

/// First row names the fields; blank rows are skipped and blank cells are
/// left out of the record. Columns past the end of the header row are named
/// like blank headers, so wide CSV rows keep their extra cells.
fn rows_to_records<I>(rows: I) -> Vec<Record>
where
    I: IntoIterator<Item = Vec<serde_json::Value>>,
{
    let mut rows: Vec<Vec<serde_json::Value>> = rows.into_iter().collect();
    if rows.is_empty() {
        return Vec::new();
    }
    let mut header_row = rows.remove(0);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if header_row.len() < width {
        header_row.resize(width, serde_json::Value::Null);
    }
    let headers = header_names(&header_row);

    rows.into_iter()
        .filter_map(|row| {
            let data: HashMap<String, serde_json::Value> = row
                .into_iter()
                .zip(headers.iter())
                .filter(|(value, _)| !value.is_null())
                .map(|(value, header)| (header.clone(), value))
                .collect();
            (!data.is_empty()).then_some(Record { data })
        })
        .collect()
}

fn header_names(row: &[serde_json::Value]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    row.iter()
        .map(|cell| {
            let base = match cell {
                serde_json::Value::Null => "__EMPTY".to_string(),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}
