use std::fmt::Display;
use std::io::{Cursor, Read, Seek};

use calamine::{DataType, Reader, Xls, Xlsx};

use crate::budget_sync::coerce::{to_decimal, to_integer, to_text};
use crate::budget_sync::error::SyncError;
use crate::budget_sync::records::{
    AMOUNT, BudgetRecord, CellValue, MONTH, ManualEntry, REQUIRED_COLUMNS, YEAR,
};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Tabular formats accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Picks the format from the text after the last `.` of the filename,
    /// ignoring case.
    pub fn from_filename(filename: &str) -> Result<Self, SyncError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            _ => Err(SyncError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xls => "xls",
        }
    }
}

/// Header row plus data rows of the first sheet (or the whole CSV).
#[derive(Debug, Default)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

/// Parses an uploaded file into budget records, one per non-blank data row,
/// in file order.
pub fn ingest_file(file_bytes: &[u8], filename: &str) -> Result<Vec<BudgetRecord>, SyncError> {
    let format = FileFormat::from_filename(filename)?;

    let table = match format {
        FileFormat::Csv => read_csv(file_bytes)?,
        FileFormat::Xlsx => {
            let workbook: Xlsx<_> = Xlsx::new(Cursor::new(file_bytes)).map_err(malformed(format))?;
            read_first_sheet(workbook, format)?
        }
        FileFormat::Xls => {
            let workbook: Xls<_> = Xls::new(Cursor::new(file_bytes)).map_err(malformed(format))?;
            read_first_sheet(workbook, format)?
        }
    };

    tracing::debug!(
        filename,
        format = format.label(),
        rows = table.rows.len(),
        "parsed upload"
    );

    table_to_records(&table)
}

/// Renames manual entries onto the canonical record shape. The entries are
/// already typed, so nothing can fail here.
pub fn ingest_manual(items: &[ManualEntry]) -> Vec<BudgetRecord> {
    items.iter().map(BudgetRecord::from).collect()
}

fn read_csv(file_bytes: &[u8]) -> Result<Table, SyncError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file_bytes);

    let headers = reader
        .headers()
        .map_err(malformed(FileFormat::Csv))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed(FileFormat::Csv))?;
        rows.push(record.iter().map(CellValue::from_text).collect());
    }

    Ok(Table { headers, rows })
}

fn read_first_sheet<RS, W>(mut workbook: W, format: FileFormat) -> Result<Table, SyncError>
where
    RS: Read + Seek,
    W: Reader<RS>,
    W::Error: Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SyncError::MalformedFile {
            format: format.label(),
            reason: "workbook contains no sheets".to_string(),
        })?
        .map_err(malformed(format))?;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_value(cell).to_string())
            .collect(),
        None => return Ok(Table::default()),
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(Table { headers, rows })
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(value) => CellValue::Int(*value),
        DataType::Float(value) | DataType::DateTime(value) => CellValue::Float(*value),
        DataType::String(value) => CellValue::from_text(value),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

fn table_to_records(table: &Table) -> Result<Vec<BudgetRecord>, SyncError> {
    let [store_idx, year_idx, month_idx, amount_idx] = locate_columns(&table.headers)?;

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.iter().all(CellValue::is_blank))
        .map(|(index, row)| {
            let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY_CELL);
            // Header is row 1 in the file, so the first data row is row 2.
            build_record(
                index + 2,
                cell(store_idx),
                cell(year_idx),
                cell(month_idx),
                cell(amount_idx),
            )
        })
        .collect()
}

fn locate_columns(headers: &[String]) -> Result<[usize; 4], SyncError> {
    let positions = REQUIRED_COLUMNS.map(|name| headers.iter().position(|header| header == name));

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(positions.iter())
        .filter(|(_, position)| position.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(SyncError::MissingColumns {
            required: REQUIRED_COLUMNS.iter().map(|name| name.to_string()).collect(),
            missing,
        });
    }

    Ok(positions.map(|position| position.unwrap_or_default()))
}

fn build_record(
    row: usize,
    store_name: &CellValue,
    year: &CellValue,
    month: &CellValue,
    amount: &CellValue,
) -> Result<BudgetRecord, SyncError> {
    Ok(BudgetRecord {
        store_name: to_text(store_name),
        year: to_integer(year, row, YEAR)?,
        month: to_integer(month, row, MONTH)?,
        amount: to_decimal(amount, row, AMOUNT)?,
    })
}

fn malformed<E: Display>(format: FileFormat) -> impl Fn(E) -> SyncError {
    move |err| SyncError::MalformedFile {
        format: format.label(),
        reason: err.to_string(),
    }
}
