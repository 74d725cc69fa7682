//! Casts loosely typed cells to the column types of a [`BudgetRecord`].
//!
//! [`BudgetRecord`]: crate::budget_sync::records::BudgetRecord

use crate::budget_sync::error::SyncError;
use crate::budget_sync::records::CellValue;

// i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
const I64_LOWER: f64 = i64::MIN as f64;
const I64_UPPER: f64 = i64::MAX as f64;

pub fn to_text(cell: &CellValue) -> String {
    cell.to_string()
}

pub fn to_integer(cell: &CellValue, row: usize, column: &str) -> Result<i64, SyncError> {
    let reject = || coercion_error(cell, row, column, "integer");

    match cell {
        CellValue::Int(value) => Ok(*value),
        CellValue::Bool(value) => Ok(i64::from(*value)),
        CellValue::Float(value) => float_to_integer(*value).ok_or_else(reject),
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if let Ok(value) = trimmed.parse::<i64>() {
                return Ok(value);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(float_to_integer)
                .ok_or_else(reject)
        }
        CellValue::Empty => Err(reject()),
    }
}

pub fn to_decimal(cell: &CellValue, row: usize, column: &str) -> Result<f64, SyncError> {
    let reject = || coercion_error(cell, row, column, "decimal");

    let value = match cell {
        CellValue::Int(value) => *value as f64,
        CellValue::Bool(value) => f64::from(u8::from(*value)),
        CellValue::Float(value) => *value,
        CellValue::Text(text) => text.trim().parse::<f64>().map_err(|_| reject())?,
        CellValue::Empty => return Err(reject()),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(reject())
    }
}

fn float_to_integer(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated >= I64_LOWER && truncated < I64_UPPER {
        Some(truncated as i64)
    } else {
        None
    }
}

fn coercion_error(cell: &CellValue, row: usize, column: &str, target: &'static str) -> SyncError {
    SyncError::TypeCoercion {
        row,
        column: column.to_string(),
        value: cell.to_string(),
        target,
    }
}
