use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical header names, in the order rows are forwarded.
pub const STORE_NAME: &str = "StoreName";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const AMOUNT: &str = "Amount";

pub const REQUIRED_COLUMNS: [&str; 4] = [STORE_NAME, YEAR, MONTH, AMOUNT];

/// One normalized row of budget data, serialized with the PascalCase keys
/// the spreadsheet Web App expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetRecord {
    pub store_name: String,
    pub year: i64,
    pub month: i64,
    pub amount: f64,
}

/// Loosely typed value of a single file cell, before it is coerced to the
/// type of its column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Builds a value from raw text, treating an empty string as a blank cell.
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Empty => Ok(()),
        }
    }
}

/// A manually entered row as posted to `/api/manual-sync`. Items whose
/// fields do not match these types are rejected during deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManualEntry {
    pub store_name: String,
    pub year: i64,
    pub month: i64,
    pub amount: f64,
}

impl From<&ManualEntry> for BudgetRecord {
    fn from(entry: &ManualEntry) -> Self {
        BudgetRecord {
            store_name: entry.store_name.clone(),
            year: entry.year,
            month: entry.month,
            amount: entry.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_with_canonical_keys() {
        let record = BudgetRecord {
            store_name: "B".to_string(),
            year: 2024,
            month: 2,
            amount: 200.0,
        };

        let encoded = serde_json::to_string(&record).unwrap();
        assert_eq!(
            encoded,
            r#"{"StoreName":"B","Year":2024,"Month":2,"Amount":200.0}"#
        );
    }

    #[test]
    fn test_manual_entry_reads_typed_fields() {
        let entry: ManualEntry = serde_json::from_value(json!({
            "store_name": "A",
            "year": 2024,
            "month": 1,
            "amount": 100
        }))
        .unwrap();

        assert_eq!(
            entry,
            ManualEntry {
                store_name: "A".to_string(),
                year: 2024,
                month: 1,
                amount: 100.0,
            }
        );
    }

    #[test]
    fn test_manual_entry_rejects_mistyped_fields() {
        for item in [
            json!({"store_name": 42, "year": 2024, "month": 1, "amount": 1.0}),
            json!({"store_name": "A", "year": true, "month": 1, "amount": 1.0}),
            json!({"store_name": "A", "year": "soon", "month": 1, "amount": 1.0}),
            json!({"store_name": "A", "year": 2024, "month": "3.9", "amount": 1.0}),
            json!({"store_name": "A", "year": 2024, "month": 3.9, "amount": 1.0}),
            json!({"store_name": "A", "year": 2024, "month": 1, "amount": "7"}),
            json!({"store_name": "A", "year": 2024, "month": 1, "amount": null}),
        ] {
            assert!(
                serde_json::from_value::<ManualEntry>(item.clone()).is_err(),
                "accepted {item}"
            );
        }
    }

    #[test]
    fn test_manual_entry_renames_onto_record() {
        let entry = ManualEntry {
            store_name: "A".to_string(),
            year: 2024,
            month: 13,
            amount: 100.5,
        };

        assert_eq!(
            serde_json::to_value(BudgetRecord::from(&entry)).unwrap(),
            json!({"StoreName": "A", "Year": 2024, "Month": 13, "Amount": 100.5})
        );
    }

    #[test]
    fn test_manual_entry_requires_every_field() {
        let parsed = serde_json::from_value::<ManualEntry>(json!({
            "store_name": "A",
            "year": 2024,
            "month": 1
        }));

        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from_text("   ").is_blank());
        assert!(!CellValue::Int(0).is_blank());
    }
}
