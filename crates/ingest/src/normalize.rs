use serde_json::Value;

use crate::reader::Table;
use crate::record::{ID_COLUMN, InscriptionRecord, STATUS_COLUMN};

/// Split a `;`-joined status cell. Empty input gives an empty list.
pub fn split_status(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a parsed table into records. Pure and total over any `Table`.
pub fn normalize(table: &Table) -> Vec<InscriptionRecord> {
    table
        .rows
        .iter()
        .map(|row| normalize_row(&table.header, row))
        .collect()
}

fn normalize_row(header: &[String], row: &[String]) -> InscriptionRecord {
    let mut record = InscriptionRecord::default();

    for (idx, column) in header.iter().enumerate() {
        let cell = row.get(idx).map(String::as_str).unwrap_or("");

        match column.as_str() {
            ID_COLUMN => record.id = cell.trim().to_string(),
            STATUS_COLUMN => record.status = split_status(cell),
            "publication" => record.publication = cell.to_string(),
            "province" => record.province = cell.to_string(),
            "place" => record.place = cell.to_string(),
            "dating_from" => record.dating_from = cell.trim().to_string(),
            "dating_to" => record.dating_to = cell.trim().to_string(),
            "inscription" => record.inscription = cell.to_string(),
            other => {
                record
                    .extra
                    .insert(other.to_string(), Value::String(cell.to_string()));
            }
        }
    }

    record
}
