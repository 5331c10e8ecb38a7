//! Wire types for the spreadsheet-backed remote store. Field names are
//! fixed by the remote schema (`ID`, `Nama`, `Ayah_ID`, `Ibu_ID`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{PersonId, PersonRecord};

/// The remote store signals a successful write with this exact message
/// text; there is no structured success flag on the wire.
pub const APPEND_SUCCESS_SENTINEL: &str = "Data added successfully";

/// One roster row as the sheet engine returns it. Cell values arrive as
/// whatever JSON type the sheet guessed, so the id and parent columns stay
/// untyped until [`RawPerson::coerce`] runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPerson {
    #[serde(rename = "ID", default)]
    pub id: Value,
    #[serde(rename = "Nama", default)]
    pub name: String,
    #[serde(rename = "Ayah_ID", default)]
    pub father_id: Value,
    #[serde(rename = "Ibu_ID", default)]
    pub mother_id: Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Id column: text unconditionally, even for numeric cells. A null cell
/// coerces to empty text; the tree builder rejects the duplicates that
/// several such rows would produce.
fn cell_text_lossy(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Parent columns: text when the cell holds something, `None` otherwise.
/// Empty strings and zero both mean "no parent recorded" in the sheet.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(false) => None,
        Value::Bool(true) => Some(true.to_string()),
        other => Some(other.to_string()),
    }
}

impl RawPerson {
    /// Normalizes one row into a [`PersonRecord`]. No validation happens
    /// here; malformed rows surface as tree-builder errors, not coercion
    /// errors.
    pub fn coerce(&self) -> PersonRecord {
        PersonRecord {
            id: PersonId(cell_text_lossy(&self.id)),
            name: self.name.clone(),
            father_id: cell_text(&self.father_id).map(PersonId),
            mother_id: cell_text(&self.mother_id).map(PersonId),
            extra: self.extra.clone(),
        }
    }
}

impl From<&PersonRecord> for RawPerson {
    fn from(record: &PersonRecord) -> Self {
        Self {
            id: Value::String(record.id.0.clone()),
            name: record.name.clone(),
            father_id: record
                .father_id
                .as_ref()
                .map(|id| Value::String(id.0.clone()))
                .unwrap_or(Value::Null),
            mother_id: record
                .mother_id
                .as_ref()
                .map(|id| Value::String(id.0.clone()))
                .unwrap_or(Value::Null),
            extra: record.extra.clone(),
        }
    }
}

/// Body of the append POST. The write path speaks the raw remote field
/// names directly; absent parents go out as empty strings, which is what
/// the store expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendRequest {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Nama")]
    pub name: String,
    #[serde(rename = "Ayah_ID")]
    pub father_id: String,
    #[serde(rename = "Ibu_ID")]
    pub mother_id: String,
}

impl AppendRequest {
    /// The submitted entry as it should land in the local roster: through
    /// the same coercion as fetched rows, so empty parent fields become
    /// `None` instead of empty text.
    pub fn coerced(&self) -> PersonRecord {
        RawPerson {
            id: Value::String(self.id.clone()),
            name: self.name.clone(),
            father_id: Value::String(self.father_id.clone()),
            mother_id: Value::String(self.mother_id.clone()),
            extra: serde_json::Map::new(),
        }
        .coerce()
    }
}

/// Response envelope for the append POST. Success is the sentinel message,
/// nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendResponse {
    #[serde(default)]
    pub message: String,
}

impl AppendResponse {
    pub fn is_success(&self) -> bool {
        self.message == APPEND_SUCCESS_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from(value: serde_json::Value) -> RawPerson {
        serde_json::from_value(value).expect("raw person")
    }

    #[test]
    fn numeric_ids_coerce_to_text() {
        let person = raw_from(json!({ "ID": 7, "Nama": "Raden", "Ayah_ID": 1, "Ibu_ID": null }))
            .coerce();
        assert_eq!(person.id.as_str(), "7");
        assert_eq!(person.father_id.as_ref().map(PersonId::as_str), Some("1"));
        assert!(person.mother_id.is_none());
    }

    #[test]
    fn empty_parent_cells_coerce_to_none() {
        let person =
            raw_from(json!({ "ID": "3", "Nama": "Siti", "Ayah_ID": "", "Ibu_ID": 0 })).coerce();
        assert!(person.father_id.is_none());
        assert!(person.mother_id.is_none());
    }

    #[test]
    fn textual_zero_is_a_real_parent_reference() {
        // "0" the string is a value the sheet can legitimately hold.
        let person =
            raw_from(json!({ "ID": "3", "Nama": "Siti", "Ayah_ID": "0", "Ibu_ID": null })).coerce();
        assert_eq!(person.father_id.as_ref().map(PersonId::as_str), Some("0"));
    }

    #[test]
    fn coercion_is_idempotent() {
        let first = raw_from(json!({
            "ID": 2,
            "Nama": "Siti",
            "Ayah_ID": 1,
            "Ibu_ID": "",
            "Keterangan": "anak pertama"
        }))
        .coerce();
        let second = RawPerson::from(&first).coerce();
        assert_eq!(first, second);
    }

    #[test]
    fn extra_columns_pass_through_coercion_unchanged() {
        let person = raw_from(json!({
            "ID": "1",
            "Nama": "Raden",
            "Ayah_ID": null,
            "Ibu_ID": null,
            "Keterangan": "kepala keluarga"
        }))
        .coerce();
        assert_eq!(
            person.extra.get("Keterangan"),
            Some(&json!("kepala keluarga"))
        );
    }

    #[test]
    fn append_request_serializes_with_remote_field_names() {
        let request = AppendRequest {
            id: "9".to_string(),
            name: "Anak".to_string(),
            father_id: "1".to_string(),
            mother_id: String::new(),
        };
        let body = serde_json::to_value(&request).expect("append body");
        assert_eq!(
            body,
            json!({ "ID": "9", "Nama": "Anak", "Ayah_ID": "1", "Ibu_ID": "" })
        );
    }

    #[test]
    fn append_request_coerces_like_a_fetched_row() {
        let request = AppendRequest {
            id: "9".to_string(),
            name: "Anak".to_string(),
            father_id: "1".to_string(),
            mother_id: String::new(),
        };
        let person = request.coerced();
        assert_eq!(person.id.as_str(), "9");
        assert_eq!(person.father_id.as_ref().map(PersonId::as_str), Some("1"));
        assert!(person.mother_id.is_none());
    }

    #[test]
    fn only_the_sentinel_message_counts_as_success() {
        let ok: AppendResponse =
            serde_json::from_value(json!({ "message": "Data added successfully" })).expect("ok");
        let rejected: AppendResponse =
            serde_json::from_value(json!({ "message": "Duplicate ID" })).expect("rejected");
        let empty: AppendResponse = serde_json::from_value(json!({})).expect("empty");
        assert!(ok.is_success());
        assert!(!rejected.is_success());
        assert!(!empty.is_success());
    }
}
