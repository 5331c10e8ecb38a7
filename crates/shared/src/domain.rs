use std::fmt;

use serde::{Deserialize, Serialize};

/// Person identifier, always held as text. The remote sheet returns ids as
/// whatever type its cells happen to contain (numbers or strings), so ids
/// are normalized to text on ingest to keep equality comparisons sane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One row of the family tree, after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    pub father_id: Option<PersonId>,
    pub mother_id: Option<PersonId>,
    /// Any additional spreadsheet columns, carried through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PersonRecord {
    pub fn new(
        id: impl Into<PersonId>,
        name: impl Into<String>,
        father_id: Option<PersonId>,
        mother_id: Option<PersonId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            father_id,
            mother_id,
            extra: serde_json::Map::new(),
        }
    }

    /// The parent a record hangs under in the tree. The father link wins
    /// when both parents are present; the mother link is only followed for
    /// records with no father. This is the store's business rule, preserved
    /// verbatim.
    pub fn effective_parent_id(&self) -> Option<&PersonId> {
        self.father_id.as_ref().or(self.mother_id.as_ref())
    }

    pub fn is_root_candidate(&self) -> bool {
        self.effective_parent_id().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn father_link_wins_over_mother_link() {
        let person = PersonRecord::new(
            "2",
            "Siti",
            Some(PersonId::from("F1")),
            Some(PersonId::from("M1")),
        );
        assert_eq!(person.effective_parent_id().map(PersonId::as_str), Some("F1"));
    }

    #[test]
    fn mother_link_is_followed_when_father_is_absent() {
        let person = PersonRecord::new("2", "Siti", None, Some(PersonId::from("M1")));
        assert_eq!(person.effective_parent_id().map(PersonId::as_str), Some("M1"));
    }

    #[test]
    fn record_without_parents_is_a_root_candidate() {
        let person = PersonRecord::new("1", "Raden", None, None);
        assert!(person.is_root_candidate());
    }
}
