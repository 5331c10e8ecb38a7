use shared::domain::PersonId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("duplicate person id \"{0}\"")]
    DuplicateId(PersonId),
    #[error("expected exactly one root record, found {}", display_roots(.0))]
    AmbiguousRoot(Vec<PersonId>),
    #[error("record \"{child}\" references missing parent \"{parent}\"")]
    DanglingParent { child: PersonId, parent: PersonId },
    #[error("record \"{0}\" sits on a parent cycle and is unreachable from the root")]
    Cycle(PersonId),
}

fn display_roots(roots: &[PersonId]) -> String {
    if roots.is_empty() {
        "none".to_string()
    } else {
        let ids: Vec<&str> = roots.iter().map(PersonId::as_str).collect();
        format!("{}: {}", ids.len(), ids.join(", "))
    }
}
