use std::collections::HashMap;

use shared::domain::PersonRecord;

use crate::error::HierarchyError;

/// One tree node: the record plus its children in the insertion order of
/// the source sequence (never sorted).
#[derive(Debug, Clone, PartialEq)]
pub struct PersonNode {
    pub record: PersonRecord,
    pub children: Vec<PersonNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonTree {
    root: PersonNode,
    len: usize,
}

impl PersonTree {
    pub fn root(&self) -> &PersonNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Links each record under the record whose id equals its effective parent
/// id (father wins over mother). Rejects duplicate ids, dangling parent
/// references, anything other than exactly one root, and parent cycles.
pub fn build(records: &[PersonRecord]) -> Result<PersonTree, HierarchyError> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if index.insert(record.id.as_str(), i).is_some() {
            return Err(HierarchyError::DuplicateId(record.id.clone()));
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match record.effective_parent_id() {
            None => roots.push(i),
            Some(parent) => match index.get(parent.as_str()) {
                Some(&p) => children[p].push(i),
                None => {
                    return Err(HierarchyError::DanglingParent {
                        child: record.id.clone(),
                        parent: parent.clone(),
                    })
                }
            },
        }
    }

    let root = match roots.as_slice() {
        [only] => *only,
        _ => {
            return Err(HierarchyError::AmbiguousRoot(
                roots.iter().map(|&i| records[i].id.clone()).collect(),
            ))
        }
    };

    // Records on a parent cycle resolve every reference yet never reach the
    // root; they would silently vanish from the drawing without this check.
    let mut reached = vec![false; records.len()];
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        if std::mem::replace(&mut reached[i], true) {
            continue;
        }
        stack.extend(children[i].iter().copied());
    }
    if let Some(i) = reached.iter().position(|r| !*r) {
        return Err(HierarchyError::Cycle(records[i].id.clone()));
    }

    Ok(PersonTree {
        root: assemble(records, &children, root),
        len: records.len(),
    })
}

fn assemble(records: &[PersonRecord], children: &[Vec<usize>], i: usize) -> PersonNode {
    PersonNode {
        record: records[i].clone(),
        children: children[i]
            .iter()
            .map(|&c| assemble(records, children, c))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{PersonId, PersonRecord};

    fn person(id: &str, father: Option<&str>, mother: Option<&str>) -> PersonRecord {
        PersonRecord::new(
            id,
            format!("person-{id}"),
            father.map(PersonId::from),
            mother.map(PersonId::from),
        )
    }

    #[test]
    fn single_rootless_record_becomes_the_root() {
        let records = vec![
            person("1", None, None),
            person("2", Some("1"), None),
            person("3", None, Some("1")),
        ];
        let tree = build(&records).expect("tree");
        assert_eq!(tree.root().record.id.as_str(), "1");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn father_takes_precedence_over_mother_when_linking() {
        let records = vec![
            person("1", None, None),
            person("9", Some("1"), None),
            person("2", Some("1"), Some("9")),
        ];
        let tree = build(&records).expect("tree");
        // "2" hangs under "1" (its father), not under "9" (its mother).
        assert!(tree
            .root()
            .children
            .iter()
            .any(|node| node.record.id.as_str() == "2"));
        let mother = tree
            .root()
            .children
            .iter()
            .find(|node| node.record.id.as_str() == "9")
            .expect("mother node");
        assert!(mother.children.is_empty());
    }

    #[test]
    fn unresolved_mother_is_ignored_when_the_father_link_resolves() {
        // Only the effective parent is looked up, so a stale mother id does
        // not count as dangling while a father is present.
        let records = vec![person("1", None, None), person("2", Some("1"), Some("9"))];
        let tree = build(&records).expect("tree");
        assert_eq!(tree.root().children[0].record.id.as_str(), "2");
    }

    #[test]
    fn sibling_order_follows_the_source_sequence() {
        let records = vec![
            person("r", None, None),
            person("c", Some("r"), None),
            person("a", Some("r"), None),
            person("b", Some("r"), None),
        ];
        let tree = build(&records).expect("tree");
        let order: Vec<&str> = tree
            .root()
            .children
            .iter()
            .map(|node| node.record.id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn dangling_parent_reference_is_rejected() {
        let records = vec![person("1", None, None), person("2", Some("99"), None)];
        assert_eq!(
            build(&records),
            Err(HierarchyError::DanglingParent {
                child: PersonId::from("2"),
                parent: PersonId::from("99"),
            })
        );
    }

    #[test]
    fn two_rootless_records_are_ambiguous() {
        let records = vec![person("1", None, None), person("2", None, None)];
        assert_eq!(
            build(&records),
            Err(HierarchyError::AmbiguousRoot(vec![
                PersonId::from("1"),
                PersonId::from("2"),
            ]))
        );
    }

    #[test]
    fn mutual_parents_leave_no_root() {
        let records = vec![person("1", Some("2"), None), person("2", Some("1"), None)];
        assert_eq!(build(&records), Err(HierarchyError::AmbiguousRoot(vec![])));
    }

    #[test]
    fn cycle_beside_a_valid_root_is_rejected() {
        let records = vec![
            person("1", None, None),
            person("2", Some("3"), None),
            person("3", Some("2"), None),
        ];
        assert_eq!(
            build(&records),
            Err(HierarchyError::Cycle(PersonId::from("2")))
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let records = vec![person("1", None, None), person("1", None, None)];
        assert_eq!(
            build(&records),
            Err(HierarchyError::DuplicateId(PersonId::from("1")))
        );
    }

    #[test]
    fn empty_input_has_no_root() {
        assert_eq!(build(&[]), Err(HierarchyError::AmbiguousRoot(vec![])));
    }
}
