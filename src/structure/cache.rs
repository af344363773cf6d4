// Fri Jan 16 2026 - Alex

use crate::decl::DeclId;
use crate::structure::LayoutNode;
use std::collections::BTreeMap;

/// Analyzed layouts keyed by declaration identity, iterated in ascending
/// identity order. Owns every tree it holds.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: BTreeMap<DeclId, LayoutNode>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Inserts a layout unless the identity is already present. Returns
    /// whether the layout was stored.
    pub fn insert(&mut self, id: DeclId, layout: LayoutNode) -> bool {
        if self.records.contains_key(&id) {
            return false;
        }
        self.records.insert(id, layout);
        true
    }

    pub fn get(&self, id: DeclId) -> Option<&LayoutNode> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: DeclId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &LayoutNode)> {
        self.records.iter().map(|(id, layout)| (*id, layout))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::FieldKind;

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = RecordStore::new();
        assert!(store.insert(5, LayoutNode::new(FieldKind::Record, "First")));
        assert!(!store.insert(5, LayoutNode::new(FieldKind::Record, "Second")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(5).map(|l| l.type_name()), Some("First"));
    }

    #[test]
    fn test_iterates_by_ascending_id() {
        let mut store = RecordStore::new();
        store.insert(30, LayoutNode::new(FieldKind::Record, "C"));
        store.insert(-2, LayoutNode::new(FieldKind::Record, "A"));
        store.insert(7, LayoutNode::new(FieldKind::Record, "B"));

        let ids: Vec<DeclId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![-2, 7, 30]);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(7));
    }
}
