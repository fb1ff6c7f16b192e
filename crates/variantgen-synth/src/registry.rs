use std::collections::HashSet;

/// Innermost relationship type names seen while expanding one declaration.
///
/// Iteration follows first-insertion order so associated types and `where`
/// requirements come out in field order.
#[derive(Debug, Clone, Default)]
pub struct RelationshipTypeRegistry {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl RelationshipTypeRegistry {
    /// Record a type name; returns false when it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if !self.seen.insert(name.to_string()) {
            return false;
        }
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
