use crate::ast::{Clause, Modifier};

/// A complete CQL query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Root clause
    pub clause: Clause,

    /// Sort keys in precedence order, empty when there is no `sortBy`
    pub sort_spec: Vec<Sort>,
}

impl Query {
    pub fn new(clause: Clause) -> Self {
        Query {
            clause,
            sort_spec: Vec::new(),
        }
    }

    pub fn sort_by(mut self, sort: Sort) -> Self {
        self.sort_spec.push(sort);
        self
    }
}

/// One `sortBy` key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    pub index: String,
    pub modifiers: Vec<Modifier>,
}

impl Sort {
    pub fn new(index: impl Into<String>) -> Self {
        Sort {
            index: index.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}
