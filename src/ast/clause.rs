use crate::ast::{Modifier, Operator, relations};
use std::mem;

/// A clause with the prefix declarations scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    /// Prefixes declared in front of this clause, visible to it and to
    /// every clause nested inside it
    pub prefixes: Vec<Prefix>,

    pub kind: ClauseKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClauseKind {
    /// `index relation/modifiers term`
    Search(SearchClause),

    /// `left op/modifiers right`
    Boolean(Box<BoolClause>),

    /// No constraint, written `cql.allRecords = 1`
    #[default]
    MatchAll,
}

// Boolean chains nest as deep as they are long; subtrees are unlinked onto
// a heap stack rather than dropped recursively.
impl Drop for Clause {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let ClauseKind::Boolean(boolean) = mem::take(&mut self.kind) {
            pending.push(boolean);
        }
        while let Some(mut boolean) = pending.pop() {
            for side in [&mut boolean.left, &mut boolean.right] {
                if let ClauseKind::Boolean(inner) = mem::take(&mut side.kind) {
                    pending.push(inner);
                }
            }
        }
    }
}

/// A single search clause.
///
/// Empty `index` and `relation` stand for `cql.serverChoice` and `=`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchClause {
    pub index: String,
    pub relation: String,
    pub modifiers: Vec<Modifier>,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoolClause {
    pub left: Clause,
    pub operator: Operator,
    pub modifiers: Vec<Modifier>,
    pub right: Clause,
}

/// A `> name = uri` or `> uri` declaration.
///
/// An empty name is the unnamed form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prefix {
    pub name: String,
    pub uri: String,
}

impl Prefix {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Prefix {
            name: name.into(),
            uri: uri.into(),
        }
    }

    pub fn unnamed(uri: impl Into<String>) -> Self {
        Prefix::new(String::new(), uri)
    }
}

impl SearchClause {
    /// The index, or `cql.serverChoice` when left empty.
    pub fn index_or_default(&self) -> &str {
        if self.index.is_empty() {
            relations::SERVER_CHOICE
        } else {
            &self.index
        }
    }

    /// The relation, or `=` when left empty.
    pub fn relation_or_default(&self) -> &str {
        if self.relation.is_empty() {
            relations::DEFAULT
        } else {
            &self.relation
        }
    }
}

impl From<SearchClause> for Clause {
    fn from(search: SearchClause) -> Self {
        Clause {
            prefixes: Vec::new(),
            kind: ClauseKind::Search(search),
        }
    }
}

impl From<BoolClause> for Clause {
    fn from(boolean: BoolClause) -> Self {
        Clause {
            prefixes: Vec::new(),
            kind: ClauseKind::Boolean(Box::new(boolean)),
        }
    }
}

// Chain helpers
impl Clause {
    pub fn match_all() -> Self {
        Clause::default()
    }

    /// `index = term`
    pub fn search(index: impl Into<String>, term: impl Into<String>) -> Self {
        Clause::search_with(index, relations::EQ, term)
    }

    /// `index relation term`
    pub fn search_with(
        index: impl Into<String>,
        relation: impl Into<String>,
        term: impl Into<String>,
    ) -> Self {
        SearchClause {
            index: index.into(),
            relation: relation.into(),
            modifiers: Vec::new(),
            term: term.into(),
        }
        .into()
    }

    pub fn boolean(left: Clause, operator: Operator, right: Clause) -> Self {
        BoolClause {
            left,
            operator,
            modifiers: Vec::new(),
            right,
        }
        .into()
    }

    pub fn and(left: Clause, right: Clause) -> Self {
        Clause::boolean(left, Operator::And, right)
    }

    pub fn or(left: Clause, right: Clause) -> Self {
        Clause::boolean(left, Operator::Or, right)
    }

    pub fn not(left: Clause, right: Clause) -> Self {
        Clause::boolean(left, Operator::Not, right)
    }

    pub fn prox(left: Clause, right: Clause) -> Self {
        Clause::boolean(left, Operator::Prox, right)
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefixes.push(prefix);
        self
    }

    /// Attach modifiers to the relation of a search clause or the operator
    /// of a boolean clause. Match-all clauses are returned unchanged.
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        match &mut self.kind {
            ClauseKind::Search(search) => search.modifiers.extend(modifiers),
            ClauseKind::Boolean(boolean) => boolean.modifiers.extend(modifiers),
            ClauseKind::MatchAll => {}
        }
        self
    }

    pub fn as_search(&self) -> Option<&SearchClause> {
        match &self.kind {
            ClauseKind::Search(search) => Some(search),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BoolClause> {
        match &self.kind {
            ClauseKind::Boolean(boolean) => Some(boolean),
            _ => None,
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self.kind, ClauseKind::MatchAll)
    }
}
