use crate::ast::{Modifier, relations};

/// Defaults and bindings in force at one point of the parse.
///
/// A context is never changed in place. Entering a relation or a prefix
/// declaration derives a new context for the clauses it governs, so
/// sibling clauses keep seeing the context they were parsed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseContext {
    /// Index given to search clauses that name none; empty means default
    pub index: String,
    /// Relation given to search clauses that name none; empty means default
    pub relation: String,
    pub modifiers: Vec<Modifier>,
    /// Prefix names usable as relation qualifiers
    pub prefixes: Vec<String>,
    /// Entered through an unnamed prefix declaration
    pub custom: bool,
    /// Recursion depth, counting parentheses and relation rebinds
    pub depth: usize,
}

impl ParseContext {
    pub fn root() -> Self {
        ParseContext {
            index: String::new(),
            relation: String::new(),
            modifiers: Vec::new(),
            prefixes: vec![relations::CQL_PREFIX.to_string()],
            custom: false,
            depth: 0,
        }
    }

    /// Context for the search clause that follows `index relation/modifiers`.
    pub fn with_relation(&self, index: String, relation: String, modifiers: Vec<Modifier>) -> Self {
        ParseContext {
            index,
            relation,
            modifiers,
            prefixes: self.prefixes.clone(),
            custom: self.custom,
            depth: self.depth + 1,
        }
    }

    /// Context one parenthesis deeper.
    pub fn nested(&self) -> Self {
        ParseContext {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    pub fn bind_prefix(&self, name: String) -> Self {
        let mut prefixes = self.prefixes.clone();
        prefixes.push(name);
        ParseContext {
            prefixes,
            ..self.clone()
        }
    }

    pub fn into_custom(self) -> Self {
        ParseContext {
            custom: true,
            ..self
        }
    }

    /// Whether `word` is qualified by a bound prefix, as in `dc.exact`.
    pub fn is_bound(&self, word: &str) -> bool {
        let qualifier = word.split('.').next().unwrap_or_default();
        self.prefixes.iter().any(|name| name == qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_binds_cql() {
        let ctx = ParseContext::root();
        assert!(ctx.is_bound("cql.exact"));
        assert!(!ctx.is_bound("dc.exact"));
        assert!(ctx.index.is_empty());
        assert!(ctx.relation.is_empty());
    }

    #[test]
    fn test_derived_contexts_leave_parent_untouched() {
        let root = ParseContext::root();
        let bound = root.bind_prefix("dc".to_string());
        assert!(bound.is_bound("dc.title"));
        assert!(!root.is_bound("dc.title"));

        let related = bound.with_relation("title".to_string(), "=".to_string(), Vec::new());
        assert_eq!(related.depth, 1);
        assert!(related.is_bound("dc.title"));
        assert_eq!(root.depth, 0);
    }
}
