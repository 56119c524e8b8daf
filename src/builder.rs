//! Fluent construction of validated queries.
//!
//! Each step returns the builder for the next part of the grammar, so only
//! well-shaped chains type-check. Value checks (empty terms, unknown
//! relations and so on) cannot be expressed in types; the first one that
//! fails is remembered, later calls become no-ops, and [`build`] reports it.
//!
//! [`build`]: ExprBuilder::build
//!
//! # Examples
//!
//! ```
//! use cql_lang::builder::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .prefix("dc", "http://purl.org/dc/elements/1.1/")
//!     .search("dc.title")
//!     .term("the \"little\" prince")
//!     .sort_by("dc.title", &["ignoreCase"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.to_string(),
//!     "> dc = \"http://purl.org/dc/elements/1.1/\" dc.title = \"the \\\"little\\\" prince\" sortBy dc.title/ignoreCase"
//! );
//! ```

use crate::ast::{BoolClause, Clause, Modifier, Operator, Prefix, Query, SearchClause, Sort, relations};
use crate::parser::{ParseError, Parser};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("query already has a root clause")]
    DuplicateRoot,

    #[error("query requires a root clause")]
    MissingRoot,

    #[error("query requires a root clause before appending")]
    AppendWithoutRoot,

    #[error("prefix uri must be non-empty")]
    EmptyPrefixUri,

    #[error("sort index must be non-empty")]
    EmptySortIndex,

    #[error("sort modifier name must be non-empty")]
    EmptySortModifierName,

    #[error("modifier name must be non-empty")]
    EmptyModifierName,

    #[error("invalid modifier relation: {0:?}")]
    InvalidModifierRelation(String),

    #[error("invalid relation: {0:?}")]
    InvalidRelation(String),

    #[error("invalid boolean operator: {0:?}")]
    InvalidOperator(String),

    #[error("search term must be non-empty")]
    EmptyTerm,

    #[error("no open clause to end")]
    NoOpenClause,

    #[error("clause was begun but never ended")]
    UnclosedClause,
}

/// Escape `\` and `"` so a value stays one CQL word.
///
/// ```
/// use cql_lang::builder::escape_special_chars;
///
/// assert_eq!(escape_special_chars(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
/// ```
pub fn escape_special_chars(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape the masking characters `*`, `?` and `^`.
pub fn escape_masking_chars(value: &str) -> String {
    value
        .replace('*', "\\*")
        .replace('?', "\\?")
        .replace('^', "\\^")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// One nesting level of the clause under construction.
#[derive(Debug, Clone, Default)]
struct Group {
    clause: Option<Clause>,
    join: Option<(Operator, Vec<Modifier>)>,
}

/// State shared by every stage of a chain.
#[derive(Debug, Clone)]
struct Draft {
    prefixes: Vec<Prefix>,
    sorts: Vec<Sort>,
    /// Innermost group last; the first entry is the query root
    groups: Vec<Group>,
    error: Option<BuildError>,
}

impl Draft {
    fn new(root: Option<Clause>, sorts: Vec<Sort>) -> Self {
        Draft {
            prefixes: Vec::new(),
            sorts,
            groups: vec![Group {
                clause: root,
                join: None,
            }],
            error: None,
        }
    }

    fn ok(&self) -> bool {
        self.error.is_none()
    }

    fn fail(&mut self, error: BuildError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn current(&mut self) -> &mut Group {
        if self.groups.is_empty() {
            self.groups.push(Group::default());
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    /// Whether a new operand would start a second root.
    fn occupied(&mut self) -> bool {
        let group = self.current();
        group.clause.is_some() && group.join.is_none()
    }

    fn attach(&mut self, clause: Clause) {
        if !self.ok() {
            return;
        }
        let group = self.current();
        match (group.clause.take(), group.join.take()) {
            (Some(left), Some((operator, modifiers))) => {
                group.clause = Some(
                    BoolClause {
                        left,
                        operator,
                        modifiers,
                        right: clause,
                    }
                    .into(),
                );
            }
            (None, None) => group.clause = Some(clause),
            (Some(existing), None) => {
                group.clause = Some(existing);
                self.fail(BuildError::DuplicateRoot);
            }
            (None, Some(_)) => self.fail(BuildError::AppendWithoutRoot),
        }
    }

    fn join(&mut self, operator: Operator) {
        if !self.ok() {
            return;
        }
        let group = self.current();
        if group.clause.is_none() {
            self.fail(BuildError::AppendWithoutRoot);
            return;
        }
        group.join = Some((operator, Vec::new()));
    }

    fn join_named(&mut self, name: &str) {
        match Operator::from_keyword(name) {
            Some(operator) => self.join(operator),
            None => self.fail(BuildError::InvalidOperator(name.to_string())),
        }
    }

    fn begin(&mut self) {
        if !self.ok() {
            return;
        }
        if self.occupied() {
            self.fail(BuildError::DuplicateRoot);
            return;
        }
        self.groups.push(Group::default());
    }

    fn end(&mut self) {
        if !self.ok() {
            return;
        }
        if self.groups.len() < 2 {
            self.fail(BuildError::NoOpenClause);
            return;
        }
        match self.groups.pop().and_then(|group| group.clause) {
            Some(clause) => self.attach(clause),
            None => self.fail(BuildError::MissingRoot),
        }
    }

    fn prefix(&mut self, name: &str, uri: &str) {
        if !self.ok() {
            return;
        }
        if is_blank(uri) {
            self.fail(BuildError::EmptyPrefixUri);
            return;
        }
        self.prefixes.push(Prefix::new(name, uri));
    }

    fn sort(&mut self, index: &str, modifiers: Vec<Modifier>) {
        if !self.ok() {
            return;
        }
        if is_blank(index) {
            self.fail(BuildError::EmptySortIndex);
            return;
        }
        let mut checked = Vec::with_capacity(modifiers.len());
        for modifier in modifiers {
            if is_blank(&modifier.name) {
                self.fail(BuildError::EmptySortModifierName);
                return;
            }
            match check_modifier(modifier) {
                Ok(modifier) => checked.push(modifier),
                Err(error) => {
                    self.fail(error);
                    return;
                }
            }
        }
        self.sorts.push(Sort {
            index: index.to_string(),
            modifiers: checked,
        });
    }

    fn build(self) -> Result<Query, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.groups.len() > 1 {
            return Err(BuildError::UnclosedClause);
        }
        let mut clause = self
            .groups
            .into_iter()
            .next()
            .and_then(|group| group.clause)
            .ok_or(BuildError::MissingRoot)?;
        if !self.prefixes.is_empty() {
            let mut prefixes = self.prefixes;
            prefixes.append(&mut clause.prefixes);
            clause.prefixes = prefixes;
        }
        Ok(Query {
            clause,
            sort_spec: self.sorts,
        })
    }
}

/// Escape the value, default the relation to `=` when a value is present
/// and check the relation against the built-in set.
fn check_modifier(mut modifier: Modifier) -> Result<Modifier, BuildError> {
    if !modifier.value.is_empty() {
        modifier.value = escape_special_chars(&modifier.value);
        if modifier.relation.is_empty() {
            modifier.relation = relations::EQ.to_string();
        }
    }
    if !modifier.relation.is_empty() && !relations::is_built_in(&modifier.relation) {
        return Err(BuildError::InvalidModifierRelation(modifier.relation));
    }
    Ok(modifier)
}

fn named_modifier(name: &str, relation: &str, value: &str) -> Result<Modifier, BuildError> {
    if is_blank(name) {
        return Err(BuildError::EmptyModifierName);
    }
    let relation = if relation.is_empty() {
        relations::EQ
    } else {
        relation
    };
    if !relations::is_built_in(relation) {
        return Err(BuildError::InvalidModifierRelation(relation.to_string()));
    }
    Ok(Modifier::with_value(name, relation, escape_special_chars(value)))
}

fn flag_modifier(name: &str) -> Result<Modifier, BuildError> {
    if is_blank(name) {
        return Err(BuildError::EmptyModifierName);
    }
    Ok(Modifier::flag(name))
}

/// Entry point: prefixes and sort keys, then the root clause.
#[must_use]
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    draft: Draft,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        QueryBuilder::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder {
            draft: Draft::new(None, Vec::new()),
        }
    }

    /// Continue from an existing query, whose clause becomes the root.
    pub fn from_query(query: Query) -> Self {
        QueryBuilder {
            draft: Draft::new(Some(query.clause), query.sort_spec),
        }
    }

    /// Continue from CQL text, parsed leniently.
    pub fn from_cql(text: &str) -> Result<Self, ParseError> {
        Ok(QueryBuilder::from_query(Parser::new().parse(text)?))
    }

    /// Declare `> name = uri`, or `> uri` when `name` is empty.
    pub fn prefix(mut self, name: &str, uri: &str) -> Self {
        self.draft.prefix(name, uri);
        self
    }

    pub fn sort_by(mut self, index: &str, modifiers: &[&str]) -> Self {
        let modifiers = modifiers.iter().map(|name| Modifier::flag(*name)).collect();
        self.draft.sort(index, modifiers);
        self
    }

    pub fn sort_by_modifiers(mut self, index: &str, modifiers: Vec<Modifier>) -> Self {
        self.draft.sort(index, modifiers);
        self
    }

    /// Start the root search clause on `index`.
    pub fn search(mut self, index: &str) -> SearchBuilder {
        if self.draft.ok() && self.draft.occupied() {
            self.draft.fail(BuildError::DuplicateRoot);
        }
        SearchBuilder::new(self.draft, index)
    }

    /// Open a parenthesized root clause.
    pub fn begin_clause(mut self) -> ClauseBuilder {
        self.draft.begin();
        ClauseBuilder { draft: self.draft }
    }

    /// Append to the existing root with `and`.
    pub fn and(self) -> JoinBuilder {
        self.join_with(Operator::And)
    }

    pub fn or(self) -> JoinBuilder {
        self.join_with(Operator::Or)
    }

    pub fn not(self) -> JoinBuilder {
        self.join_with(Operator::Not)
    }

    pub fn prox(self) -> JoinBuilder {
        self.join_with(Operator::Prox)
    }

    pub fn join_with(mut self, operator: Operator) -> JoinBuilder {
        self.draft.join(operator);
        JoinBuilder { draft: self.draft }
    }

    /// Append with an operator given by name.
    pub fn join(mut self, operator: &str) -> JoinBuilder {
        self.draft.join_named(operator);
        JoinBuilder { draft: self.draft }
    }

    pub fn build(self) -> Result<Query, BuildError> {
        self.draft.build()
    }
}

/// A search clause waiting for its term.
#[must_use]
#[derive(Debug, Clone)]
pub struct SearchBuilder {
    draft: Draft,
    index: String,
    relation: String,
    modifiers: Vec<Modifier>,
}

impl SearchBuilder {
    fn new(draft: Draft, index: &str) -> Self {
        SearchBuilder {
            draft,
            index: index.to_string(),
            relation: String::new(),
            modifiers: Vec::new(),
        }
    }

    /// Set the relation; empty leaves the default `=`.
    pub fn rel(mut self, relation: &str) -> Self {
        if !self.draft.ok() {
            return self;
        }
        if relation.is_empty() {
            self.relation.clear();
        } else if relations::is_built_in(relation) {
            self.relation = relation.to_string();
        } else {
            self.draft
                .fail(BuildError::InvalidRelation(relation.to_string()));
        }
        self
    }

    /// Add a `/name` modifier to the relation.
    pub fn modifier(mut self, name: &str) -> Self {
        if self.draft.ok() {
            match flag_modifier(name) {
                Ok(modifier) => self.modifiers.push(modifier),
                Err(error) => self.draft.fail(error),
            }
        }
        self
    }

    /// Add a `/name<relation>value` modifier; the value is escaped.
    pub fn modifier_with(mut self, name: &str, relation: &str, value: &str) -> Self {
        if self.draft.ok() {
            match named_modifier(name, relation, value) {
                Ok(modifier) => self.modifiers.push(modifier),
                Err(error) => self.draft.fail(error),
            }
        }
        self
    }

    /// Finish with `term`, escaping quotes, backslashes and masking
    /// characters so it matches literally.
    pub fn term(mut self, term: &str) -> ExprBuilder {
        if is_blank(term) {
            self.draft.fail(BuildError::EmptyTerm);
        }
        let escaped = escape_masking_chars(&escape_special_chars(term));
        self.finish(escaped)
    }

    /// Finish with `term` exactly as given. The caller is responsible for
    /// escaping.
    pub fn term_unsafe(self, term: &str) -> ExprBuilder {
        self.finish(term.to_string())
    }

    fn finish(mut self, term: String) -> ExprBuilder {
        let clause = SearchClause {
            index: self.index,
            relation: self.relation,
            modifiers: self.modifiers,
            term,
        };
        self.draft.attach(clause.into());
        ExprBuilder { draft: self.draft }
    }
}

/// A boolean operator waiting for its right operand.
#[must_use]
#[derive(Debug, Clone)]
pub struct JoinBuilder {
    draft: Draft,
}

impl JoinBuilder {
    fn push_modifier(&mut self, modifier: Result<Modifier, BuildError>) {
        if !self.draft.ok() {
            return;
        }
        match modifier {
            Ok(modifier) => {
                if let Some((_, modifiers)) = &mut self.draft.current().join {
                    modifiers.push(modifier);
                }
            }
            Err(error) => self.draft.fail(error),
        }
    }

    /// Add a `/name` modifier to the operator.
    pub fn modifier(mut self, name: &str) -> Self {
        self.push_modifier(flag_modifier(name));
        self
    }

    pub fn modifier_with(mut self, name: &str, relation: &str, value: &str) -> Self {
        self.push_modifier(named_modifier(name, relation, value));
        self
    }

    pub fn search(self, index: &str) -> SearchBuilder {
        SearchBuilder::new(self.draft, index)
    }

    /// Open a parenthesized right operand.
    pub fn begin_clause(mut self) -> ClauseBuilder {
        self.draft.begin();
        ClauseBuilder { draft: self.draft }
    }
}

/// Just inside an opened parenthesis.
#[must_use]
#[derive(Debug, Clone)]
pub struct ClauseBuilder {
    draft: Draft,
}

impl ClauseBuilder {
    pub fn search(self, index: &str) -> SearchBuilder {
        SearchBuilder::new(self.draft, index)
    }

    pub fn begin_clause(mut self) -> ClauseBuilder {
        self.draft.begin();
        self
    }
}

/// A complete operand that can be extended, closed or built.
#[must_use]
#[derive(Debug, Clone)]
pub struct ExprBuilder {
    draft: Draft,
}

impl ExprBuilder {
    pub fn and(self) -> JoinBuilder {
        self.join_with(Operator::And)
    }

    pub fn or(self) -> JoinBuilder {
        self.join_with(Operator::Or)
    }

    pub fn not(self) -> JoinBuilder {
        self.join_with(Operator::Not)
    }

    pub fn prox(self) -> JoinBuilder {
        self.join_with(Operator::Prox)
    }

    pub fn join_with(mut self, operator: Operator) -> JoinBuilder {
        self.draft.join(operator);
        JoinBuilder { draft: self.draft }
    }

    pub fn join(mut self, operator: &str) -> JoinBuilder {
        self.draft.join_named(operator);
        JoinBuilder { draft: self.draft }
    }

    /// Close the innermost clause opened with `begin_clause`.
    pub fn end_clause(mut self) -> ExprBuilder {
        self.draft.end();
        self
    }

    pub fn sort_by(mut self, index: &str, modifiers: &[&str]) -> Self {
        let modifiers = modifiers.iter().map(|name| Modifier::flag(*name)).collect();
        self.draft.sort(index, modifiers);
        self
    }

    pub fn sort_by_modifiers(mut self, index: &str, modifiers: Vec<Modifier>) -> Self {
        self.draft.sort(index, modifiers);
        self
    }

    pub fn build(self) -> Result<Query, BuildError> {
        self.draft.build()
    }
}
