use super::SqlError;
use crate::ast::{SearchClause, relations};
use crate::value::Value;

/// Renders search clauses against one column.
pub trait Field {
    fn column(&self) -> &str;

    /// Render `search` as a predicate whose first placeholder is
    /// `$first_argument`, returning the SQL text and its arguments.
    fn generate(
        &self,
        search: &SearchClause,
        first_argument: usize,
    ) -> Result<(String, Vec<Value>), SqlError>;
}

/// `column IS NOT NULL` for `index = ""`.
pub(super) fn empty_term(column: &str, search: &SearchClause) -> Option<String> {
    (search.term.is_empty() && search.relation_or_default() == relations::EQ)
        .then(|| format!("{column} IS NOT NULL"))
}

/// SQL operator for a relation on a column without ordering.
pub(super) fn unordered_relation(search: &SearchClause) -> Result<&'static str, SqlError> {
    match search.relation_or_default() {
        relations::EXACT_EQ | relations::EXACT | relations::EQ => Ok("="),
        relations::NE => Ok("<>"),
        other => Err(SqlError::UnsupportedRelation(other.to_string())),
    }
}

/// SQL operator for a relation on an ordered column.
pub(super) fn ordered_relation(search: &SearchClause) -> Result<&'static str, SqlError> {
    match search.relation_or_default() {
        relations::EXACT_EQ | relations::EXACT | relations::EQ => Ok("="),
        relations::NE => Ok("<>"),
        relations::LT => Ok("<"),
        relations::GT => Ok(">"),
        relations::LE => Ok("<="),
        relations::GE => Ok(">="),
        other => Err(SqlError::UnsupportedRelation(other.to_string())),
    }
}
