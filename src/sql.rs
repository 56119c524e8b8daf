//! Translation of CQL queries into parameterized PostgreSQL predicates.
//!
//! A [`Definition`] maps CQL index names to [`Field`]s. Translating a query
//! walks its clause tree, asking each field to render its search clauses,
//! and joins the pieces with `AND`, `OR` and `AND NOT`. Terms never appear in
//! the SQL text; they are returned as numbered `$n` arguments.
//!
//! # Examples
//!
//! ```
//! use cql_lang::{parse, sql::{Definition, StringField}, Value};
//!
//! let mut def = Definition::new();
//! def.add_field("title", StringField::new("title").with_exact())
//!     .add_field("cql.serverChoice", StringField::new("body").with_full_text("english"));
//!
//! let query = parse("title = dune or sand worm", false).unwrap();
//! let sql = def.translate(&query, 1).unwrap();
//! assert_eq!(
//!     sql.where_clause(),
//!     "title = $1 OR to_tsvector('english', body) @@ to_tsquery('english', $2)"
//! );
//! assert_eq!(sql.arguments(), &[Value::from("dune"), Value::from("'sand'<->'worm'")]);
//! ```

mod field;
mod number;
mod string;

pub use field::Field;
pub use number::NumberField;
pub use string::StringField;

use crate::ast::{Clause, ClauseKind, Operator, Query};
use crate::value::Value;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$"));

fn is_identifier(name: &str) -> bool {
    IDENTIFIER.as_ref().is_ok_and(|re| re.is_match(name))
}

/// Errors raised while translating a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlError {
    #[error("unknown field {0}")]
    UnknownField(String),

    #[error("unsupported relation {0}")]
    UnsupportedRelation(String),

    #[error("unsupported operator {0}")]
    UnsupportedOperator(Operator),

    #[error("sorting not supported")]
    SortingUnsupported,

    #[error("invalid number {0}")]
    InvalidNumber(String),

    #[error("invalid column {0}")]
    InvalidColumn(String),

    #[error("invalid language {0}")]
    InvalidLanguage(String),

    /// A masking character or backslash the field cannot express
    #[error("{0}")]
    Masking(&'static str),
}

/// A translated predicate and its bind arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlQuery {
    where_clause: String,
    arguments: Vec<Value>,
}

impl SqlQuery {
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.where_clause, self.arguments)
    }
}

/// Index name to field mapping.
#[derive(Default)]
pub struct Definition {
    fields: HashMap<String, Box<dyn Field>>,
}

impl Definition {
    pub fn new() -> Self {
        Definition::default()
    }

    pub fn add_field(&mut self, name: impl Into<String>, field: impl Field + 'static) -> &mut Self {
        self.fields.insert(name.into(), Box::new(field));
        self
    }

    pub fn field(&self, name: &str) -> Option<&dyn Field> {
        self.fields.get(name).map(|field| field.as_ref())
    }

    /// Translate `query`, numbering arguments from `first_argument`.
    pub fn translate(&self, query: &Query, first_argument: usize) -> Result<SqlQuery, SqlError> {
        if !query.sort_spec.is_empty() {
            return Err(SqlError::SortingUnsupported);
        }
        let mut arguments = Vec::new();
        let where_clause = self.translate_clause(&query.clause, first_argument, &mut arguments)?;
        Ok(SqlQuery {
            where_clause,
            arguments,
        })
    }

    fn translate_clause(
        &self,
        clause: &Clause,
        first_argument: usize,
        arguments: &mut Vec<Value>,
    ) -> Result<String, SqlError> {
        let start = arguments.len();

        // left spine, top first
        let mut spine = Vec::new();
        let mut head = clause;
        while let ClauseKind::Boolean(boolean) = &head.kind {
            spine.push((joiner(boolean.operator)?, boolean));
            head = &boolean.left;
        }

        let mut sql = "(".repeat(spine.len().saturating_sub(1));
        sql.push_str(&self.translate_leaf(head, first_argument, arguments)?);
        for (depth, (joiner, boolean)) in spine.iter().rev().enumerate() {
            if depth > 0 {
                sql.push(')');
            }
            let next_argument = first_argument + arguments.len() - start;
            let right = self.translate_operand(&boolean.right, next_argument, arguments)?;
            sql.push(' ');
            sql.push_str(joiner);
            sql.push(' ');
            sql.push_str(&right);
        }
        Ok(sql)
    }

    fn translate_leaf(
        &self,
        clause: &Clause,
        first_argument: usize,
        arguments: &mut Vec<Value>,
    ) -> Result<String, SqlError> {
        match &clause.kind {
            ClauseKind::Search(search) => {
                let index = search.index_or_default();
                let field = self
                    .field(index)
                    .ok_or_else(|| SqlError::UnknownField(index.to_string()))?;
                let (sql, mut args) = field.generate(search, first_argument)?;
                arguments.append(&mut args);
                Ok(sql)
            }
            _ => Ok("TRUE".to_string()),
        }
    }

    fn translate_operand(
        &self,
        clause: &Clause,
        first_argument: usize,
        arguments: &mut Vec<Value>,
    ) -> Result<String, SqlError> {
        let sql = self.translate_clause(clause, first_argument, arguments)?;
        if clause.as_boolean().is_some() {
            Ok(format!("({sql})"))
        } else {
            Ok(sql)
        }
    }
}

fn joiner(operator: Operator) -> Result<&'static str, SqlError> {
    match operator {
        Operator::And => Ok("AND"),
        Operator::Or => Ok("OR"),
        Operator::Not => Ok("AND NOT"),
        Operator::Prox => Err(SqlError::UnsupportedOperator(operator)),
    }
}

pub(crate) fn check_column(column: &str) -> Result<&str, SqlError> {
    if is_identifier(column) {
        Ok(column)
    } else {
        Err(SqlError::InvalidColumn(column.to_string()))
    }
}

pub(crate) fn check_language(language: &str) -> Result<&str, SqlError> {
    if is_identifier(language) {
        Ok(language)
    } else {
        Err(SqlError::InvalidLanguage(language.to_string()))
    }
}
