//! Translate CQL queries to SQL predicates

use super::CliError;
use crate::Parser;
use crate::ast::relations;
use crate::sql::{Definition, NumberField, SqlQuery, StringField};

/// Options for the sql command
#[derive(Debug, Clone)]
pub struct SqlOptions {
    pub query: String,
    pub strict: bool,
    /// Column searched when the query names no index
    pub server_choice: Option<String>,
    /// Exact-match text fields as `NAME` or `NAME=COLUMN`
    pub fields: Vec<String>,
    /// Numeric fields as `NAME` or `NAME=COLUMN`
    pub numbers: Vec<String>,
    /// Number of the first `$n` placeholder
    pub first_argument: usize,
}

impl Default for SqlOptions {
    fn default() -> Self {
        SqlOptions {
            query: String::new(),
            strict: false,
            server_choice: None,
            fields: Vec::new(),
            numbers: Vec::new(),
            first_argument: 1,
        }
    }
}

/// Split `NAME=COLUMN`; a bare `NAME` is its own column.
fn field_mapping(mapping: &str) -> Result<(&str, &str), CliError> {
    let (name, column) = mapping.split_once('=').unwrap_or((mapping, mapping));
    if name.is_empty() || column.is_empty() {
        return Err(CliError::FieldMapping(mapping.to_string()));
    }
    Ok((name, column))
}

/// Build the field definition from the options.
fn definition(options: &SqlOptions) -> Result<Definition, CliError> {
    let mut def = Definition::new();
    if let Some(column) = &options.server_choice {
        def.add_field(
            relations::SERVER_CHOICE,
            StringField::new(column.as_str()).with_like_ops(),
        );
    }
    for mapping in &options.fields {
        let (name, column) = field_mapping(mapping)?;
        def.add_field(name, StringField::new(column).with_like_ops());
    }
    for mapping in &options.numbers {
        let (name, column) = field_mapping(mapping)?;
        def.add_field(name, NumberField::new(column));
    }
    Ok(def)
}

pub fn execute_sql(options: &SqlOptions) -> Result<SqlQuery, CliError> {
    let def = definition(options)?;
    let query = Parser::new().strict(options.strict).parse(options.query.trim_end())?;
    let translated = def.translate(&query, options.first_argument)?;
    tracing::info!(arguments = translated.arguments().len(), "translated query");
    Ok(translated)
}
