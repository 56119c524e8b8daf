//! CLI support for cql-lang
//!
//! Provides programmatic access to the `cql` command's functionality for
//! embedding in other tools.

mod check;
mod convert;
mod docs;
mod translate;

pub use check::{CheckOptions, CheckResult, OutputFormat, execute_check};
pub use convert::query_to_json;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use translate::{SqlOptions, execute_sql};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Translation error: {0}")]
    Sql(#[from] crate::SqlError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown output format: '{0}'. Expected cql, json, xcql or debug.")]
    UnknownFormat(String),

    #[error("Invalid field mapping: '{0}'. Expected NAME or NAME=COLUMN.")]
    FieldMapping(String),

    #[error("Unknown category: '{0}'\nRun 'cql docs' to see available categories.")]
    UnknownCategory(String),
}
