//! Parse CQL queries and render them in a chosen format

use super::{CliError, query_to_json};
use crate::{Parser, xcql};
use std::str::FromStr;

/// Output formats for the check command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Canonical CQL text
    #[default]
    Cql,
    /// The AST as JSON
    Json,
    /// XCQL document
    Xcql,
    /// Rust debug dump of the AST
    Debug,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cql" | "text" => Ok(Self::Cql),
            "json" => Ok(Self::Json),
            "xcql" | "xml" => Ok(Self::Xcql),
            "debug" | "struct" => Ok(Self::Debug),
            _ => Err(CliError::UnknownFormat(s.to_string())),
        }
    }
}

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The CQL query to parse
    pub query: String,
    /// Reject multi-word terms that lack a relation
    pub strict: bool,
    pub format: OutputFormat,
    /// Indentation step for XCQL and pretty JSON
    pub indent: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            query: String::new(),
            strict: false,
            format: OutputFormat::Cql,
            indent: 2,
        }
    }
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Rendered text (CQL, XCQL or debug dump)
    Text(String),
    /// The AST as JSON
    Json(serde_json::Value),
}

/// Parse the query and render it
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query_text = options.query.trim_end_matches(['\r', '\n']);
    if query_text.trim().is_empty() {
        tracing::warn!("empty query");
    }
    tracing::debug!(strict = options.strict, format = ?options.format, "parsing query");

    let query = Parser::new().strict(options.strict).parse(query_text)?;
    tracing::debug!(sort_keys = query.sort_spec.len(), "parsed");

    let result = match options.format {
        OutputFormat::Cql => CheckResult::Text(query.to_string()),
        OutputFormat::Json => CheckResult::Json(query_to_json(&query)),
        OutputFormat::Xcql => CheckResult::Text(xcql::to_xcql_pretty(&query, options.indent)),
        OutputFormat::Debug => CheckResult::Text(format!("{query:#?}")),
    };
    Ok(result)
}
