use super::field::{self, Field};
use super::{SqlError, check_column, check_language};
use crate::ast::{SearchClause, relations};
use crate::value::Value;

const BAD_BACKSLASH: &str =
    "a masking backslash in a CQL string must be followed by *, ?, ^, \" or \\";
const TRAILING_BACKSLASH: &str = "a CQL string must not end with a masking backslash";

/// A text column.
///
/// Which relations are supported depends on the enabled features; with
/// none enabled every relation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringField {
    column: String,
    language: Option<String>,
    like: bool,
    exact: bool,
    split: bool,
}

impl StringField {
    pub fn new(column: impl Into<String>) -> Self {
        StringField {
            column: column.into(),
            ..StringField::default()
        }
    }

    /// Match `=`, `adj`, `all` and `any` with PostgreSQL full-text search.
    /// An empty language selects the `simple` configuration.
    pub fn with_full_text(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = Some(if language.is_empty() {
            "simple".to_string()
        } else {
            language
        });
        self
    }

    /// Translate `*` and `?` masking into `LIKE` patterns. Implies exact.
    pub fn with_like_ops(mut self) -> Self {
        self.exact = true;
        self.like = true;
        self
    }

    /// Compare whole values with `=` and `<>`.
    pub fn with_exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Treat the term as a space separated list for `any` and `<>`.
    pub fn with_split(mut self) -> Self {
        self.split = true;
        self
    }

    fn ts_query(
        &self,
        column: &str,
        language: &str,
        search: &SearchClause,
        joiner: &str,
        first_argument: usize,
    ) -> Result<(String, Vec<Value>), SqlError> {
        let language = check_language(language)?;
        let words: Vec<String> = masked_split(&search.term, &[' '])?
            .into_iter()
            .map(|word| format!("'{}'", word.replace('\'', "''")))
            .collect();
        Ok((
            format!(
                "to_tsvector('{language}', {column}) @@ to_tsquery('{language}', ${first_argument})"
            ),
            vec![Value::Text(words.join(joiner))],
        ))
    }

    fn in_list(
        &self,
        column: &str,
        search: &SearchClause,
        negated: bool,
        first_argument: usize,
    ) -> Result<(String, Vec<Value>), SqlError> {
        let words = masked_split(&search.term, &[' '])?;
        let placeholders: Vec<String> = (0..words.len())
            .map(|i| format!("${}", first_argument + i))
            .collect();
        let not = if negated { " NOT" } else { "" };
        Ok((
            format!("{column}{not} IN({})", placeholders.join(", ")),
            words.into_iter().map(Value::Text).collect(),
        ))
    }
}

impl Field for StringField {
    fn column(&self) -> &str {
        &self.column
    }

    fn generate(
        &self,
        search: &SearchClause,
        first_argument: usize,
    ) -> Result<(String, Vec<Value>), SqlError> {
        let column = check_column(&self.column)?;
        if let Some(sql) = field::empty_term(column, search) {
            return Ok((sql, Vec::new()));
        }
        let relation = search.relation_or_default();

        if let Some(language) = &self.language {
            let joiner = match relation {
                relations::ADJ | relations::EQ => Some("<->"),
                relations::ALL => Some("&"),
                relations::ANY => Some("|"),
                _ => None,
            };
            if let Some(joiner) = joiner {
                return self.ts_query(column, language, search, joiner, first_argument);
            }
        }

        if self.split {
            match relation {
                relations::ANY => return self.in_list(column, search, false, first_argument),
                relations::NE => return self.in_list(column, search, true, first_argument),
                _ => {}
            }
        }

        if !self.exact {
            return Err(SqlError::UnsupportedRelation(relation.to_string()));
        }

        if self.like && matches!(relation, relations::EQ | relations::EXACT | relations::NE) {
            let (pattern, masked) = masked_like(&search.term)?;
            if masked {
                let op = if relation == relations::NE { "NOT LIKE" } else { "LIKE" };
                return Ok((
                    format!("{column} {op} ${first_argument}"),
                    vec![Value::Text(pattern)],
                ));
            }
        }

        let term = masked_exact(&search.term)?;
        let op = field::unordered_relation(search)?;
        Ok((
            format!("{column} {op} ${first_argument}"),
            vec![Value::Text(term)],
        ))
    }
}

/// Unescape a term that must not use masking.
fn masked_exact(term: &str) -> Result<String, SqlError> {
    Ok(masked_split(term, &[])?.into_iter().next().unwrap_or_default())
}

/// Unescape a term and split it at any of `separators`, dropping empty
/// words. Masking characters are rejected.
fn masked_split(term: &str, separators: &[char]) -> Result<Vec<String>, SqlError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut backslash = false;

    for ch in term.chars() {
        if backslash {
            match ch {
                '*' | '"' | '?' | '^' | '\\' => word.push(ch),
                _ => return Err(SqlError::Masking(BAD_BACKSLASH)),
            }
            backslash = false;
            continue;
        }
        match ch {
            '*' => return Err(SqlError::Masking("masking op * unsupported")),
            '?' => return Err(SqlError::Masking("masking op ? unsupported")),
            '^' => return Err(SqlError::Masking("anchor op ^ unsupported")),
            '\\' => backslash = true,
            c if separators.contains(&c) => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            c => word.push(c),
        }
    }
    if backslash {
        return Err(SqlError::Masking(TRAILING_BACKSLASH));
    }
    if !word.is_empty() || words.is_empty() {
        words.push(word);
    }
    Ok(words)
}

/// Turn a masked term into a `LIKE` pattern. The flag tells whether the
/// term used any masking at all.
fn masked_like(term: &str) -> Result<(String, bool), SqlError> {
    let mut pattern = String::with_capacity(term.len());
    let mut masked = false;
    let mut backslash = false;

    for ch in term.chars() {
        if backslash {
            match ch {
                '*' | '?' | '^' | '"' => pattern.push(ch),
                '\\' => pattern.push_str("\\\\"),
                _ => return Err(SqlError::Masking(BAD_BACKSLASH)),
            }
            backslash = false;
            continue;
        }
        match ch {
            '*' => {
                pattern.push('%');
                masked = true;
            }
            '?' => {
                pattern.push('_');
                masked = true;
            }
            '^' => return Err(SqlError::Masking("anchor op ^ unsupported")),
            '\\' => backslash = true,
            '%' | '_' => {
                pattern.push('\\');
                pattern.push(ch);
            }
            c => pattern.push(c),
        }
    }
    if backslash {
        return Err(SqlError::Masking(TRAILING_BACKSLASH));
    }
    Ok((pattern, masked))
}
