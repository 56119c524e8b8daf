//! Canonical CQL text output.
//!
//! Every AST type implements [`Display`](fmt::Display), producing text that
//! parses back into a tree that prints the same way. Output is canonical:
//!
//! - **Default elision** - `cql.serverChoice` and `=` are left out, so a bare
//!   term prints as just the term
//! - **Minimal grouping** - boolean chains associate left, so only a right
//!   operand that is itself boolean (or carries prefixes) gets parentheses
//! - **Quoting** - values that are empty or contain whitespace or one of
//!   `( ) / < > = "` are double-quoted, with unescaped `"` escaped
//!
//! # Examples
//!
//! ```
//! use cql_lang::parse;
//!
//! let query = parse("(a = x or a = y) and (b = z or b = q)", false).unwrap();
//! assert_eq!(query.to_string(), "a = x or a = y and (b = z or b = q)");
//! ```

use crate::ast::{
    BoolClause, Clause, ClauseKind, Modifier, Prefix, Query, SearchClause, Sort, relations,
};
use std::fmt::{self, Write};

const STRUCTURAL: &[char] = &['(', ')', '/', '<', '>', '=', '"', ' ', '\t', '\r', '\n'];

/// Render `value` as a CQL word, quoting it when needed.
///
/// An unescaped `"` is escaped, and a value ending in an odd run of
/// backslashes gets one more so the closing quote survives.
///
/// ```
/// use cql_lang::output::quote;
///
/// assert_eq!(quote("alpha"), "alpha");
/// assert_eq!(quote("two words"), "\"two words\"");
/// assert_eq!(quote(""), "\"\"");
/// assert_eq!(quote("abc\\"), "abc\\\\");
/// ```
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_quoted(&mut out, value).unwrap_or_default();
    out
}

fn write_quoted<W: Write>(w: &mut W, value: &str) -> fmt::Result {
    let quoted = value.is_empty() || value.contains(STRUCTURAL);
    if quoted {
        w.write_char('"')?;
    }
    let mut escaped = false;
    for ch in value.chars() {
        if ch == '"' && !escaped {
            w.write_char('\\')?;
        }
        escaped = ch == '\\' && !escaped;
        w.write_char(ch)?;
    }
    if escaped {
        w.write_char('\\')?;
    }
    if quoted {
        w.write_char('"')?;
    }
    Ok(())
}

fn write_modifiers<W: Write>(w: &mut W, modifiers: &[Modifier]) -> fmt::Result {
    for modifier in modifiers {
        write!(w, "/{modifier}")?;
    }
    Ok(())
}

/// Write `clause`, parenthesized when it is the right operand of a boolean
/// clause (`brackets`) and would otherwise re-associate.
fn write_clause<W: Write>(w: &mut W, clause: &Clause, brackets: bool) -> fmt::Result {
    let prefixed = !clause.prefixes.is_empty();
    if prefixed && brackets {
        w.write_char('(')?;
    }
    for prefix in &clause.prefixes {
        write!(w, "{prefix} ")?;
    }
    match &clause.kind {
        ClauseKind::Search(search) => write!(w, "{search}")?,
        ClauseKind::Boolean(boolean) => {
            if brackets {
                if !prefixed {
                    w.write_char('(')?;
                }
                write_bool(w, boolean)?;
                return w.write_char(')');
            }
            write_bool(w, boolean)?;
        }
        ClauseKind::MatchAll => write!(w, "{} = 1", relations::ALL_RECORDS)?,
    }
    if prefixed && brackets {
        w.write_char(')')?;
    }
    Ok(())
}

/// Write a boolean chain. The left spine is walked iteratively so long
/// `a and b and c ...` chains do not recurse once per operator.
fn write_bool<W: Write>(w: &mut W, boolean: &BoolClause) -> fmt::Result {
    let mut spine = vec![boolean];
    let mut head = &boolean.left;
    while let (true, ClauseKind::Boolean(inner)) = (head.prefixes.is_empty(), &head.kind) {
        spine.push(inner);
        head = &inner.left;
    }

    write_clause(w, head, false)?;
    for link in spine.iter().rev() {
        write!(w, " {}", link.operator)?;
        write_modifiers(w, &link.modifiers)?;
        w.write_char(' ')?;
        write_clause(w, &link.right, true)?;
    }
    Ok(())
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clause(f, &self.clause, false)?;
        if !self.sort_spec.is_empty() {
            f.write_str(" sortBy")?;
            for sort in &self.sort_spec {
                write!(f, " {sort}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clause(f, self, false)
    }
}

impl fmt::Display for BoolClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bool(f, self)
    }
}

impl fmt::Display for SearchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self.index_or_default();
        let relation = self.relation_or_default();
        let implied = index == relations::SERVER_CHOICE
            && (relation == relations::EQ || relation == relations::SCR)
            && self.modifiers.is_empty();
        if !implied {
            write_quoted(f, index)?;
            write!(f, " {relation}")?;
            write_modifiers(f, &self.modifiers)?;
            f.write_char(' ')?;
        }
        write_quoted(f, &self.term)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("> ")?;
        if !self.name.is_empty() {
            write_quoted(f, &self.name)?;
            f.write_str(" = ")?;
        }
        write_quoted(f, &self.uri)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.index)?;
        write_modifiers(f, &self.modifiers)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.name)?;
        if !self.value.is_empty() {
            let relation = if self.relation.is_empty() {
                relations::DEFAULT
            } else {
                &self.relation
            };
            f.write_str(relation)?;
            write_quoted(f, &self.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        let cases = vec![
            ("a\"b", "\"a\\\"b\""),
            ("a\" b", "\"a\\\" b\""),
            ("a\\\"b", "\"a\\\"b\""),
            ("abc\\\\", "abc\\\\"),
            ("a=b", "\"a=b\""),
            ("tab\there", "\"tab\there\""),
        ];
        for (input, expected) in cases {
            assert_eq!(quote(input), expected, "Failed for input: {}", input);
        }
    }
}
