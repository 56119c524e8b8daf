//! XCQL output: the XML rendering of a CQL query.
//!
//! The document follows the OASIS searchRetrieve XCQL schema. Top-level
//! prefixes come first, then the clause tree, then sort keys. Defaults are
//! written out, so `fish` renders with index `cql.serverChoice` and relation
//! `=`.
//!
//! # Examples
//!
//! ```
//! use cql_lang::{parse, xcql::to_xcql_pretty};
//!
//! let query = parse("fish", false).unwrap();
//! let xml = to_xcql_pretty(&query, 1);
//! assert!(xml.starts_with("<xcql xmlns=\"http://docs.oasis-open.org/ns/search-ws/xcql\">\n"));
//! assert!(xml.contains("  <searchClause>\n"));
//! assert!(xml.contains("<index>cql.serverChoice</index>"));
//! ```

use crate::ast::{Clause, ClauseKind, Modifier, Query, SearchClause, relations};
use std::io;

pub const NAMESPACE: &str = "http://docs.oasis-open.org/ns/search-ws/xcql";

/// Renders queries as XCQL, indenting each level by `indent` spaces.
pub struct XcqlPrinter {
    indent: usize,
}

impl XcqlPrinter {
    pub fn new(indent: usize) -> Self {
        XcqlPrinter { indent }
    }

    pub fn print(&self, query: &Query) -> String {
        let mut out = String::new();
        self.line(&mut out, 0, &format!("<xcql xmlns=\"{NAMESPACE}\">"));
        self.print_clause_root(&mut out, &query.clause, 1);
        self.print_sort_keys(&mut out, query, 1);
        self.line(&mut out, 0, "</xcql>");
        out
    }

    fn pad(&self, out: &mut String, level: usize) {
        out.extend(std::iter::repeat_n(' ', level * self.indent));
    }

    fn line(&self, out: &mut String, level: usize, markup: &str) {
        self.pad(out, level);
        out.push_str(markup);
        out.push('\n');
    }

    /// `<tag>text</tag>` on one line.
    fn element(&self, out: &mut String, level: usize, tag: &str, text: &str) {
        self.pad(out, level);
        out.push('<');
        out.push_str(tag);
        out.push('>');
        escape_into(out, text);
        out.push_str("</");
        out.push_str(tag);
        out.push_str(">\n");
    }

    fn print_clause_root(&self, out: &mut String, clause: &Clause, level: usize) {
        if !clause.prefixes.is_empty() {
            self.line(out, level, "<prefixes>");
            for prefix in &clause.prefixes {
                self.line(out, level + 1, "<prefix>");
                self.element(out, level + 2, "name", &prefix.name);
                self.element(out, level + 2, "identifier", &prefix.uri);
                self.line(out, level + 1, "</prefix>");
            }
            self.line(out, level, "</prefixes>");
        }
        match &clause.kind {
            ClauseKind::Boolean(_) => self.print_clause(out, clause, level),
            _ => {
                // the schema wants a triple around a lone search clause
                self.line(out, level, "<triple>");
                self.print_clause(out, clause, level + 1);
                self.line(out, level, "</triple>");
            }
        }
    }

    fn print_clause(&self, out: &mut String, clause: &Clause, level: usize) {
        // left spine, top first; each triple nests its left operand two levels in
        let mut spine = Vec::new();
        let mut head = clause;
        while let ClauseKind::Boolean(boolean) = &head.kind {
            let at = level + 2 * spine.len();
            self.line(out, at, "<triple>");
            self.line(out, at + 1, "<Boolean>");
            self.element(out, at + 2, "value", boolean.operator.as_str());
            self.print_modifiers(out, &boolean.modifiers, at + 2);
            self.line(out, at + 1, "</Boolean>");
            self.line(out, at + 1, "<leftOperand>");
            spine.push(boolean);
            head = &boolean.left;
        }

        match &head.kind {
            ClauseKind::Search(search) => {
                self.print_search(out, search, level + 2 * spine.len());
            }
            _ => {
                let all = SearchClause {
                    index: relations::ALL_RECORDS.to_string(),
                    relation: relations::EQ.to_string(),
                    modifiers: Vec::new(),
                    term: "1".to_string(),
                };
                self.print_search(out, &all, level + 2 * spine.len());
            }
        }

        for (depth, boolean) in spine.iter().enumerate().rev() {
            let at = level + 2 * depth;
            self.line(out, at + 1, "</leftOperand>");
            self.line(out, at + 1, "<rightOperand>");
            self.print_clause(out, &boolean.right, at + 2);
            self.line(out, at + 1, "</rightOperand>");
            self.line(out, at, "</triple>");
        }
    }

    fn print_search(&self, out: &mut String, search: &SearchClause, level: usize) {
        self.line(out, level, "<searchClause>");
        self.element(out, level + 1, "index", search.index_or_default());
        self.line(out, level + 1, "<relation>");
        self.element(out, level + 2, "value", search.relation_or_default());
        self.line(out, level + 1, "</relation>");
        self.print_modifiers(out, &search.modifiers, level + 1);
        self.element(out, level + 1, "term", &search.term);
        self.line(out, level, "</searchClause>");
    }

    fn print_modifiers(&self, out: &mut String, modifiers: &[Modifier], level: usize) {
        if modifiers.is_empty() {
            return;
        }
        self.line(out, level, "<modifiers>");
        for modifier in modifiers {
            self.line(out, level + 1, "<modifier>");
            self.element(out, level + 2, "type", &modifier.name);
            if !modifier.relation.is_empty() || !modifier.value.is_empty() {
                let comparison = if modifier.relation.is_empty() {
                    relations::DEFAULT
                } else {
                    &modifier.relation
                };
                self.element(out, level + 2, "comparison", comparison);
                self.element(out, level + 2, "value", &modifier.value);
            }
            self.line(out, level + 1, "</modifier>");
        }
        self.line(out, level, "</modifiers>");
    }

    fn print_sort_keys(&self, out: &mut String, query: &Query, level: usize) {
        if query.sort_spec.is_empty() {
            return;
        }
        self.line(out, level, "<sortKeys>");
        for sort in &query.sort_spec {
            self.line(out, level + 1, "<key>");
            self.element(out, level + 2, "index", &sort.index);
            self.print_modifiers(out, &sort.modifiers, level + 2);
            self.line(out, level + 1, "</key>");
        }
        self.line(out, level, "</sortKeys>");
    }
}

/// Escape `& < >`. Characters XML 1.0 cannot carry become U+FFFD.
fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' | '\n' | '\r' => out.push(ch),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => out.push('\u{FFFD}'),
            _ => out.push(ch),
        }
    }
}

/// Render `query` without indentation.
pub fn to_xcql(query: &Query) -> String {
    XcqlPrinter::new(0).print(query)
}

pub fn to_xcql_pretty(query: &Query, indent: usize) -> String {
    XcqlPrinter::new(indent).print(query)
}

/// Render `query` into `writer`.
pub fn write_xcql<W: io::Write>(query: &Query, indent: usize, mut writer: W) -> io::Result<()> {
    writer.write_all(XcqlPrinter::new(indent).print(query).as_bytes())
}
