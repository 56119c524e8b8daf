mod context;
mod error;

pub use error::ParseError;

use crate::{
    ast::{BoolClause, Clause, ClauseKind, Modifier, Prefix, Query, SearchClause, Sort, Token},
    lexer::Lexer,
};
use context::ParseContext;
use std::mem;

/// Nesting allowed before a query is rejected as too deep.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Boolean operators allowed in one unparenthesized chain.
pub const DEFAULT_MAX_CHAIN: usize = 4096;

/// Recursive-descent CQL parser.
///
/// A parser can be reused for any number of queries but holds the cursor of
/// the query being parsed, so one instance serves one thread at a time.
///
/// ```
/// use cql_lang::Parser;
///
/// let mut parser = Parser::new();
/// let query = parser.parse("dc.title any \"fish frog\" sortby dc.date").unwrap();
/// assert_eq!(query.to_string(), "dc.title any \"fish frog\" sortBy dc.date");
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    strict: bool,
    max_depth: usize,
    max_chain: usize,
    lexer: Lexer,
    current_token: Token,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

type ParseResult<T> = Result<T, ParseError>;

impl Parser {
    pub fn new() -> Self {
        Parser {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_chain: DEFAULT_MAX_CHAIN,
            lexer: Lexer::default(),
            current_token: Token::Eof,
        }
    }

    /// In strict mode a bare term followed by another word is an error
    /// instead of a multi-word term.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Each operator in `a or b or c` deepens the clause tree by one, so
    /// chains longer than this are rejected as too deep.
    pub fn max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn parse(&mut self, input: &str) -> ParseResult<Query> {
        self.parse_bytes(input.as_bytes())
    }

    /// Parse raw bytes. Invalid UTF-8 surfaces as a syntax error at the
    /// offending offset.
    pub fn parse_bytes(&mut self, input: &[u8]) -> ParseResult<Query> {
        self.lexer = Lexer::new(input);
        self.advance();

        let clause = self.parse_cql_query(&ParseContext::root())?;
        let mut sort_spec = Vec::new();
        if self.check(&Token::SortBy(String::new())) {
            self.advance();
            sort_spec = self.parse_sort_keys()?;
        }
        if !self.check(&Token::Eof) {
            return Err(self.error("EOF expected"));
        }
        Ok(Query { clause, sort_spec })
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Take the text of the current token and move past it.
    fn take_text(&mut self) -> String {
        let token = mem::replace(&mut self.current_token, Token::Eof);
        self.advance();
        token.into_text()
    }

    fn error(&self, message: &str) -> ParseError {
        self.error_at(message, self.lexer.position())
    }

    fn error_at(&self, message: &str, position: usize) -> ParseError {
        ParseError::new(self.lexer.input(), message, position)
    }

    /// Whether the current token can be read as a relation in `ctx`.
    fn is_relation(&self, ctx: &ParseContext) -> bool {
        match &self.current_token {
            Token::NamedRelation(_) => true,
            Token::PrefixName(name) => ctx.custom || ctx.is_bound(name),
            Token::String(_) => ctx.custom,
            token => token.comparison().is_some(),
        }
    }

    /// query := prefixDecl* scopedClause
    fn parse_cql_query(&mut self, ctx: &ParseContext) -> ParseResult<Clause> {
        let mut prefixes = Vec::new();
        let mut scope = ctx.clone();

        while self.check(&Token::Gt) {
            self.advance();
            if !self.current_token.is_search_term() {
                return Err(self.error("prefix or uri expected"));
            }
            let first = self.take_text();
            if self.check(&Token::Eq) {
                self.advance();
                if !self.current_token.is_search_term() {
                    return Err(self.error("uri expected"));
                }
                let uri = self.take_text();
                scope = scope.bind_prefix(first.clone());
                prefixes.push(Prefix::new(first, uri));
            } else {
                scope = scope.into_custom();
                prefixes.push(Prefix::unnamed(first));
            }
        }

        let mut clause = self.parse_scoped_clause(&scope)?;
        if !prefixes.is_empty() {
            prefixes.append(&mut clause.prefixes);
            clause.prefixes = prefixes;
        }
        Ok(clause)
    }

    /// scopedClause := searchClause (boolOp modifier* searchClause)*
    fn parse_scoped_clause(&mut self, ctx: &ParseContext) -> ParseResult<Clause> {
        let mut left = self.parse_search_clause(ctx)?;
        let mut links = 0;
        while let Some(operator) = self.current_token.boolean_operator() {
            links += 1;
            if links > self.max_chain {
                return Err(self.error("nesting too deep"));
            }
            self.advance();
            let modifiers = self.parse_modifiers()?;
            let right = self.parse_search_clause(ctx)?;
            left = BoolClause {
                left,
                operator,
                modifiers,
                right,
            }
            .into();
        }
        Ok(left)
    }

    /// searchClause := '(' query ')' | indexOrTerm (relation modifier*)? searchClause | term+
    fn parse_search_clause(&mut self, ctx: &ParseContext) -> ParseResult<Clause> {
        if ctx.depth > self.max_depth {
            return Err(self.error("nesting too deep"));
        }

        if self.check(&Token::LParen) {
            self.advance();
            let clause = self.parse_cql_query(&ctx.nested())?;
            if !self.check(&Token::RParen) {
                return Err(self.error("missing )"));
            }
            self.advance();
            return Ok(clause);
        }

        if !self.current_token.is_search_term() {
            return Err(self.error("search term expected"));
        }
        let relation_position = self.lexer.position();
        let index_or_term = self.take_text();

        if self.is_relation(ctx) {
            let relation = self.take_text();
            let modifiers = self.parse_modifiers()?;
            let inner = ctx.with_relation(index_or_term, relation, modifiers);
            return self.parse_search_clause(&inner);
        }

        let mut term = index_or_term;
        while matches!(
            self.current_token,
            Token::String(_) | Token::PrefixName(_) | Token::NamedRelation(_)
        ) {
            if self.strict {
                return Err(self.error_at("relation expected", relation_position));
            }
            term.push(' ');
            term.push_str(self.current_token.text());
            self.advance();
        }

        Ok(Clause {
            prefixes: Vec::new(),
            kind: ClauseKind::Search(SearchClause {
                index: ctx.index.clone(),
                relation: ctx.relation.clone(),
                modifiers: ctx.modifiers.clone(),
                term,
            }),
        })
    }

    /// modifier := '/' name (comparison value)?
    fn parse_modifiers(&mut self) -> ParseResult<Vec<Modifier>> {
        let mut modifiers = Vec::new();
        while self.check(&Token::Slash) {
            self.advance();
            if !self.current_token.is_search_term() {
                return Err(self.error("missing modifier key"));
            }
            let name = self.take_text();
            let mut modifier = Modifier::flag(name);
            if let Some(relation) = self.current_token.comparison() {
                self.advance();
                if !self.current_token.is_search_term() {
                    return Err(self.error("missing modifier value"));
                }
                modifier.relation = relation.to_string();
                modifier.value = self.take_text();
            }
            modifiers.push(modifier);
        }
        Ok(modifiers)
    }

    /// sortKeys := (index modifier*)*
    fn parse_sort_keys(&mut self) -> ParseResult<Vec<Sort>> {
        let mut keys = Vec::new();
        while self.current_token.is_search_term() {
            let index = self.take_text();
            let modifiers = self.parse_modifiers()?;
            keys.push(Sort { index, modifiers });
        }
        Ok(keys)
    }
}

/// Parse `input` with a fresh parser.
///
/// ```
/// let query = cql_lang::parse("a b c", false).unwrap();
/// assert_eq!(query.to_string(), "\"a b c\"");
///
/// let err = cql_lang::parse("a b c", true).unwrap_err();
/// assert_eq!(err.message(), "relation expected");
/// ```
pub fn parse(input: &str, strict: bool) -> ParseResult<Query> {
    Parser::new().strict(strict).parse(input)
}
