use super::operators::Operator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// End of input
    Eof,

    // Comparison relations
    /// Equality, also the default relation
    ///
    /// # Examples
    /// ```text
    /// dc.title = fish
    /// ```
    Eq,

    /// Exact equality
    ///
    /// # Examples
    /// ```text
    /// dc.identifier == "0-8044-2957-X"
    /// ```
    EqEq,

    /// `<`
    Lt,

    /// `<=`
    LtEq,

    /// `>`, also the prefix declaration marker at the start of a query
    ///
    /// # Examples
    /// ```text
    /// > dc = "info:srw/cql-context-set/1/dc-v1.1" dc.title = fish
    /// year > 1990
    /// ```
    Gt,

    /// `>=`
    GtEq,

    /// `<>`
    NotEq,

    // Keywords (case-insensitive, spelling kept so they can serve as terms)
    /// Boolean `and`
    And(String),

    /// Boolean `or`
    Or(String),

    /// Boolean `not`
    Not(String),

    /// Boolean `prox`
    Prox(String),

    /// The `sortby` keyword
    ///
    /// # Examples
    /// ```text
    /// fish sortby dc.date/sort.descending
    /// ```
    SortBy(String),

    /// A bare word naming a relation: `all`, `any`, `adj`, `scr`, `exact`,
    /// `within` or `encloses`
    NamedRelation(String),

    /// A bare word containing an unescaped `.`
    ///
    /// Acts as a relation when its part before the first dot is a bound
    /// prefix name, and as an index or term otherwise.
    ///
    /// # Examples
    /// ```text
    /// dc.title
    /// cql.exact
    /// ```
    PrefixName(String),

    /// A quoted string or a plain bare word
    ///
    /// Backslash escapes are kept verbatim in the value.
    ///
    /// # Examples
    /// ```text
    /// fish
    /// "two words"
    /// "say \"hi\""
    /// ```
    String(String),

    /// Modifier separator `/`
    Slash,

    /// `(`
    LParen,

    /// `)`
    RParen,

    /// An undecodable byte sequence
    Error,
}

impl Token {
    /// The relation spelled by a comparison token.
    pub fn comparison(&self) -> Option<&'static str> {
        match self {
            Token::Eq => Some("="),
            Token::EqEq => Some("=="),
            Token::Lt => Some("<"),
            Token::LtEq => Some("<="),
            Token::Gt => Some(">"),
            Token::GtEq => Some(">="),
            Token::NotEq => Some("<>"),
            _ => None,
        }
    }

    pub fn boolean_operator(&self) -> Option<Operator> {
        match self {
            Token::And(_) => Some(Operator::And),
            Token::Or(_) => Some(Operator::Or),
            Token::Not(_) => Some(Operator::Not),
            Token::Prox(_) => Some(Operator::Prox),
            _ => None,
        }
    }

    /// Whether the token may stand where an index, term or modifier name is
    /// expected. Keywords qualify, so `and = x` searches the index `and`.
    pub fn is_search_term(&self) -> bool {
        matches!(
            self,
            Token::String(_)
                | Token::PrefixName(_)
                | Token::NamedRelation(_)
                | Token::And(_)
                | Token::Or(_)
                | Token::Not(_)
                | Token::Prox(_)
                | Token::SortBy(_)
        )
    }

    /// The literal text of the token as it will be stored in the AST.
    pub fn text(&self) -> &str {
        match self {
            Token::And(s)
            | Token::Or(s)
            | Token::Not(s)
            | Token::Prox(s)
            | Token::SortBy(s)
            | Token::NamedRelation(s)
            | Token::PrefixName(s)
            | Token::String(s) => s,
            Token::Slash => "/",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Eof | Token::Error => "",
            other => other.comparison().unwrap_or_default(),
        }
    }

    /// Consume the token, returning its text without copying when it owns one.
    pub fn into_text(self) -> String {
        match self {
            Token::And(s)
            | Token::Or(s)
            | Token::Not(s)
            | Token::Prox(s)
            | Token::SortBy(s)
            | Token::NamedRelation(s)
            | Token::PrefixName(s)
            | Token::String(s) => s,
            other => other.text().to_string(),
        }
    }
}
