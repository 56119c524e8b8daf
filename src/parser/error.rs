use std::fmt;

/// Marker inserted into the query text at the error offset.
const MARK: char = '\u{0330}';

/// A syntax error with the offset it was detected at.
///
/// Renders as `"<message> at position <pos>: <query with marker>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    query: String,
    message: String,
    position: usize,
    marked: String,
}

impl ParseError {
    /// Build an error for `input`, with `position` a byte offset into it.
    pub fn new(input: &[u8], message: impl Into<String>, position: usize) -> Self {
        let split = position.min(input.len());
        let (head, tail) = input.split_at(split);
        let mut marked = String::from_utf8_lossy(head).into_owned();
        marked.push(MARK);
        marked.push_str(&String::from_utf8_lossy(tail));

        ParseError {
            query: String::from_utf8_lossy(input).into_owned(),
            message: message.into(),
            position,
            marked,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the error.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The text that failed to parse. Invalid UTF-8 is replaced by U+FFFD.
    pub fn source_query(&self) -> &str {
        &self.query
    }

    /// The query with a combining tilde below the character at the error.
    pub fn marked(&self) -> &str {
        &self.marked
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}: {}", self.message, self.position, self.marked)
    }
}

impl std::error::Error for ParseError {}
