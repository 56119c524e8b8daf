use crate::ast::{Token, relations};

/// One decoded unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scanned {
    Char(char),
    /// A byte that does not start a valid UTF-8 sequence
    Invalid,
}

/// Splits CQL text into tokens.
///
/// The lexer works on bytes so that invalid UTF-8 becomes a [`Token::Error`]
/// instead of a failure. It keeps one character of lookahead; [`position`]
/// reports the byte offset just past that lookahead, which is the offset
/// parse errors are reported at.
///
/// [`position`]: Lexer::position
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    current: Option<Scanned>,
}

impl Lexer {
    pub fn new(input: impl AsRef<[u8]>) -> Self {
        let mut lexer = Lexer {
            input: input.as_ref().to_vec(),
            position: 0,
            current: None,
        };
        lexer.current = lexer.read_char();
        lexer
    }

    /// Read cursor, in bytes from the start of the input.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    fn read_char(&mut self) -> Option<Scanned> {
        let rest = &self.input[self.position..];
        let first = *rest.first()?;
        let width = utf8_width(first);
        let decoded = rest
            .get(..width)
            .filter(|_| width > 0)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next());
        match decoded {
            Some(ch) => {
                self.position += width;
                Some(Scanned::Char(ch))
            }
            None => {
                self.position += 1;
                Some(Scanned::Invalid)
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.read_char();
    }

    fn current_char(&self) -> Option<char> {
        match self.current {
            Some(Scanned::Char(ch)) => Some(ch),
            _ => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if is_whitespace(ch) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Copy the character after a backslash. An invalid byte there is
    /// dropped; end of input leaves the backslash as the last character.
    fn read_escaped(&mut self, result: &mut String) -> bool {
        self.advance();
        match self.current {
            Some(Scanned::Char(ch)) => {
                result.push(ch);
                true
            }
            Some(Scanned::Invalid) => true,
            None => false,
        }
    }

    fn read_quoted(&mut self) -> String {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            if ch == '"' {
                self.advance();
                break;
            }
            result.push(ch);
            if ch == '\\' && !self.read_escaped(&mut result) {
                break;
            }
            self.advance();
        }
        result
    }

    fn read_word(&mut self) -> (String, bool) {
        let mut result = String::new();
        let mut dotted = false;

        while let Some(ch) = self.current_char() {
            if is_whitespace(ch) || is_structural(ch) {
                break;
            }
            if ch == '.' {
                dotted = true;
            }
            result.push(ch);
            if ch == '\\' && !self.read_escaped(&mut result) {
                break;
            }
            self.advance();
        }
        (result, dotted)
    }

    /// Return the next token. Never fails: bad input yields [`Token::Error`]
    /// and scanning resumes at the following byte.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let ch = match self.current {
            None => return Token::Eof,
            Some(Scanned::Invalid) => {
                self.advance();
                return Token::Error;
            }
            Some(Scanned::Char(ch)) => ch,
        };

        match ch {
            '=' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::EqEq
                } else {
                    Token::Eq
                }
            }
            '<' => {
                self.advance();
                match self.current_char() {
                    Some('=') => {
                        self.advance();
                        Token::LtEq
                    }
                    Some('>') => {
                        self.advance();
                        Token::NotEq
                    }
                    _ => Token::Lt,
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::GtEq
                } else {
                    Token::Gt
                }
            }
            '/' => {
                self.advance();
                Token::Slash
            }
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            '"' => Token::String(self.read_quoted()),
            _ => {
                let (word, dotted) = self.read_word();
                classify_word(word, dotted)
            }
        }
    }
}

fn classify_word(word: String, dotted: bool) -> Token {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "and" => Token::And(word),
        "or" => Token::Or(word),
        "not" => Token::Not(word),
        "prox" => Token::Prox(word),
        "sortby" => Token::SortBy(word),
        _ if dotted => Token::PrefixName(word),
        named if relations::NAMED.contains(&named) => Token::NamedRelation(word),
        _ => Token::String(word),
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn is_structural(ch: char) -> bool {
    matches!(ch, '(' | ')' | '=' | '<' | '>' | '/')
}

/// Length of the UTF-8 sequence introduced by `first`, or 0 when `first`
/// cannot start one.
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
