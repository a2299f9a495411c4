//! Lexical scanner for the tool configuration language.
//!
//! Produces [`Token`]s one at a time from a source string. Whitespace, `#`
//! line comments and `/* ... */` block comments between tokens are skipped.

use super::error::{LexError, ParseError};
use super::symbols::{self, Symbol};
use std::fmt;

/// Single-character punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    LParen,
    RParen,
    Comma,
    Equals,
    Semicolon,
}

impl Punct {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Punct::LParen),
            ')' => Some(Punct::RParen),
            ',' => Some(Punct::Comma),
            '=' => Some(Punct::Equals),
            ';' => Some(Punct::Semicolon),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Punct::LParen => '(',
            Punct::RParen => ')',
            Punct::Comma => ',',
            Punct::Equals => '=',
            Punct::Semicolon => ';',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Eof,
    /// Double-quoted string, quotes removed
    Str(String),
    /// Reserved word
    Symbol(Symbol),
    /// Bare word that is not reserved
    Identifier(String),
    Number(f64),
    Punct(Punct),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Str(text) => write!(f, "string \"{text}\""),
            TokenKind::Symbol(symbol) => write!(f, "keyword '{symbol}'"),
            TokenKind::Identifier(word) => write!(f, "identifier '{word}'"),
            TokenKind::Number(value) => write!(f, "number {value}"),
            TokenKind::Punct(punct) => write!(f, "'{}'", punct.as_char()),
        }
    }
}

/// A token and the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Stateful scanner over a config source.
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia()?;

        let line = self.line;
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                line,
            });
        };

        let kind = if c == '"' {
            self.scan_string()?
        } else if c.is_ascii_alphabetic() || c == '_' {
            self.scan_word()
        } else if self.starts_number() {
            self.scan_number()?
        } else if let Some(punct) = Punct::from_char(c) {
            self.bump();
            TokenKind::Punct(punct)
        } else {
            return Err(self.error(LexError::UnexpectedChar(c)));
        };

        Ok(Token { kind, line })
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error(&self, source: LexError) -> ParseError {
        ParseError::Lex {
            line: self.line,
            source,
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                '/' if self.peek_second() == Some('*') => self.skip_block_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start_line = self.line;
        self.bump();
        self.bump();
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::Lex {
                        line: start_line,
                        source: LexError::UnterminatedComment,
                    });
                }
            }
        }
    }

    fn scan_string(&mut self) -> Result<TokenKind, ParseError> {
        let start_line = self.line;
        self.bump();
        let start = self.pos;
        loop {
            match self.peek() {
                Some('"') => {
                    let text = self.source[start..self.pos].to_string();
                    self.bump();
                    return Ok(TokenKind::Str(text));
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    return Err(ParseError::Lex {
                        line: start_line,
                        source: LexError::UnterminatedString,
                    });
                }
            }
        }
    }

    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let word = &self.source[start..self.pos];
        match symbols::lookup(word) {
            Some(symbol) => TokenKind::Symbol(symbol),
            None => TokenKind::Identifier(word.to_string()),
        }
    }

    fn starts_number(&self) -> bool {
        let digit_or_point = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit() || c == '.');
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_second().is_some_and(|c| c.is_ascii_digit()),
            Some('-') => digit_or_point(self.peek_second()),
            _ => false,
        }
    }

    /// Scans `-?digits[.digits]` (or `-?.digits`). Letters, underscores or a
    /// second point glued to the literal make the whole run malformed.
    fn scan_number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            self.bump();
        }

        let text = &self.source[start..self.pos];
        let body = text.strip_prefix('-').unwrap_or(text);
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (body, None),
        };
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        let well_formed = all_digits(int_part)
            && frac_part.is_none_or(all_digits)
            && !(int_part.is_empty() && frac_part.is_none_or(str::is_empty));

        match text.parse::<f64>() {
            Ok(value) if well_formed => Ok(TokenKind::Number(value)),
            _ => Err(self.error(LexError::MalformedNumber(text.to_string()))),
        }
    }
}

/// Scanner with one token of lookahead, shared by the statement and
/// style-clause parsers.
pub struct TokenStream<'a> {
    scanner: Scanner<'a>,
    lookahead: Option<Token>,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            lookahead: None,
        }
    }

    pub fn peek(&mut self) -> Result<&Token, ParseError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scanner.next_token()?,
        };
        Ok(self.lookahead.insert(token))
    }

    pub fn advance(&mut self) -> Result<Token, ParseError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.scanner.next_token(),
        }
    }

    /// Consumes the next token, which must be `punct`.
    pub fn expect_punct(&mut self, punct: Punct) -> Result<Token, ParseError> {
        let token = self.advance()?;
        if token.kind == TokenKind::Punct(punct) {
            Ok(token)
        } else {
            Err(ParseError::syntax(
                token.line,
                format!("'{}'", punct.as_char()),
                token.kind.to_string(),
            ))
        }
    }
}
