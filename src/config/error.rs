//! Error types for tool configuration loading.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scanner-level failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    #[error("unexpected character '{}'", .0.escape_default())]
    UnexpectedChar(char),
}

/// Classification of a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened or read.
    Io,
    /// The character stream could not be tokenized.
    Lex,
    /// A token appeared where a different token was required.
    Syntax,
    /// Well-formed input with invalid content.
    Semantic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Io => "I/O error",
            ErrorKind::Lex => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Semantic => "semantic error",
        })
    }
}

/// First error encountered while scanning or parsing a config source.
///
/// Every variant carries the 1-based line it was detected on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{source}")]
    Lex {
        line: usize,
        #[source]
        source: LexError,
    },

    #[error("expected {expected}, found {found}")]
    Syntax {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("unknown style option '{name}'")]
    UnknownOption { line: usize, name: String },

    #[error("invalid {option} value {value}: {reason}")]
    OutOfRange {
        line: usize,
        option: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid color '{spec}'")]
    InvalidColor { line: usize, spec: String },

    #[error("minwidth {minwidth} exceeds maxwidth {maxwidth} for tool '{tool}'")]
    WidthBounds {
        line: usize,
        tool: String,
        minwidth: u32,
        maxwidth: u32,
    },

    #[error("tool '{name}' is not defined before use")]
    UnknownTool { line: usize, name: String },

    #[error("tool name must not be empty")]
    EmptyToolName { line: usize },

    #[error("invalid key '{key}': {reason}")]
    InvalidKey {
        line: usize,
        key: String,
        reason: String,
    },
}

impl ParseError {
    pub(crate) fn syntax(line: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex { line, .. }
            | ParseError::Syntax { line, .. }
            | ParseError::UnknownOption { line, .. }
            | ParseError::OutOfRange { line, .. }
            | ParseError::InvalidColor { line, .. }
            | ParseError::WidthBounds { line, .. }
            | ParseError::UnknownTool { line, .. }
            | ParseError::EmptyToolName { line }
            | ParseError::InvalidKey { line, .. } => *line,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lex { .. } => ErrorKind::Lex,
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            _ => ErrorKind::Semantic,
        }
    }
}

/// The single diagnostic reported for a failed load.
#[derive(Debug, Error)]
pub enum Diagnostic {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{}: {}: {source}", .file.display(), .source.line(), .source.kind())]
    Parse {
        file: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl Diagnostic {
    pub(crate) fn parse(file: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::Parse {
            file: file.into(),
            source,
        }
    }

    pub fn file(&self) -> &Path {
        match self {
            Diagnostic::Io { path, .. } => path,
            Diagnostic::Parse { file, .. } => file,
        }
    }

    /// Line of the offending token; `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            Diagnostic::Io { .. } => None,
            Diagnostic::Parse { source, .. } => Some(source.line()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Diagnostic::Io { .. } => ErrorKind::Io,
            Diagnostic::Parse { source, .. } => source.kind(),
        }
    }

    /// The parse error behind this diagnostic, if it is not an I/O failure.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Diagnostic::Io { .. } => None,
            Diagnostic::Parse { source, .. } => Some(source),
        }
    }
}
