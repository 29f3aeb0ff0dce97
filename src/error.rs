use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// A syntax error found while parsing, tagged with the 1-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[must_use]
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("malformed section")]
    MalformedSection,
    #[error("section '{name}' has been defined previously")]
    DuplicateSection { name: String },
    #[error("property defined outside of a section")]
    PropertyOutsideSection,
    #[error("malformed property")]
    MalformedProperty,
    #[error("property '{name}' has been defined previously")]
    DuplicateProperty { name: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("section '{section}' not found")]
    SectionNotFound { section: String },

    #[error("property '{property}' not found in section '{section}'")]
    PropertyNotFound { section: String, property: String },

    #[error("property '{section}/{property}' is not an integer")]
    NotAnInteger {
        section: String,
        property: String,
        #[source]
        source: ParseIntError,
    },

    #[error("property '{section}/{property}' is not a boolean: {value:?}")]
    NotABoolean {
        section: String,
        property: String,
        value: String,
    },

    #[error("failed to read or write INI data")]
    Io(#[from] io::Error),
}

/// Coarse classification of [`Error`], for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    NotFound,
    Format,
    Io,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::Parse(..) => ErrorKind::Parse,
            Self::SectionNotFound { .. } | Self::PropertyNotFound { .. } => ErrorKind::NotFound,
            Self::NotAnInteger { .. } | Self::NotABoolean { .. } => ErrorKind::Format,
            Self::Io(..) => ErrorKind::Io,
        }
    }
}
