//! General error types for the parser and the expression binder

use std::fmt::{Display, Formatter};

use crate::coords::Coords;

/// Global result type used throughout the parser
pub type ParserResult<T> = Result<T, ParserError>;

/// Result type used by binding operations
pub type BinderResult<T> = Result<T, BinderError>;

/// A global enumeration of parser error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorDetails {
    /// The input was empty, all whitespace, or the first significant character was not `{`
    EmptyOrMissingRoot,
    /// A key began with something other than a quote character
    MalformedKey(char),
    /// A key contained no characters between its quotes
    EmptyKey,
    /// The input ended before a key was closed
    UnterminatedKey,
    /// Something other than `:` followed a key
    MissingColon(char),
    /// The cursor ran off the end of the input
    UnexpectedEnd,
    /// The input ended before a native value reached its delimiter
    UnterminatedNative,
    /// A bare native value contained a structural opening character
    UnexpectedNesting(char),
    /// A closed quoted span was followed by something other than a delimiter
    TrailingGarbageAfterString(char),
    /// An array contained a character where `,` or `]` was required
    UnexpectedArrayCharacter(char),
    /// The input ended before an array was closed
    UnterminatedArray,
    /// An object contained a character where a value, `,` or `}` was required
    UnexpectedObjectCharacter(char),
    /// The input ended before an object was closed
    UnterminatedObject,
    /// Non-whitespace characters remained after the root object closed
    TrailingContent,
    /// The supplied file could not be opened
    InvalidFile,
}

impl Display for ParserErrorDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOrMissingRoot => write!(f, "input must open with a '{{' root object"),
            Self::MalformedKey(ch) => {
                write!(f, "keys must start with '\"' or \"'\", found '{}'", ch)
            }
            Self::EmptyKey => write!(f, "object keys cannot be empty"),
            Self::UnterminatedKey => write!(f, "input ended before the key was closed"),
            Self::MissingColon(ch) => write!(f, "expected ':' after the key, found '{}'", ch),
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::UnterminatedNative => write!(f, "input ended inside a native value"),
            Self::UnexpectedNesting(ch) => {
                write!(f, "bare native values cannot contain '{}'", ch)
            }
            Self::TrailingGarbageAfterString(ch) => {
                write!(f, "expected a delimiter after the closing quote, found '{}'", ch)
            }
            Self::UnexpectedArrayCharacter(ch) => {
                write!(f, "unexpected character '{}' within an array", ch)
            }
            Self::UnterminatedArray => write!(f, "input ended before the array was closed"),
            Self::UnexpectedObjectCharacter(ch) => {
                write!(f, "unexpected character '{}' within an object", ch)
            }
            Self::UnterminatedObject => write!(f, "input ended before the object was closed"),
            Self::TrailingContent => {
                write!(f, "unparsed content remains after the root object")
            }
            Self::InvalidFile => write!(f, "the supplied file could not be opened"),
        }
    }
}

/// The general parser error structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// The global error code for the error
    pub details: ParserErrorDetails,
    /// Optional parser coordinates
    pub coords: Option<Coords>,
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} at {}", self.details, coords),
            None => write!(f, "{}", self.details),
        }
    }
}

/// Enumeration of the ways an expression can fail to bind onto a target value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderErrorDetails {
    /// The expression handed to the binder was not an object
    ObjectExpected,
    /// The member under the given key should have been an array
    ListExpected(String),
    /// A member of the array under the given key should have been an object
    ListMemberExpected(String),
    /// The raw text would not parse as a number
    InvalidNumericRepresentation(String),
    /// The raw text was neither `true` nor `false`
    InvalidBooleanRepresentation(String),
}

impl Display for BinderErrorDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ObjectExpected => write!(f, "only object expressions can be bound"),
            Self::ListExpected(key) => {
                write!(f, "the value under key '{}' should be an array", key)
            }
            Self::ListMemberExpected(key) => {
                write!(f, "members of the array under key '{}' should be objects", key)
            }
            Self::InvalidNumericRepresentation(raw) => {
                write!(f, "'{}' could not be parsed as a number", raw)
            }
            Self::InvalidBooleanRepresentation(raw) => {
                write!(f, "'{}' could not be parsed as a boolean", raw)
            }
        }
    }
}

/// Error produced when an expression cannot be bound onto a target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderError {
    /// The global error code for the error
    pub details: BinderErrorDetails,
}

impl Display for BinderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.details)
    }
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr) => {
        Err(ParserError {
            details: $details,
            coords: None,
        })
    };
    ($details: expr, $coords: expr) => {
        Err(ParserError {
            details: $details,
            coords: Some($coords),
        })
    };
}

#[macro_export]
macro_rules! binder_error {
    ($details: expr) => {
        Err(BinderError { details: $details })
    };
}
