//! The expression tree produced by the parser.
//!
//! A parsed document is a tree of three variants.  [Expression::Native] carries a scalar
//! exactly as it appeared in the input, surrounding quotes and escape sequences included;
//! numbers, booleans, nulls and strings are all just raw spans here, and interpreting them
//! is the caller's business (see [crate::binder] for one such caller).  [Expression::Array]
//! preserves member order; [Expression::Object] keys are unique and carry no order.
//!
//! Serialization is the [Display] implementation.
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Write};

use crate::strings;

/// A single node within a parsed document
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// An uninterpreted scalar span, quotes and escapes intact
    Native(String),
    /// An ordered sequence of member expressions
    Array(Vec<Expression>),
    /// A mapping from key to member expression, in no particular order
    Object(HashMap<String, Expression>),
}

impl Expression {
    /// Build a double-quoted [Expression::Native] from plain text, escaping as required
    pub fn quoted(text: &str) -> Self {
        Expression::Native(strings::quote(text))
    }

    /// Member count of a collection.  A native span has no members
    pub fn len(&self) -> usize {
        match self {
            Expression::Native(_) => 0,
            Expression::Array(members) => members.len(),
            Expression::Object(members) => members.len(),
        }
    }

    /// True for a collection without members, or a native whose raw span is empty
    pub fn is_empty(&self) -> bool {
        match self {
            Expression::Native(raw) => raw.is_empty(),
            Expression::Array(members) => members.is_empty(),
            Expression::Object(members) => members.is_empty(),
        }
    }

    /// Look up an object member by key.  Absent keys and non-object receivers are both
    /// just [None], not errors
    pub fn get(&self, key: &str) -> Option<&Expression> {
        match self {
            Expression::Object(members) => members.get(key),
            _ => None,
        }
    }

    /// The keys of an object, in no particular order
    pub fn keys(&self) -> Vec<&String> {
        match self {
            Expression::Object(members) => members.keys().collect(),
            _ => Vec::new(),
        }
    }

    /// The raw text of a native span
    pub fn raw(&self) -> Option<&str> {
        match self {
            Expression::Native(raw) => Some(raw),
            _ => None,
        }
    }

    /// The members of an array
    pub fn as_array(&self) -> Option<&[Expression]> {
        match self {
            Expression::Array(members) => Some(members),
            _ => None,
        }
    }

    /// The members of an object
    pub fn as_object(&self) -> Option<&HashMap<String, Expression>> {
        match self {
            Expression::Object(members) => Some(members),
            _ => None,
        }
    }
}

/// Serialize the expression back to text.  Whitespace from the source is not reproduced,
/// but the structure and every raw span are, so re-parsing the output yields a
/// structurally equal tree.  Keys are emitted verbatim between double quotes whatever
/// quote style the source used; since key recognition never interprets escapes, no
/// escaping is applied here either, and a key containing `"` (only constructible within
/// a `'...'` key) will not survive a round trip.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Native(raw) => f.write_str(raw),
            Expression::Array(members) => {
                f.write_char('[')?;
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", member)?;
                }
                f.write_char(']')
            }
            Expression::Object(members) => {
                f.write_char('{')?;
                for (index, (key, value)) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "\"{}\":{}", key, value)?;
                }
                f.write_char('}')
            }
        }
    }
}
