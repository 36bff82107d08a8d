//! A lax, single-pass parser for JSON-shaped text.
//!
//! Documents are parsed into a tree of three [expression::Expression] variants: objects,
//! arrays and *native* spans.  A native span is whatever text sat between the structural
//! delimiters, quotes and escapes included: `12.4`, `true` and `"term-life"` are all just
//! raw text here.  The parser itself never interprets scalars; the [binder] module covers
//! the common case of mapping an object expression onto a plain struct with typed fields.
//!
//! The grammar is deliberately relaxed rather than conformant: keys and strings may be
//! single or double quoted, only the escape sequences `\" \' \\ \b \f \n \r \t` are
//! decoded when a span is finally interpreted, and the root of every document must be an
//! object.
//!
//! ```rust
//! use chisel_raw_json::Parser;
//!
//! let parser = Parser::default();
//! let policy = parser
//!     .parse_str(r#"{"product":"term-life","term_months":120,"riders":["waiver","adb"]}"#)
//!     .unwrap();
//! assert_eq!(policy.get("product").and_then(|e| e.raw()), Some(r#""term-life""#));
//! assert_eq!(policy.get("term_months").and_then(|e| e.raw()), Some("120"));
//! assert_eq!(policy.get("riders").unwrap().len(), 2);
//! ```
//!
//! ## Features
//!
//! - `default_utf8_encoding` - [decoders::Encoding::default] is UTF-8 rather than ASCII.
//! - `mixed_numerics` - integer fields in the binder parse through `lexical`; floating
//!   point fields go through `fast-float` either way.

pub mod binder;
pub mod coords;
pub mod decoders;
pub mod errors;
pub mod expression;
pub mod parser;
pub mod scanner;
pub mod strings;
#[cfg(test)]
mod test_macros;

pub use crate::expression::Expression;
pub use crate::parser::Parser;
