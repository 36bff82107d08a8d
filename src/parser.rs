//! The expression parser
//!
//! A single forward pass over the decoded input, built from a small set of mutually
//! recursive functions.  Each function takes the scanner and a cursor position, consumes
//! one construct and hands back the parsed [Expression] together with the position the
//! caller should continue from: collections consume their closing delimiter, native spans
//! stop on theirs and leave it for the enclosing collection to act on.
//!
//! Recursion depth tracks input nesting depth and is bounded only by the call stack, so
//! callers feeding untrusted input should impose their own nesting limit before parsing.
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::decoders::Encoding;
use crate::errors::{ParserError, ParserErrorDetails, ParserResult};
use crate::expression::Expression;
use crate::parser_error;
use crate::scanner::Scanner;

/// Characters that terminate a native span
const NATIVE_TERMINATORS: [char; 3] = [',', '}', ']'];

/// Main parser struct
pub struct Parser {
    encoding: Encoding,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
        }
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self { encoding }
    }

    /// Parse the contents of a file, which must hold a single object expression
    pub fn parse_file<PathLike: AsRef<Path>>(&self, path: PathLike) -> ParserResult<Expression> {
        match File::open(&path) {
            Ok(f) => {
                let mut reader = BufReader::new(f);
                let mut chars = self.encoding.decoder(&mut reader);
                self.parse(&mut chars)
            }
            Err(_) => {
                parser_error!(ParserErrorDetails::InvalidFile)
            }
        }
    }

    /// Parse a byte slice, decoding it per the parser's [Encoding]
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<Expression> {
        let mut reader = BufReader::new(bytes);
        let mut chars = self.encoding.decoder(&mut reader);
        self.parse(&mut chars)
    }

    /// Parse a string slice
    pub fn parse_str(&self, str: &str) -> ParserResult<Expression> {
        let mut reader = BufReader::new(str.as_bytes());
        let mut chars = self.encoding.decoder(&mut reader);
        self.parse(&mut chars)
    }

    /// Parse the contents of `chars`.  The first significant character must open an
    /// object, and nothing but whitespace may follow that object's close; the returned
    /// expression is always an [Expression::Object]
    pub fn parse(&self, chars: &mut impl Iterator<Item = char>) -> ParserResult<Expression> {
        let scanner = Scanner::new(chars);
        let start = scanner.skip_whitespace(0);
        if scanner.char_at(start) != Some('{') {
            return parser_error!(
                ParserErrorDetails::EmptyOrMissingRoot,
                scanner.coords_of(start)
            );
        }
        let (expression, next) = self.parse_object(&scanner, start)?;
        let rest = scanner.skip_whitespace(next);
        if rest < scanner.len() {
            return parser_error!(ParserErrorDetails::TrailingContent, scanner.coords_of(rest));
        }
        Ok(expression)
    }

    /// Dispatch on the lookahead character to the correct sub-parser
    fn parse_value(&self, scanner: &Scanner, from: usize) -> ParserResult<(Expression, usize)> {
        match scanner.char_at(from) {
            Some('{') => self.parse_object(scanner, from),
            Some('[') => self.parse_array(scanner, from),
            _ => self.parse_native(scanner, from),
        }
    }

    /// An object is a brace-delimited list of comma separated key/value pairs.  Takes the
    /// position of the opening `{`, returns the position just past the closing `}`.
    /// Later duplicate keys silently overwrite earlier ones
    fn parse_object(&self, scanner: &Scanner, open: usize) -> ParserResult<(Expression, usize)> {
        let mut members = HashMap::new();
        let mut index = scanner.skip_whitespace(open + 1);
        if scanner.char_at(index) == Some('}') {
            return Ok((Expression::Object(members), index + 1));
        }
        loop {
            if scanner.is_exhausted(index) {
                return parser_error!(
                    ParserErrorDetails::UnterminatedObject,
                    scanner.coords_of(index)
                );
            }
            let (key, after_key) = self.recognize_key(scanner, index)?;
            if key.is_empty() {
                return parser_error!(ParserErrorDetails::EmptyKey, scanner.coords_of(index));
            }
            let value_index = self.cross_separator(scanner, after_key)?;
            let (value, after_value) = self.parse_value(scanner, value_index)?;
            if let Expression::Native(raw) = &value {
                // a value slot holding an empty span means there was no value at all,
                // just the delimiter the native scan stopped on
                if raw.is_empty() {
                    return match scanner.char_at(after_value) {
                        Some(ch) => parser_error!(
                            ParserErrorDetails::UnexpectedObjectCharacter(ch),
                            scanner.coords_of(after_value)
                        ),
                        None => parser_error!(
                            ParserErrorDetails::UnterminatedObject,
                            scanner.coords_of(after_value)
                        ),
                    };
                }
            }
            members.insert(key, value);
            index = scanner.skip_whitespace(after_value);
            match scanner.char_at(index) {
                Some(',') => index = scanner.skip_whitespace(index + 1),
                Some('}') => return Ok((Expression::Object(members), index + 1)),
                Some(ch) => {
                    return parser_error!(
                        ParserErrorDetails::UnexpectedObjectCharacter(ch),
                        scanner.coords_of(index)
                    )
                }
                None => {
                    return parser_error!(
                        ParserErrorDetails::UnterminatedObject,
                        scanner.coords_of(index)
                    )
                }
            }
        }
    }

    /// An array is a bracket-delimited list of comma separated values.  Takes the
    /// position of the opening `[`, returns the position just past the closing `]`.
    /// Empty members are dropped rather than stored, so `[1,,2]` holds two members
    /// and `[]` none
    fn parse_array(&self, scanner: &Scanner, open: usize) -> ParserResult<(Expression, usize)> {
        let mut members = Vec::new();
        let mut index = scanner.skip_whitespace(open + 1);
        loop {
            if scanner.is_exhausted(index) {
                return parser_error!(
                    ParserErrorDetails::UnterminatedArray,
                    scanner.coords_of(index)
                );
            }
            let (member, after_member) = self.parse_value(scanner, index)?;
            if !member.is_empty() {
                members.push(member);
            }
            index = scanner.skip_whitespace(after_member);
            match scanner.char_at(index) {
                Some(',') => index = scanner.skip_whitespace(index + 1),
                Some(']') => return Ok((Expression::Array(members), index + 1)),
                Some(ch) => {
                    return parser_error!(
                        ParserErrorDetails::UnexpectedArrayCharacter(ch),
                        scanner.coords_of(index)
                    )
                }
                None => {
                    return parser_error!(
                        ParserErrorDetails::UnterminatedArray,
                        scanner.coords_of(index)
                    )
                }
            }
        }
    }

    /// A key is a span delimited by two identical quote characters.  No escape handling
    /// happens inside keys: the first matching quote ends the key whatever precedes it.
    /// Returns the key text (quotes stripped) and the position just past the closing
    /// quote
    fn recognize_key(&self, scanner: &Scanner, from: usize) -> ParserResult<(String, usize)> {
        let quote = match scanner.char_at(from) {
            Some(ch) if ch == '"' || ch == '\'' => ch,
            Some(ch) => {
                return parser_error!(
                    ParserErrorDetails::MalformedKey(ch),
                    scanner.coords_of(from)
                )
            }
            None => {
                return parser_error!(
                    ParserErrorDetails::UnterminatedKey,
                    scanner.coords_of(from)
                )
            }
        };
        let mut index = from + 1;
        loop {
            match scanner.char_at(index) {
                Some(ch) if ch == quote => {
                    return Ok((scanner.text_between(from + 1, index), index + 1));
                }
                Some(_) => index += 1,
                None => {
                    return parser_error!(
                        ParserErrorDetails::UnterminatedKey,
                        scanner.coords_of(index)
                    )
                }
            }
        }
    }

    /// Step across the `:` between a key and its value, returning the position of the
    /// first significant character after it
    fn cross_separator(&self, scanner: &Scanner, from: usize) -> ParserResult<usize> {
        let index = scanner.skip_whitespace(from);
        match scanner.char_at(index) {
            Some(':') => {
                let value_index = scanner.skip_whitespace(index + 1);
                scanner.ensure_bounds(value_index)?;
                Ok(value_index)
            }
            Some(ch) => parser_error!(
                ParserErrorDetails::MissingColon(ch),
                scanner.coords_of(index)
            ),
            None => parser_error!(ParserErrorDetails::UnexpectedEnd, scanner.coords_of(index)),
        }
    }

    /// A native is an opaque span running up to the next delimiter.  Quoted spans keep
    /// their quotes and may hide delimiters and quote characters behind a backslash;
    /// bare spans run verbatim, whitespace included, and may not contain structural
    /// openers.  Returns the raw span and the position of the terminating delimiter,
    /// which is not consumed
    fn parse_native(&self, scanner: &Scanner, from: usize) -> ParserResult<(Expression, usize)> {
        scanner.ensure_bounds(from)?;
        match scanner.char_at(from) {
            Some(quote) if quote == '"' || quote == '\'' => {
                self.parse_quoted_native(scanner, from, quote)
            }
            _ => self.parse_bare_native(scanner, from),
        }
    }

    fn parse_bare_native(
        &self,
        scanner: &Scanner,
        from: usize,
    ) -> ParserResult<(Expression, usize)> {
        let mut index = from;
        while let Some(ch) = scanner.char_at(index) {
            if ch == '{' || ch == '[' {
                return parser_error!(
                    ParserErrorDetails::UnexpectedNesting(ch),
                    scanner.coords_of(index)
                );
            }
            if NATIVE_TERMINATORS.contains(&ch) {
                return Ok((Expression::Native(scanner.text_between(from, index)), index));
            }
            index += 1;
        }
        parser_error!(
            ParserErrorDetails::UnterminatedNative,
            scanner.coords_of(index)
        )
    }

    fn parse_quoted_native(
        &self,
        scanner: &Scanner,
        from: usize,
        quote: char,
    ) -> ParserResult<(Expression, usize)> {
        let mut index = from + 1;
        let mut escaped = false;
        loop {
            let ch = match scanner.char_at(index) {
                Some(ch) => ch,
                None => {
                    return parser_error!(
                        ParserErrorDetails::UnterminatedNative,
                        scanner.coords_of(index)
                    )
                }
            };
            if escaped {
                escaped = false;
            } else if ch == quote {
                // span closed; the delimiter may sit beyond some whitespace, which is
                // not part of the span
                let delimiter = scanner.skip_whitespace(index + 1);
                return match scanner.char_at(delimiter) {
                    Some(d) if NATIVE_TERMINATORS.contains(&d) => Ok((
                        Expression::Native(scanner.text_between(from, index + 1)),
                        delimiter,
                    )),
                    Some(d) => parser_error!(
                        ParserErrorDetails::TrailingGarbageAfterString(d),
                        scanner.coords_of(delimiter)
                    ),
                    None => parser_error!(
                        ParserErrorDetails::UnterminatedNative,
                        scanner.coords_of(delimiter)
                    ),
                };
            } else {
                escaped = ch == '\\';
            }
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(unused_macros)]

    use crate::errors::ParserErrorDetails;
    use crate::expression::Expression;
    use crate::parser::Parser;
    use crate::relative_file;
    use bytesize::ByteSize;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Instant;

    #[test]
    fn should_parse_char_iterators_directly() {
        let source = r#"{
            "test" : 1232.0,
            "some other" : "thasdasd",
            'single quoted' : 'also fine',
            "a bool" : true,
            "an array" : [1,2,3,4,5.8,6,7.2,7,8,10]
        }"#;
        let parser = Parser::default();
        let parsed = parser.parse(&mut source.chars());
        println!("{parsed:?}");
        assert!(parsed.is_ok())
    }

    #[test]
    fn should_parse_byte_slices_directly() {
        let source = "{\"a\": 1, \"b\": \"two\"}";
        let parser = Parser::default();
        let parsed = parser.parse_bytes(source.as_bytes());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().len(), 2);
    }

    #[test]
    fn should_parse_empty_objects() {
        let parser = Parser::default();
        for source in ["{}", "{ }", " {\t\n} "] {
            let parsed = parser.parse_str(source).unwrap();
            assert!(parsed.is_empty());
            assert_eq!(parsed.len(), 0);
            assert_eq!(parsed.to_string(), "{}");
        }
    }

    #[test]
    fn should_keep_native_spans_verbatim() {
        let parser = Parser::default();
        let parsed = parser
            .parse_str(r#"{"n":12.4,"s":"quoted \"text\"","t":'single',"u":null}"#)
            .unwrap();
        assert_eq!(parsed.get("n").and_then(|e| e.raw()), Some("12.4"));
        assert_eq!(
            parsed.get("s").and_then(|e| e.raw()),
            Some(r#""quoted \"text\"""#)
        );
        assert_eq!(parsed.get("t").and_then(|e| e.raw()), Some("'single'"));
        assert_eq!(parsed.get("u").and_then(|e| e.raw()), Some("null"));
    }

    #[test]
    fn should_parse_nested_structures() {
        let parser = Parser::default();
        let parsed = parser.parse_str(r#"{"a":{"b":"c"},"xs":[1,2,3]}"#).unwrap();
        let inner = parsed.get("a").unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner.get("b").and_then(|e| e.raw()), Some("\"c\""));
        assert_eq!(parsed.get("xs").unwrap().len(), 3);
    }

    #[test]
    fn should_count_members_without_miscounting_inner_commas() {
        let parser = Parser::default();
        let parsed = parser
            .parse_str(r#"{"a":"1,2","b":[1,2,3],"c":{"d":4,"e":5}}"#)
            .unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.get("b").unwrap().len(), 3);
        assert_eq!(parsed.get("c").unwrap().len(), 2);
    }

    #[test]
    fn should_overwrite_duplicate_keys() {
        let parser = Parser::default();
        let parsed = parser.parse_str(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("a").and_then(|e| e.raw()), Some("2"));
    }

    #[test]
    fn should_drop_empty_array_members() {
        let parser = Parser::default();
        let parsed = parser
            .parse_str(r#"{"xs":[1,,2],"ys":[1,],"zs":[]}"#)
            .unwrap();
        assert_eq!(parsed.get("xs").unwrap().len(), 2);
        assert_eq!(parsed.get("ys").unwrap().len(), 1);
        assert_eq!(parsed.get("zs").unwrap().len(), 0);
    }

    #[test]
    fn should_allow_whitespace_between_quoted_spans_and_delimiters() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\": \"x\" , \"b\": 'y' }").unwrap();
        assert_eq!(parsed.get("a").and_then(|e| e.raw()), Some("\"x\""));
        assert_eq!(parsed.get("b").and_then(|e| e.raw()), Some("'y'"));
    }

    #[test]
    fn should_treat_escaped_quotes_as_span_content() {
        let parser = Parser::default();
        let parsed = parser.parse_str(r#"{"a":"x\"y"}"#).unwrap();
        assert_eq!(parsed.get("a").and_then(|e| e.raw()), Some(r#""x\"y""#));
    }

    #[test]
    fn should_reject_missing_roots() {
        let parser = Parser::default();
        for source in ["", "   ", "[1,2]", "41", "\"quoted\""] {
            let parsed = parser.parse_str(source);
            assert!(parsed.is_err());
            assert_eq!(
                parsed.err().unwrap().details,
                ParserErrorDetails::EmptyOrMissingRoot
            );
        }
    }

    #[test]
    fn should_reject_unterminated_objects() {
        let parser = Parser::default();
        for source in ["{", "{   ", "{\"a\":1,", "{\"a\":[1,2],"] {
            let parsed = parser.parse_str(source);
            assert_eq!(
                parsed.err().unwrap().details,
                ParserErrorDetails::UnterminatedObject
            );
        }
    }

    #[test]
    fn should_reject_bad_keys() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{a:1}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::MalformedKey('a')
        );
        let parsed = parser.parse_str("{\"a\":1,}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::MalformedKey('}')
        );
        let parsed = parser.parse_str("{'':1}");
        assert_eq!(parsed.err().unwrap().details, ParserErrorDetails::EmptyKey);
        let parsed = parser.parse_str("{\"a");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnterminatedKey
        );
    }

    #[test]
    fn should_reject_missing_colons() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\" 1}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::MissingColon('1')
        );
        let parsed = parser.parse_str("{\"a\"}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::MissingColon('}')
        );
        let parsed = parser.parse_str("{\"a\"");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedEnd
        );
        let parsed = parser.parse_str("{\"a\":");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedEnd
        );
        let parsed = parser.parse_str("{\"a\":   ");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedEnd
        );
    }

    #[test]
    fn should_reject_empty_value_slots() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\":}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedObjectCharacter('}')
        );
        let parsed = parser.parse_str("{\"a\": , \"b\":1}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedObjectCharacter(',')
        );
    }

    #[test]
    fn should_reject_nesting_inside_bare_natives() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\":12[4]}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedNesting('[')
        );
        let parsed = parser.parse_str("{\"a\":x{y}}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedNesting('{')
        );
    }

    #[test]
    fn should_reject_garbage_after_closed_strings() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\":\"x\" y}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::TrailingGarbageAfterString('y')
        );
    }

    #[test]
    fn should_reject_unterminated_natives() {
        let parser = Parser::default();
        for source in [
            "{\"a\":tru",
            "{\"a\":\"x",
            "{\"a\":\"x\"",
            "{\"a\":\"x\"  ",
            "{\"a\":[1",
        ] {
            let parsed = parser.parse_str(source);
            assert_eq!(
                parsed.err().unwrap().details,
                ParserErrorDetails::UnterminatedNative
            );
        }
    }

    #[test]
    fn should_reject_unterminated_arrays() {
        let parser = Parser::default();
        for source in ["{\"a\":[", "{\"a\":[1,", "{\"a\":[[1]"] {
            let parsed = parser.parse_str(source);
            assert_eq!(
                parsed.err().unwrap().details,
                ParserErrorDetails::UnterminatedArray
            );
        }
    }

    #[test]
    fn should_reject_bad_array_delimiters() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\":[[1] 2]}");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::UnexpectedArrayCharacter('2')
        );
    }

    #[test]
    fn should_reject_trailing_content() {
        let parser = Parser::default();
        for source in ["{} x", "{\"a\":1} garbage", "{\"a\":1}{"] {
            let parsed = parser.parse_str(source);
            assert_eq!(
                parsed.err().unwrap().details,
                ParserErrorDetails::TrailingContent
            );
        }
    }

    #[test]
    fn should_report_error_coordinates() {
        let parser = Parser::default();
        let parsed = parser.parse(&mut "{\n  'a' 1\n}".chars());
        let error = parsed.err().unwrap();
        assert_eq!(error.details, ParserErrorDetails::MissingColon('1'));
        let coords = error.coords.unwrap();
        assert_eq!(coords.absolute, 8);
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 7);
    }

    #[test]
    fn should_bail_on_missing_files() {
        let parser = Parser::default();
        let parsed = parser.parse_file("fixtures/json/no_such_file.json");
        assert_eq!(
            parsed.err().unwrap().details,
            ParserErrorDetails::InvalidFile
        );
    }

    #[test]
    fn should_parse_lengthy_arrays() {
        let path = relative_file!("fixtures/json/valid/catalogue.json");
        let parser = Parser::default();
        let parsed = parser.parse_file(&path);
        println!("{parsed:?}");
        assert!(parsed.is_ok());
    }

    #[test]
    fn should_successfully_bail() {
        let path = relative_file!("fixtures/json/invalid/missing_root.json");
        let parser = Parser::default();
        let parsed = parser.parse_file(&path);
        println!("Parse result = {:?}", parsed);
        assert!(parsed.is_err());
        assert!(parsed.err().unwrap().details == ParserErrorDetails::EmptyOrMissingRoot);
    }

    #[test]
    fn should_parse_basic_test_files() {
        for f in fs::read_dir("fixtures/json/valid").unwrap() {
            let path = f.unwrap().path();
            println!("Parsing {:?}", &path);
            if path.is_file() {
                let len = fs::metadata(&path).unwrap().len();
                let start = Instant::now();
                let path = relative_file!(path.to_str().unwrap());
                let parser = Parser::default();
                let parsed = parser.parse_file(&path);
                if parsed.is_err() {
                    println!("Parse of {:?} failed!", &path);
                    println!("Parse failed with errors: {:?}", &parsed)
                }
                assert!(parsed.is_ok());
                println!(
                    "Parsed {} in {:?} [{:?}]",
                    ByteSize(len),
                    start.elapsed(),
                    path,
                );
            }
        }
    }

    #[test]
    fn should_hand_back_an_object_expression() {
        let parser = Parser::default();
        let parsed = parser.parse_str("{\"a\":1}").unwrap();
        assert!(matches!(parsed, Expression::Object(_)));
    }
}
