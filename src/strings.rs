//! Helpers for turning raw quoted spans into plain text and back again.  Natives keep
//! their quotes and escape sequences exactly as they appeared in the input, so anything
//! consuming them as strings funnels through [strip_quotes] and [unescape]; anything
//! producing quoted spans uses [escape] and [quote].
//!
//! Only the backslash sequences `\"` `\'` `\\` `\b` `\f` `\n` `\r` `\t` are decoded.
//! Unicode escapes (`\uXXXX`) are not interpreted.

/// Remove a single pair of matching quote characters from the ends of `raw`.  Text that
/// is not wrapped in `"..."` or `'...'` comes back unchanged
pub fn strip_quotes(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '"' || first == '\'') => {
            chars.as_str()
        }
        _ => raw,
    }
}

/// Decode the supported backslash sequences within `value`.  The backslash of an
/// unrecognized sequence is dropped and the character following it kept; a backslash
/// sitting at the very end of the input is kept
pub fn unescape(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => output.push('"'),
            Some('\'') => output.push('\''),
            Some('\\') => output.push('\\'),
            Some('b') => output.push('\u{0008}'),
            Some('f') => output.push('\u{000c}'),
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some(other) => output.push(other),
            None => output.push('\\'),
        }
    }
    output
}

/// Escape `value` so that [unescape] recovers it exactly
pub fn escape(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000c}' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            _ => output.push(ch),
        }
    }
    output
}

/// Escape `value` and wrap it in double quotes, yielding a well-formed quoted span
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    quoted.push_str(&escape(value));
    quoted.push('"');
    quoted
}
