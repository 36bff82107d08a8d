//! Binds parsed expressions onto plain Rust values.
//!
//! The parser hands back raw, uninterpreted spans; this module is where those spans
//! finally become typed data.  A target type implements [FromJson] by listing one
//! [FieldBinding] per field it wants populated, pairing the source key with a typed
//! setter.  [from_expression] then walks an object expression, looks each registered
//! key up, and applies the matching setter.  Absent keys and empty values are skipped,
//! leaving whatever [Default] produced, so partially populated documents bind without
//! ceremony.
//!
//! String fields are stripped of their quotes and unescaped on the way through; numeric
//! and boolean fields are parsed from the raw span and fail the whole bind with a
//! [BinderError] when the span does not parse.
use crate::binder_error;
use crate::errors::{BinderError, BinderErrorDetails, BinderResult};
use crate::expression::Expression;
use crate::strings;

/// Implemented by types that can be populated from an object expression
pub trait FromJson: Default {
    /// The bindings between source keys and the fields of this type
    fn bindings() -> Vec<FieldBinding<Self>>;
}

/// A single key-to-setter binding within a [FromJson::bindings] table
pub struct FieldBinding<T> {
    key: &'static str,
    apply: Box<dyn Fn(&mut T, &Expression) -> BinderResult<()>>,
}

impl<T: 'static> FieldBinding<T> {
    /// Bind a string field.  The member is serialized, stripped of one pair of
    /// surrounding quotes and unescaped before assignment
    pub fn string(key: &'static str, assign: fn(&mut T, String)) -> Self {
        Self {
            key,
            apply: Box::new(move |target: &mut T, member: &Expression| {
                let text = member.to_string();
                assign(target, strings::unescape(strings::strip_quotes(&text)));
                Ok(())
            }),
        }
    }

    /// Bind an integer field from the raw span
    pub fn integer(key: &'static str, assign: fn(&mut T, i64)) -> Self {
        Self {
            key,
            apply: Box::new(move |target: &mut T, member: &Expression| {
                let text = member.to_string();
                match parse_integer(strings::strip_quotes(text.trim())) {
                    Some(value) => {
                        assign(target, value);
                        Ok(())
                    }
                    None => binder_error!(BinderErrorDetails::InvalidNumericRepresentation(text)),
                }
            }),
        }
    }

    /// Bind a floating point field from the raw span
    pub fn float(key: &'static str, assign: fn(&mut T, f64)) -> Self {
        Self {
            key,
            apply: Box::new(move |target: &mut T, member: &Expression| {
                let text = member.to_string();
                match fast_float::parse(strings::strip_quotes(text.trim())) {
                    Ok(value) => {
                        assign(target, value);
                        Ok(())
                    }
                    Err(_) => binder_error!(BinderErrorDetails::InvalidNumericRepresentation(text)),
                }
            }),
        }
    }

    /// Bind a boolean field.  Only the raw spans `true` and `false` are accepted
    pub fn boolean(key: &'static str, assign: fn(&mut T, bool)) -> Self {
        Self {
            key,
            apply: Box::new(move |target: &mut T, member: &Expression| {
                let text = member.to_string();
                match strings::strip_quotes(text.trim()) {
                    "true" => {
                        assign(target, true);
                        Ok(())
                    }
                    "false" => {
                        assign(target, false);
                        Ok(())
                    }
                    _ => binder_error!(BinderErrorDetails::InvalidBooleanRepresentation(text)),
                }
            }),
        }
    }

    /// Bind a nested object field onto another [FromJson] type
    pub fn object<U: FromJson + 'static>(key: &'static str, assign: fn(&mut T, U)) -> Self {
        Self {
            key,
            apply: Box::new(move |target: &mut T, member: &Expression| {
                assign(target, from_expression::<U>(member)?);
                Ok(())
            }),
        }
    }

    /// Bind an array field whose members are all objects onto a list of another
    /// [FromJson] type
    pub fn list<U: FromJson + 'static>(key: &'static str, assign: fn(&mut T, Vec<U>)) -> Self {
        Self {
            key,
            apply: Box::new(move |target: &mut T, member: &Expression| match member.as_array() {
                Some(members) => {
                    let mut values = Vec::with_capacity(members.len());
                    for item in members {
                        if item.as_object().is_none() {
                            return binder_error!(BinderErrorDetails::ListMemberExpected(
                                key.to_string()
                            ));
                        }
                        values.push(from_expression::<U>(item)?);
                    }
                    assign(target, values);
                    Ok(())
                }
                None => binder_error!(BinderErrorDetails::ListExpected(key.to_string())),
            }),
        }
    }
}

/// Populate a fresh `T` from an object expression, applying each binding in
/// [FromJson::bindings] whose key is present with a non-empty value
pub fn from_expression<T: FromJson>(expr: &Expression) -> BinderResult<T> {
    if expr.as_object().is_none() {
        return binder_error!(BinderErrorDetails::ObjectExpected);
    }
    let mut target = T::default();
    for binding in T::bindings() {
        match expr.get(binding.key) {
            Some(member) if !member.is_empty() => (binding.apply)(&mut target, member)?,
            _ => (),
        }
    }
    Ok(target)
}

#[cfg(feature = "mixed_numerics")]
fn parse_integer(text: &str) -> Option<i64> {
    lexical::parse(text).ok()
}

#[cfg(not(feature = "mixed_numerics"))]
fn parse_integer(text: &str) -> Option<i64> {
    fast_float::parse::<f64, _>(text).ok().map(|value| value as i64)
}
