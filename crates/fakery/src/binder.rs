//! Binding of untyped string parameters to typed arguments.
//!
//! Front ends hand over parameters as a string multimap ([`RawParams`]) or as
//! an ordered token list. The binder walks a descriptor's parameter schema,
//! applies defaults, and coerces each raw value to its semantic type so that
//! everything past this point is fully typed.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ArgumentError, BindError};
use crate::registry::{Descriptor, ParamSpec, ParamType};

/// Untyped parameters keyed by field name, each with one or more values.
///
/// Deserialises from a JSON object whose values are strings, numbers,
/// booleans, or arrays of those.
///
/// # Example
///
/// ```
/// use fakery::RawParams;
///
/// let params: RawParams = serde_json::from_str(r#"{"special": ["false"], "length": 20}"#)
///     .expect("valid params");
///
/// assert_eq!(params.get("special"), Some(&["false".to_owned()][..]));
/// assert_eq!(params.get("length"), Some(&["20".to_owned()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, RawEntry>")]
pub struct RawParams {
    values: BTreeMap<String, Vec<String>>,
}

impl RawParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets all values for `field`, replacing earlier ones.
    pub fn insert(&mut self, field: impl Into<String>, values: Vec<String>) {
        self.values.insert(field.into(), values);
    }

    /// Appends a single value for `field`.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.entry(field.into()).or_default().push(value.into());
    }

    /// Returns the values supplied for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.values.get(field).map(Vec::as_slice)
    }

    /// Returns the number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, I, V> FromIterator<(K, I)> for RawParams
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let values = iter
            .into_iter()
            .map(|(field, raw)| (field.into(), raw.into_iter().map(Into::into).collect()))
            .collect();
        Self { values }
    }
}

/// JSON shape accepted for a single parameter entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    One(RawScalar),
    Many(Vec<RawScalar>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::Flag(flag) => flag.to_string(),
        }
    }
}

impl From<BTreeMap<String, RawEntry>> for RawParams {
    fn from(raw: BTreeMap<String, RawEntry>) -> Self {
        let values = raw
            .into_iter()
            .map(|(field, entry)| {
                let strings = match entry {
                    RawEntry::One(scalar) => vec![scalar.into_string()],
                    RawEntry::Many(scalars) => {
                        scalars.into_iter().map(RawScalar::into_string).collect()
                    }
                };
                (field, strings)
            })
            .collect();
        Self { values }
    }
}

/// A single typed argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Bound `bool` parameter.
    Bool(bool),
    /// Bound `int` parameter.
    Int(i64),
    /// Bound `float` parameter.
    Float(f64),
    /// Bound `string` parameter.
    String(String),
    /// Bound `string-list` parameter.
    StringList(Vec<String>),
}

/// Typed arguments in parameter declaration order.
///
/// Adapters read arguments by position; the accessors report a mismatch
/// between schema and adapter rather than panicking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<Argument>,
}

impl Arguments {
    /// Returns the `bool` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] if the argument is absent or not a `bool`.
    pub fn bool(&self, index: usize) -> Result<bool, ArgumentError> {
        match self.values.get(index) {
            Some(Argument::Bool(value)) => Ok(*value),
            _ => Err(mismatch(index, ParamType::Bool)),
        }
    }

    /// Returns the `int` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] if the argument is absent or not an `int`.
    pub fn int(&self, index: usize) -> Result<i64, ArgumentError> {
        match self.values.get(index) {
            Some(Argument::Int(value)) => Ok(*value),
            _ => Err(mismatch(index, ParamType::Int)),
        }
    }

    /// Returns the `float` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] if the argument is absent or not a `float`.
    pub fn float(&self, index: usize) -> Result<f64, ArgumentError> {
        match self.values.get(index) {
            Some(Argument::Float(value)) => Ok(*value),
            _ => Err(mismatch(index, ParamType::Float)),
        }
    }

    /// Returns the `string` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] if the argument is absent or not a `string`.
    pub fn string(&self, index: usize) -> Result<&str, ArgumentError> {
        match self.values.get(index) {
            Some(Argument::String(value)) => Ok(value),
            _ => Err(mismatch(index, ParamType::String)),
        }
    }

    /// Returns the `string-list` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] if the argument is absent or not a
    /// `string-list`.
    pub fn string_list(&self, index: usize) -> Result<&[String], ArgumentError> {
        match self.values.get(index) {
            Some(Argument::StringList(values)) => Ok(values),
            _ => Err(mismatch(index, ParamType::StringList)),
        }
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Argument>> for Arguments {
    fn from(values: Vec<Argument>) -> Self {
        Self { values }
    }
}

const fn mismatch(index: usize, expected: ParamType) -> ArgumentError {
    ArgumentError { index, expected }
}

/// Binds raw parameters against a descriptor's schema.
///
/// # Errors
///
/// Returns the first [`BindError`] encountered, in declaration order.
///
/// # Example
///
/// ```
/// use fakery::{RawParams, Registry, bind};
///
/// let registry = Registry::with_catalog();
/// let descriptor = registry.lookup("number").expect("registered");
/// let params: RawParams = [("min", ["5"]), ("max", ["10"])].into_iter().collect();
///
/// let args = bind(descriptor, &params).expect("binds");
/// assert_eq!(args.int(0), Ok(5));
/// assert_eq!(args.int(1), Ok(10));
/// ```
pub fn bind(descriptor: &Descriptor, raw: &RawParams) -> Result<Arguments, BindError> {
    bind_params(descriptor.params(), raw)
}

/// Binds raw parameters against an explicit parameter schema.
///
/// Fields not named in `specs` are ignored.
///
/// # Errors
///
/// Returns the first [`BindError`] encountered, in declaration order.
pub fn bind_params(specs: &[ParamSpec], raw: &RawParams) -> Result<Arguments, BindError> {
    specs
        .iter()
        .map(|spec| bind_one(spec, raw.get(spec.field())))
        .collect::<Result<Vec<_>, _>>()
        .map(Arguments::from)
}

/// Binds positional tokens: the i-th token binds to the i-th parameter.
///
/// Tokens beyond the schema are ignored; missing trailing tokens fall back
/// to defaults.
///
/// # Errors
///
/// Returns the first [`BindError`] encountered, in declaration order.
pub fn bind_positional(descriptor: &Descriptor, tokens: &[String]) -> Result<Arguments, BindError> {
    bind_params(descriptor.params(), &positional_params(descriptor.params(), tokens))
}

/// Maps positional tokens onto field names from `specs`.
#[must_use]
pub fn positional_params(specs: &[ParamSpec], tokens: &[String]) -> RawParams {
    specs
        .iter()
        .zip(tokens)
        .map(|(spec, token)| (spec.field(), [token.as_str()]))
        .collect()
}

fn bind_one(spec: &ParamSpec, supplied: Option<&[String]>) -> Result<Argument, BindError> {
    match supplied {
        Some(values) if !values.is_empty() => coerce(spec, values),
        _ => spec
            .default_value()
            .ok_or_else(|| BindError::Missing {
                field: spec.field().to_owned(),
                expected: spec.kind(),
            })
            .and_then(|default_value| coerce(spec, &[default_value.to_owned()])),
    }
}

fn coerce(spec: &ParamSpec, values: &[String]) -> Result<Argument, BindError> {
    let first = values.first().map_or("", String::as_str);
    let invalid = || BindError::Invalid {
        field: spec.field().to_owned(),
        expected: spec.kind(),
        value: first.to_owned(),
    };

    match spec.kind() {
        ParamType::Bool => parse_bool(first).map(Argument::Bool).ok_or_else(invalid),
        ParamType::Int => first.parse().map(Argument::Int).map_err(|_| invalid()),
        ParamType::Float => first
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Argument::Float)
            .ok_or_else(invalid),
        ParamType::String => Ok(Argument::String(first.to_owned())),
        ParamType::StringList => Ok(Argument::StringList(match values {
            [single] => split_list(single),
            many => many.to_vec(),
        })),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Splits a raw list on top-level commas.
///
/// Commas nested inside `[...]`, `{...}` or a double-quoted string do not
/// split, so a list element may itself be a bracketed list or a JSON object.
/// Whitespace around each element is trimmed and an empty input yields an
/// empty list.
///
/// # Example
///
/// ```
/// use fakery::split_list;
///
/// assert_eq!(split_list("a,[1,2,3],b"), ["a", "[1,2,3]", "b"]);
/// assert_eq!(split_list("a, b, c"), ["a", "b", "c"]);
/// assert!(split_list("").is_empty());
/// ```
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0_usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for c in raw.chars() {
        if in_quotes {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            ',' if depth == 0 => {
                parts.push(current.trim().to_owned());
                current.clear();
            }
            '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '"' => {
                in_quotes = true;
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    parts.push(current.trim().to_owned());
    parts
}
