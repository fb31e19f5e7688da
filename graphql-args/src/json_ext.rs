//! Extensions and helpers for the JSON-shaped values coercion consumes.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
use serde_json_bytes::Value;

/// A JSON object, as decoded from a request.
pub type Object = Map<ByteString, Value>;

pub(crate) trait ValueExt {
    /// If the `Value` is an integer fitting the 32 bit range, returns it.
    /// Returns None otherwise.
    fn as_int_input(&self) -> Option<i32>;

    /// If the `Value` is any number, returns it as a double, widening
    /// integers. Returns None otherwise.
    fn as_float_input(&self) -> Option<f64>;

    /// Name of the JSON shape, for error messages.
    fn json_kind(&self) -> &'static str;
}

impl ValueExt for Value {
    fn as_int_input(&self) -> Option<i32> {
        // Int is a signed 32 bit integer: https://spec.graphql.org/draft/#sec-Int
        self.as_i64().and_then(|i| i32::try_from(i).ok())
    }

    fn as_float_input(&self) -> Option<f64> {
        self.as_f64()
    }

    fn json_kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

/// One element of a [`Path`]: a field (or argument) name, or an index into a
/// list value.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// An argument or input object field name.
    Key(String),
    /// An index into a list value.
    Index(usize),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(key) => write!(f, "{key}"),
            PathElement::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The position of a value inside a request's arguments, from the argument
/// name down through input object fields and list indices.
///
/// Displayed in dotted form, so a failure three levels deep reads
/// `input.episodes.1`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(pub Vec<PathElement>);

impl Path {
    /// The path of a top level argument.
    pub fn from_argument(name: impl Into<String>) -> Self {
        Self(vec![PathElement::Key(name.into())])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathElement> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, element: PathElement) {
        self.0.push(element);
    }

    pub(crate) fn pop(&mut self) -> Option<PathElement> {
        self.0.pop()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elements = self.0.iter();
        if let Some(first) = elements.next() {
            write!(f, "{first}")?;
            for element in elements {
                write!(f, ".{element}")?;
            }
        }
        Ok(())
    }
}
