//! The raw argument bag handed over by the request layer.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json_bytes::Value;

use crate::json_ext::Object;
use crate::value::ArgumentValue;

/// One raw argument, before coercion.
///
/// Bags deserialized from a request only ever contain [`RawArgument::Json`];
/// [`RawArgument::Typed`] carries a value a caller coerced beforehand (or
/// built by hand), which coercion hands back untouched when the declared
/// input object type matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawArgument {
    /// A decoded wire value.
    Json(Value),
    /// An already coerced value.
    Typed(ArgumentValue),
}

impl From<Value> for RawArgument {
    fn from(value: Value) -> Self {
        RawArgument::Json(value)
    }
}

impl From<ArgumentValue> for RawArgument {
    fn from(value: ArgumentValue) -> Self {
        RawArgument::Typed(value)
    }
}

/// The raw arguments of one request, keyed by argument name.
///
/// The bag preserves the distinction the wire format makes between an absent
/// key and a key set to null: [`get`](Self::get) returns `None` for the
/// first and `Some(&RawArgument::Json(Value::Null))` for the second.
/// Insertion order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawArguments {
    entries: IndexMap<String, RawArgument>,
}

impl RawArguments {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of provided arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the argument `name` was provided at all. True even when it was
    /// set to an explicit null.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The provided value of the argument `name`, or `None` when the key was
    /// absent.
    pub fn get(&self, name: &str) -> Option<&RawArgument> {
        self.entries.get(name)
    }

    /// Provide one argument, replacing any previous value under the same
    /// name. Returns the replaced value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<RawArgument>,
    ) -> Option<RawArgument> {
        self.entries.insert(name.into(), value.into())
    }

    /// The provided arguments, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawArgument)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<Object> for RawArguments {
    fn from(variables: Object) -> Self {
        Self {
            entries: variables
                .into_iter()
                .map(|(name, value)| (name.as_str().to_string(), RawArgument::Json(value)))
                .collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawArguments
where
    K: Into<String>,
    V: Into<RawArgument>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
