//! Typed argument values, the output of coercion.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A coerced argument value, ready to invoke the target operation with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArgumentValue {
    /// An explicit null at a nullable position.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 32 bit integer.
    Int(i32),
    /// A double precision float.
    Float(f64),
    /// A string.
    String(String),
    /// An opaque identifier.
    Id(Id),
    /// The name of an enum member, verified against the declared type.
    Enum(String),
    /// A list of coerced values.
    List(Vec<ArgumentValue>),
    /// A constructed input object.
    Object(InputObjectValue),
    /// A tri-state position: records whether the key was provided at all.
    Optional(OptionalValue),
}

impl ArgumentValue {
    /// The value of a tri-state position whose key was omitted.
    pub fn undefined() -> Self {
        ArgumentValue::Optional(OptionalValue::Undefined)
    }

    /// The value of a tri-state position whose key was provided. `value` may
    /// be [`ArgumentValue::Null`].
    pub fn defined(value: ArgumentValue) -> Self {
        ArgumentValue::Optional(OptionalValue::Defined(Box::new(value)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgumentValue::Null)
    }

    /// If the value is a string, returns it. Returns None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgumentValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// If the value is a list, returns its elements. Returns None otherwise.
    pub fn as_list(&self) -> Option<&[ArgumentValue]> {
        match self {
            ArgumentValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// If the value is an input object, returns it. Returns None otherwise.
    pub fn as_object(&self) -> Option<&InputObjectValue> {
        match self {
            ArgumentValue::Object(value) => Some(value),
            _ => None,
        }
    }

    /// If the value is a tri-state optional, returns it. Returns None
    /// otherwise.
    pub fn as_optional(&self) -> Option<&OptionalValue> {
        match self {
            ArgumentValue::Optional(value) => Some(value),
            _ => None,
        }
    }

    /// Name of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgumentValue::Null => "null",
            ArgumentValue::Bool(_) => "boolean",
            ArgumentValue::Int(_) => "int",
            ArgumentValue::Float(_) => "float",
            ArgumentValue::String(_) => "string",
            ArgumentValue::Id(_) => "identifier",
            ArgumentValue::Enum(_) => "enum",
            ArgumentValue::List(_) => "list",
            ArgumentValue::Object(_) => "input object",
            ArgumentValue::Optional(_) => "optional",
        }
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Bool(value)
    }
}

impl From<i32> for ArgumentValue {
    fn from(value: i32) -> Self {
        ArgumentValue::Int(value)
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        ArgumentValue::Float(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::String(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::String(value)
    }
}

impl From<Id> for ArgumentValue {
    fn from(value: Id) -> Self {
        ArgumentValue::Id(value)
    }
}

impl From<Vec<ArgumentValue>> for ArgumentValue {
    fn from(values: Vec<ArgumentValue>) -> Self {
        ArgumentValue::List(values)
    }
}

impl From<InputObjectValue> for ArgumentValue {
    fn from(value: InputObjectValue) -> Self {
        ArgumentValue::Object(value)
    }
}

impl From<OptionalValue> for ArgumentValue {
    fn from(value: OptionalValue) -> Self {
        ArgumentValue::Optional(value)
    }
}

/// The value of a tri-state position.
///
/// `Undefined` and `Defined(Null)` never collapse into each other: the first
/// records a key that was not provided, the second an explicit null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OptionalValue {
    /// The key was not provided.
    Undefined,
    /// The key was provided; the value may be [`ArgumentValue::Null`].
    Defined(Box<ArgumentValue>),
}

impl OptionalValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, OptionalValue::Undefined)
    }

    /// If the key was provided, returns the value. Returns None otherwise.
    pub fn as_defined(&self) -> Option<&ArgumentValue> {
        match self {
            OptionalValue::Undefined => None,
            OptionalValue::Defined(value) => Some(value),
        }
    }
}

/// An opaque identifier.
///
/// Identifiers are carried as strings whatever their wire shape was, so
/// `"4"`, `4` and `4.0` stay distinguishable from each other once coerced.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A constructed input object: the name of its type and one coerced value per
/// declared field, in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputObjectValue {
    type_name: String,
    fields: IndexMap<String, ArgumentValue>,
}

impl InputObjectValue {
    /// An instance of the input object type `type_name` with no fields set.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Chainable variant of [`insert`](Self::insert), for assembling
    /// instances by hand.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<ArgumentValue>,
    ) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Set the value of `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.fields.insert(name.into(), value);
    }

    /// Name of the input object type this value instantiates.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The value of the field `name`, if set.
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.fields.get(name)
    }

    /// The fields and their values, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_and_explicit_null_stay_distinguishable() {
        let undefined = ArgumentValue::undefined();
        let explicit_null = ArgumentValue::defined(ArgumentValue::Null);

        assert_ne!(undefined, explicit_null);
        assert!(undefined
            .as_optional()
            .is_some_and(OptionalValue::is_undefined));
        assert_eq!(
            explicit_null.as_optional().and_then(OptionalValue::as_defined),
            Some(&ArgumentValue::Null)
        );
    }

    #[test]
    fn input_objects_keep_field_order() {
        let review = InputObjectValue::new("ReviewInput")
            .with_field("stars", 5)
            .with_field("commentary", "one bright spot")
            .with_field("favorite", true);

        assert_eq!(review.type_name(), "ReviewInput");
        assert_eq!(
            review.fields().map(|(name, _)| name).collect::<Vec<_>>(),
            ["stars", "commentary", "favorite"]
        );
        assert_eq!(review.get("stars"), Some(&ArgumentValue::Int(5)));
        assert_eq!(review.get("rating"), None);
        assert_eq!(review.len(), 3);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = Id::new("2001");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""2001""#);
        assert_eq!(serde_json::from_str::<Id>(r#""2001""#).unwrap(), id);
        assert_eq!(id.to_string(), "2001");
    }
}
