//! Declared input types: the shapes arguments are coerced against.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::value::ArgumentValue;

/// The declared type of one input position: an argument of an operation, or a
/// field of an input object.
///
/// Wrappers nest around named or built-in types, so `[Episode!]!` is
/// `NonNull(List(NonNull(Enum)))`. Types are nullable unless wrapped in
/// [`InputType::NonNull`]. The [`InputType::Optional`] wrapper has no
/// equivalent in type notation (and is invisible in the `Display` output): it
/// marks positions whose coerced value distinguishes an omitted key from an
/// explicit null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputType {
    /// Tri-state wrapper: an omitted key coerces to
    /// [`OptionalValue::Undefined`](crate::OptionalValue::Undefined) instead
    /// of collapsing into null.
    Optional(Box<InputType>),
    /// A type that rejects null.
    NonNull(Box<InputType>),
    /// A list of the inner type. A single non-list value is not promoted to a
    /// one-element list.
    List(Box<InputType>),
    /// A user defined input object type.
    Object(Arc<InputObjectType>),
    /// A user defined enum type.
    Enum(Arc<EnumType>),
    /// An opaque identifier, accepted as a string, number or boolean and
    /// carried as a string.
    Id,
    /// A UTF-8 string.
    String,
    /// A signed 32 bit integer.
    Int,
    /// A double precision float. Integers widen.
    Float,
    /// True or false.
    Boolean,
}

impl InputType {
    /// This type wrapped in a non null marker.
    pub fn non_null(self) -> Self {
        InputType::NonNull(Box::new(self))
    }

    /// A list of this type.
    pub fn list(self) -> Self {
        InputType::List(Box::new(self))
    }

    /// This type wrapped in the tri-state optional marker.
    pub fn optional(self) -> Self {
        InputType::Optional(Box::new(self))
    }

    /// The type of values of the input object type `ty`.
    pub fn object(ty: impl Into<Arc<InputObjectType>>) -> Self {
        InputType::Object(ty.into())
    }

    /// The type of members of the enum type `ty`.
    pub fn enum_type(ty: impl Into<Arc<EnumType>>) -> Self {
        InputType::Enum(ty.into())
    }

    /// Whether null is an acceptable value at a position of this type.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, InputType::NonNull(_))
    }

    /// Whether this position distinguishes an omitted key from an explicit
    /// null.
    pub fn is_optional(&self) -> bool {
        matches!(self, InputType::Optional(_))
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Optional(ty) => write!(f, "{ty}"),
            InputType::NonNull(ty) => write!(f, "{ty}!"),
            InputType::List(ty) => write!(f, "[{ty}]"),
            InputType::Object(ty) => write!(f, "{}", ty.name()),
            InputType::Enum(ty) => write!(f, "{}", ty.name()),
            InputType::Id => write!(f, "ID"),
            InputType::String => write!(f, "String"),
            InputType::Int => write!(f, "Int"),
            InputType::Float => write!(f, "Float"),
            InputType::Boolean => write!(f, "Boolean"),
        }
    }
}

/// An enum type: a name and its declared members, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    name: String,
    values: IndexSet<String>,
}

#[buildstructor::buildstructor]
impl EnumType {
    /// Returns a builder for an [`EnumType`].
    ///
    /// Builder methods:
    ///
    /// * `.name(impl Into<`[`String`]`>)`
    ///   Required.
    ///   Sets the name of the enum type.
    ///
    /// * `.value(impl Into<`[`String`]`>)`
    ///   Optional, may be called multiple times.
    ///   Adds one member at the end.
    ///
    /// * `.build()`
    ///   Finishes the builder and returns an [`EnumType`].
    #[builder(visibility = "pub")]
    fn new(name: String, values: Vec<String>) -> Self {
        Self {
            name,
            values: values.into_iter().collect(),
        }
    }
}

impl EnumType {
    /// Name of the enum type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `literal` names a declared member. Matching is case sensitive.
    pub fn contains(&self, literal: &str) -> bool {
        self.values.contains(literal)
    }

    /// The declared members, in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(String::as_str)
    }

    pub(crate) fn valid_values(&self) -> String {
        self.values.iter().join(", ")
    }
}

/// An input object type: a name and its declared fields, in declaration
/// order.
///
/// Coercion consults the declared fields only; keys of the raw mapping that
/// no field declares are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputObjectType {
    name: String,
    fields: Vec<InputValueDefinition>,
}

#[buildstructor::buildstructor]
impl InputObjectType {
    /// Returns a builder for an [`InputObjectType`].
    ///
    /// Builder methods:
    ///
    /// * `.name(impl Into<`[`String`]`>)`
    ///   Required.
    ///   Sets the name of the input object type.
    ///
    /// * `.field(`[`InputValueDefinition`]`)`
    ///   Optional, may be called multiple times.
    ///   Adds one declared field at the end.
    ///
    /// * `.build()`
    ///   Finishes the builder and returns an [`InputObjectType`].
    #[builder(visibility = "pub")]
    fn new(name: String, fields: Vec<InputValueDefinition>) -> Self {
        Self { name, fields }
    }
}

impl InputObjectType {
    /// Name of the input object type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[InputValueDefinition] {
        &self.fields
    }
}

/// One declared input value: an argument of an operation, or a field of an
/// input object. The two positions coerce identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputValueDefinition {
    name: String,
    ty: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<ArgumentValue>,
}

#[buildstructor::buildstructor]
impl InputValueDefinition {
    /// Returns a builder for an [`InputValueDefinition`].
    ///
    /// Builder methods:
    ///
    /// * `.name(impl Into<`[`String`]`>)`
    ///   Required.
    ///   Sets the name of the argument or field.
    ///
    /// * `.ty(`[`InputType`]`)`
    ///   Required.
    ///   Sets the declared type.
    ///
    /// * `.default_value(`[`ArgumentValue`]`)`
    ///   Optional.
    ///   Sets the value used when the key is absent. A default is already
    ///   typed and is not re-coerced.
    ///
    /// * `.build()`
    ///   Finishes the builder and returns an [`InputValueDefinition`].
    #[builder(visibility = "pub")]
    fn new(name: String, ty: InputType, default_value: Option<ArgumentValue>) -> Self {
        Self {
            name,
            ty,
            default_value,
        }
    }
}

impl InputValueDefinition {
    /// Name of the argument or field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn ty(&self) -> &InputType {
        &self.ty
    }

    /// The declared default, if any.
    pub fn default_value(&self) -> Option<&ArgumentValue> {
        self.default_value.as_ref()
    }
}
