//! The coercion walk: raw arguments in, typed values out.

use serde_json_bytes::Value;
use tracing::level_filters::LevelFilter;

use crate::arguments::RawArgument;
use crate::arguments::RawArguments;
use crate::error::CoercionError;
use crate::input_type::InputObjectType;
use crate::input_type::InputType;
use crate::input_type::InputValueDefinition;
use crate::json_ext::Object;
use crate::json_ext::Path;
use crate::json_ext::PathElement;
use crate::json_ext::ValueExt;
use crate::value::ArgumentValue;
use crate::value::Id;
use crate::value::InputObjectValue;

const DEFAULT_MAX_DEPTH: usize = 128;

/// Coerces raw request arguments into typed values, driven by declared input
/// types.
///
/// The coercer holds no per-request state: a single instance can serve any
/// number of concurrent calls.
#[derive(Clone, Debug)]
pub struct Coercer {
    max_depth: usize,
}

static_assertions::assert_impl_all!(Coercer: Send, Sync);

impl Default for Coercer {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[buildstructor::buildstructor]
impl Coercer {
    /// Returns a builder for a [`Coercer`].
    ///
    /// Builder methods:
    ///
    /// * `.max_depth(usize)`
    ///   Optional, defaults to 128.
    ///   Rejects raw values nested deeper than this. Descending into a list
    ///   element or an input object field counts one level.
    ///
    /// * `.build()`
    ///   Finishes the builder and returns a [`Coercer`].
    #[builder(visibility = "pub")]
    fn new(max_depth: Option<usize>) -> Self {
        Self {
            max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}

impl Coercer {
    /// Coerce the argument `name` of `arguments` against the declared type
    /// `ty`.
    ///
    /// An absent key is legal for tri-state optional and nullable types
    /// (coercing to `Undefined` and `Null` respectively) and an error for
    /// everything else. The first failure aborts the walk; the error carries
    /// the full dotted path to the offending value.
    #[tracing::instrument(skip_all, level = "trace")]
    pub fn coerce(
        &self,
        name: &str,
        ty: &InputType,
        arguments: &RawArguments,
    ) -> Result<ArgumentValue, CoercionError> {
        self.coerce_entry(name, ty, None, arguments)
    }

    /// Coerce one declared argument, honoring its default value when the key
    /// is absent.
    #[tracing::instrument(skip_all, level = "trace")]
    pub fn coerce_definition(
        &self,
        definition: &InputValueDefinition,
        arguments: &RawArguments,
    ) -> Result<ArgumentValue, CoercionError> {
        self.coerce_entry(
            definition.name(),
            definition.ty(),
            definition.default_value(),
            arguments,
        )
    }

    /// Coerce a whole declared signature, in declaration order.
    ///
    /// Fails on the first argument that does not fit; later arguments are not
    /// looked at.
    #[tracing::instrument(skip_all, level = "trace")]
    pub fn coerce_arguments(
        &self,
        definitions: &[InputValueDefinition],
        arguments: &RawArguments,
    ) -> Result<Vec<ArgumentValue>, CoercionError> {
        definitions
            .iter()
            .map(|definition| self.coerce_definition(definition, arguments))
            .collect()
    }

    // Arguments and input object fields resolve the same way: fetch the key,
    // fall back when it is absent.
    fn coerce_entry(
        &self,
        name: &str,
        ty: &InputType,
        default: Option<&ArgumentValue>,
        arguments: &RawArguments,
    ) -> Result<ArgumentValue, CoercionError> {
        let mut path = Path::from_argument(name);
        match arguments.get(name) {
            Some(raw) => self.coerce_raw(ty, raw, &mut path, 0),
            None => absent_value(ty, default, &path),
        }
    }

    fn coerce_raw(
        &self,
        ty: &InputType,
        raw: &RawArgument,
        path: &mut Path,
        depth: usize,
    ) -> Result<ArgumentValue, CoercionError> {
        match raw {
            RawArgument::Json(value) => self.coerce_value(ty, value, path, depth),
            RawArgument::Typed(value) => self.pass_through(ty, value, path),
        }
    }

    // A value coerced upstream skips the walk. Only input object instances of
    // the declared type (and null, where allowed) are accepted.
    fn pass_through(
        &self,
        ty: &InputType,
        value: &ArgumentValue,
        path: &mut Path,
    ) -> Result<ArgumentValue, CoercionError> {
        if let InputType::Optional(inner) = ty {
            let value = self.pass_through(inner, value, path)?;
            return Ok(ArgumentValue::defined(value));
        }
        if value.is_null() {
            return if ty.is_nullable() {
                Ok(ArgumentValue::Null)
            } else {
                Err(rejected_null(ty, path))
            };
        }
        match ty {
            InputType::NonNull(inner) => self.pass_through(inner, value, path),
            InputType::Object(object_ty) => match value {
                ArgumentValue::Object(instance) if instance.type_name() == object_ty.name() => {
                    tracing::trace!(
                        ty = object_ty.name(),
                        "input object was already coerced, passing it through"
                    );
                    Ok(ArgumentValue::Object(instance.clone()))
                }
                value => Err(mismatch_typed(ty, value, path)),
            },
            _ => Err(mismatch_typed(ty, value, path)),
        }
    }

    fn coerce_value(
        &self,
        ty: &InputType,
        value: &Value,
        path: &mut Path,
        depth: usize,
    ) -> Result<ArgumentValue, CoercionError> {
        if depth > self.max_depth {
            return Err(CoercionError::MaxDepthExceeded {
                path: path.clone(),
                limit: self.max_depth,
            });
        }
        match (ty, value) {
            // A value position cannot be absent, so an optional type there is
            // always Defined.
            (InputType::Optional(inner), value) => {
                let value = self.coerce_value(inner, value, path, depth)?;
                Ok(ArgumentValue::defined(value))
            }
            (InputType::NonNull(_), Value::Null) => Err(rejected_null(ty, path)),
            (InputType::NonNull(inner), value) => self.coerce_value(inner, value, path, depth),
            // every type below is nullable
            (_, Value::Null) => Ok(ArgumentValue::Null),
            (InputType::List(element_ty), Value::Array(elements)) => {
                let mut coerced = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    path.push(PathElement::Index(index));
                    let element = self.coerce_value(element_ty, element, path, depth + 1);
                    path.pop();
                    coerced.push(element?);
                }
                Ok(ArgumentValue::List(coerced))
            }
            // a single value is not promoted to a one-element list
            (InputType::List(_), value) => Err(mismatch(ty, value, path)),
            (InputType::Object(object_ty), Value::Object(fields)) => Ok(ArgumentValue::Object(
                self.coerce_object(object_ty, fields, path, depth)?,
            )),
            (InputType::Object(_), value) => Err(mismatch(ty, value, path)),
            (InputType::Enum(enum_ty), value) => {
                // Enum literals are scalar: an array or object cannot name a
                // member, whatever it contains.
                let literal = match value {
                    Value::String(literal) => literal.as_str().to_string(),
                    Value::Number(literal) => literal.to_string(),
                    Value::Bool(literal) => literal.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => {
                        return Err(mismatch(ty, value, path));
                    }
                };
                if enum_ty.contains(&literal) {
                    Ok(ArgumentValue::Enum(literal))
                } else {
                    Err(CoercionError::InvalidEnumValue {
                        path: path.clone(),
                        literal,
                        ty: enum_ty.name().to_string(),
                        valid: enum_ty.valid_values(),
                    })
                }
            }
            (InputType::Id, value) => match value {
                // IDs stay opaque; numbers and booleans are carried as their
                // literal text.
                Value::String(id) => Ok(ArgumentValue::Id(Id::new(id.as_str()))),
                Value::Number(id) => Ok(ArgumentValue::Id(Id::new(id.to_string()))),
                Value::Bool(id) => Ok(ArgumentValue::Id(Id::new(id.to_string()))),
                value => Err(mismatch(ty, value, path)),
            },
            (InputType::String, Value::String(value)) => {
                Ok(ArgumentValue::String(value.as_str().to_string()))
            }
            (InputType::String, value) => Err(mismatch(ty, value, path)),
            (InputType::Int, value) => value
                .as_int_input()
                .or_else(|| value.as_str().and_then(|value| value.parse().ok()))
                .map(ArgumentValue::Int)
                .ok_or_else(|| mismatch(ty, value, path)),
            (InputType::Float, value) => value
                .as_float_input()
                .or_else(|| value.as_str().and_then(|value| value.parse().ok()))
                .filter(|value: &f64| value.is_finite())
                .map(ArgumentValue::Float)
                .ok_or_else(|| mismatch(ty, value, path)),
            (InputType::Boolean, Value::Bool(value)) => Ok(ArgumentValue::Bool(*value)),
            (InputType::Boolean, value) => Err(mismatch(ty, value, path)),
        }
    }

    fn coerce_object(
        &self,
        ty: &InputObjectType,
        fields: &Object,
        path: &mut Path,
        depth: usize,
    ) -> Result<InputObjectValue, CoercionError> {
        if LevelFilter::current() >= LevelFilter::DEBUG {
            let undeclared: Vec<&str> = fields
                .keys()
                .map(|key| key.as_str())
                .filter(|key| ty.fields().iter().all(|field| field.name() != *key))
                .collect();
            if !undeclared.is_empty() {
                tracing::debug!(
                    ty = ty.name(),
                    keys = ?undeclared,
                    "ignoring keys the input object type does not declare"
                );
            }
        }

        let mut instance = InputObjectValue::new(ty.name());
        for field in ty.fields() {
            path.push(PathElement::Key(field.name().to_string()));
            let value = match fields.get(field.name()) {
                Some(value) => self.coerce_value(field.ty(), value, path, depth + 1),
                None => absent_value(field.ty(), field.default_value(), path),
            };
            path.pop();
            instance.insert(field.name(), value?);
        }
        Ok(instance)
    }
}

// The fallback ladder for a key that was not provided: declared default, then
// Undefined for tri-state positions, then null where legal.
fn absent_value(
    ty: &InputType,
    default: Option<&ArgumentValue>,
    path: &Path,
) -> Result<ArgumentValue, CoercionError> {
    if let Some(default) = default {
        return Ok(default.clone());
    }
    if ty.is_optional() {
        return Ok(ArgumentValue::undefined());
    }
    if ty.is_nullable() {
        Ok(ArgumentValue::Null)
    } else {
        Err(CoercionError::MissingRequiredField {
            path: path.clone(),
            expected: ty.to_string(),
        })
    }
}

fn mismatch(ty: &InputType, value: &Value, path: &Path) -> CoercionError {
    CoercionError::TypeMismatch {
        path: path.clone(),
        expected: ty.to_string(),
        found: value.json_kind().to_string(),
    }
}

fn mismatch_typed(ty: &InputType, value: &ArgumentValue, path: &Path) -> CoercionError {
    let found = match value {
        ArgumentValue::Object(instance) => format!(
            "an already coerced input object of type '{}'",
            instance.type_name()
        ),
        value => format!("an already coerced {} value", value.kind()),
    };
    CoercionError::TypeMismatch {
        path: path.clone(),
        expected: ty.to_string(),
        found,
    }
}

fn rejected_null(ty: &InputType, path: &Path) -> CoercionError {
    CoercionError::NullNotAllowed {
        path: path.clone(),
        expected: ty.to_string(),
    }
}
