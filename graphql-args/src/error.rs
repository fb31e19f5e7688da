//! Errors produced while coercing raw arguments.

use displaydoc::Display;
use serde::Serialize;
use thiserror::Error;

use crate::json_ext::Path;

/// A reason an argument could not be coerced to its declared type.
///
/// Every variant carries the [`Path`] of the value that failed, so an error
/// inside a nested input object or list points at the exact field or element
/// (`input.episodes.1`), not just the argument.
#[derive(Clone, Debug, Display, Error, PartialEq, Serialize)]
#[non_exhaustive]
pub enum CoercionError {
    /// invalid value for '{path}': expected type '{expected}', found {found}
    TypeMismatch {
        /// Position of the value that failed.
        path: Path,
        /// Display form of the declared type.
        expected: String,
        /// Shape of the raw value received.
        found: String,
    },

    /// null value for '{path}': type '{expected}' is not nullable
    NullNotAllowed { path: Path, expected: String },

    /// invalid value '{literal}' for '{path}': expected a member of enum '{ty}' [{valid}]
    InvalidEnumValue {
        /// Position of the value that failed.
        path: Path,
        /// The rejected literal.
        literal: String,
        /// Name of the enum type.
        ty: String,
        /// The declared members, comma separated.
        valid: String,
    },

    /// missing value for required '{path}' of type '{expected}'
    MissingRequiredField { path: Path, expected: String },

    /// value at '{path}' exceeds the maximum input nesting depth ({limit})
    MaxDepthExceeded { path: Path, limit: usize },
}

impl CoercionError {
    /// Machine readable code for this error, stable across message rewording.
    pub const fn code(&self) -> &'static str {
        match self {
            CoercionError::TypeMismatch { .. } => "ARGUMENT_TYPE_MISMATCH",
            CoercionError::NullNotAllowed { .. } => "ARGUMENT_NULL_NOT_ALLOWED",
            CoercionError::InvalidEnumValue { .. } => "ARGUMENT_INVALID_ENUM_VALUE",
            CoercionError::MissingRequiredField { .. } => "ARGUMENT_MISSING_REQUIRED_FIELD",
            CoercionError::MaxDepthExceeded { .. } => "ARGUMENT_MAX_DEPTH_EXCEEDED",
        }
    }

    /// Position of the value that failed coercion.
    pub fn path(&self) -> &Path {
        match self {
            CoercionError::TypeMismatch { path, .. }
            | CoercionError::NullNotAllowed { path, .. }
            | CoercionError::InvalidEnumValue { path, .. }
            | CoercionError::MissingRequiredField { path, .. }
            | CoercionError::MaxDepthExceeded { path, .. } => path,
        }
    }
}
