//! Coercion of raw GraphQL request arguments into typed resolver inputs.
//!
//! A decoded request hands its arguments over as an untyped JSON-shaped bag.
//! This crate walks those raw values against declared input types: non-null
//! markers, lists, input objects, enums, identifiers, scalars and the
//! tri-state optional wrapper that keeps "omitted" distinguishable from
//! "set to null". It produces values ready to invoke the target operation,
//! or an error naming the exact nested position that failed.
//!
//! ```
//! use graphql_args::ArgumentValue;
//! use graphql_args::Coercer;
//! use graphql_args::EnumType;
//! use graphql_args::InputType;
//! use graphql_args::RawArguments;
//! use serde_json_bytes::json;
//!
//! let episode = EnumType::builder()
//!     .name("Episode")
//!     .value("NEWHOPE")
//!     .value("EMPIRE")
//!     .value("JEDI")
//!     .build();
//! let ty = InputType::enum_type(episode).non_null().list();
//!
//! let mut arguments = RawArguments::new();
//! arguments.insert("episodes", json!(["NEWHOPE", "EMPIRE"]));
//!
//! let coerced = Coercer::default().coerce("episodes", &ty, &arguments)?;
//! assert_eq!(
//!     coerced,
//!     ArgumentValue::List(vec![
//!         ArgumentValue::Enum("NEWHOPE".to_string()),
//!         ArgumentValue::Enum("EMPIRE".to_string()),
//!     ])
//! );
//! # Ok::<(), graphql_args::CoercionError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(unreachable_pub)]

pub mod json_ext;

mod arguments;
mod coercion;
mod error;
mod input_type;
mod value;

pub use arguments::RawArgument;
pub use arguments::RawArguments;
pub use coercion::Coercer;
pub use error::CoercionError;
pub use input_type::EnumType;
pub use input_type::InputObjectType;
pub use input_type::InputType;
pub use input_type::InputValueDefinition;
pub use value::ArgumentValue;
pub use value::Id;
pub use value::InputObjectValue;
pub use value::OptionalValue;
