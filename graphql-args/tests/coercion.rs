//! End-to-end coercion of a review submission signature, the way an
//! invocation layer would drive it.

use std::sync::Arc;

use graphql_args::ArgumentValue;
use graphql_args::Coercer;
use graphql_args::CoercionError;
use graphql_args::EnumType;
use graphql_args::Id;
use graphql_args::InputObjectType;
use graphql_args::InputObjectValue;
use graphql_args::InputType;
use graphql_args::InputValueDefinition;
use graphql_args::RawArguments;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json_bytes::json;
use serde_json_bytes::Value;

fn episode() -> Arc<EnumType> {
    Arc::new(
        EnumType::builder()
            .name("Episode")
            .value("NEWHOPE")
            .value("EMPIRE")
            .value("JEDI")
            .build(),
    )
}

/// `AttachmentInput { name: String!, contentType: String (tri-state), size: Float }`
fn attachment_input() -> Arc<InputObjectType> {
    Arc::new(
        InputObjectType::builder()
            .name("AttachmentInput")
            .field(
                InputValueDefinition::builder()
                    .name("name")
                    .ty(InputType::String.non_null())
                    .build(),
            )
            .field(
                InputValueDefinition::builder()
                    .name("contentType")
                    .ty(InputType::String.optional())
                    .build(),
            )
            .field(
                InputValueDefinition::builder()
                    .name("size")
                    .ty(InputType::Float)
                    .build(),
            )
            .build(),
    )
}

/// `ReviewInput { episode: Episode!, stars: Int!, commentary: String = null,
/// attachments: [AttachmentInput!] = null, product: ID = null }`
fn review_input() -> Arc<InputObjectType> {
    Arc::new(
        InputObjectType::builder()
            .name("ReviewInput")
            .field(
                InputValueDefinition::builder()
                    .name("episode")
                    .ty(InputType::enum_type(episode()).non_null())
                    .build(),
            )
            .field(
                InputValueDefinition::builder()
                    .name("stars")
                    .ty(InputType::Int.non_null())
                    .build(),
            )
            .field(
                InputValueDefinition::builder()
                    .name("commentary")
                    .ty(InputType::String)
                    .default_value(ArgumentValue::Null)
                    .build(),
            )
            .field(
                InputValueDefinition::builder()
                    .name("attachments")
                    .ty(InputType::object(attachment_input()).non_null().list())
                    .default_value(ArgumentValue::Null)
                    .build(),
            )
            .field(
                InputValueDefinition::builder()
                    .name("product")
                    .ty(InputType::Id)
                    .default_value(ArgumentValue::Null)
                    .build(),
            )
            .build(),
    )
}

/// The signature of `submitReview(review: ReviewInput!, draft: Boolean = false)`.
fn submit_review() -> Vec<InputValueDefinition> {
    vec![
        InputValueDefinition::builder()
            .name("review")
            .ty(InputType::object(review_input()).non_null())
            .build(),
        InputValueDefinition::builder()
            .name("draft")
            .ty(InputType::Boolean)
            .default_value(ArgumentValue::Bool(false))
            .build(),
    ]
}

fn coerce_single(ty: InputType, raw: Value) -> Result<ArgumentValue, CoercionError> {
    let mut arguments = RawArguments::new();
    arguments.insert("value", raw);
    Coercer::default().coerce("value", &ty, &arguments)
}

#[test]
fn a_full_review_submission_coerces_end_to_end() {
    let arguments: RawArguments = serde_json::from_str(
        r#"{
            "review": {
                "episode": "EMPIRE",
                "stars": 5,
                "commentary": "one bright spot",
                "attachments": [
                    {"name": "holo.png", "contentType": "image/png", "size": 1.5},
                    {"name": "transcript.txt"}
                ],
                "product": 2001
            }
        }"#,
    )
    .unwrap();

    let coerced = Coercer::default()
        .coerce_arguments(&submit_review(), &arguments)
        .unwrap();

    let expected_review = InputObjectValue::new("ReviewInput")
        .with_field("episode", ArgumentValue::Enum("EMPIRE".to_string()))
        .with_field("stars", 5)
        .with_field("commentary", "one bright spot")
        .with_field(
            "attachments",
            vec![
                ArgumentValue::Object(
                    InputObjectValue::new("AttachmentInput")
                        .with_field("name", "holo.png")
                        .with_field(
                            "contentType",
                            ArgumentValue::defined(ArgumentValue::String(
                                "image/png".to_string(),
                            )),
                        )
                        .with_field("size", 1.5),
                ),
                ArgumentValue::Object(
                    InputObjectValue::new("AttachmentInput")
                        .with_field("name", "transcript.txt")
                        .with_field("contentType", ArgumentValue::undefined())
                        .with_field("size", ArgumentValue::Null),
                ),
            ],
        )
        .with_field("product", Id::new("2001"));

    assert_eq!(
        coerced,
        vec![
            ArgumentValue::Object(expected_review),
            // absent, so the declared default applies
            ArgumentValue::Bool(false),
        ]
    );
}

#[test]
fn failures_deep_in_the_tree_report_the_full_path() {
    let mut arguments = RawArguments::new();
    arguments.insert(
        "review",
        json!({
            "episode": "EMPIRE",
            "stars": 5,
            "attachments": [
                {"name": "holo.png"},
                {"contentType": "text/plain"}
            ]
        }),
    );

    let error = Coercer::default()
        .coerce_arguments(&submit_review(), &arguments)
        .unwrap_err();

    assert_eq!(error.path().to_string(), "review.attachments.1.name");
    assert_eq!(error.code(), "ARGUMENT_MISSING_REQUIRED_FIELD");
    assert_eq!(
        error.to_string(),
        "missing value for required 'review.attachments.1.name' of type 'String!'"
    );
}

#[test]
fn an_unknown_enum_member_reports_the_declared_members() {
    let mut arguments = RawArguments::new();
    arguments.insert(
        "review",
        json!({"episode": "CLONES", "stars": 1}),
    );

    let error = Coercer::default()
        .coerce_arguments(&submit_review(), &arguments)
        .unwrap_err();

    assert_eq!(error.code(), "ARGUMENT_INVALID_ENUM_VALUE");
    assert_eq!(
        error.to_string(),
        "invalid value 'CLONES' for 'review.episode': expected a member of enum 'Episode' [NEWHOPE, EMPIRE, JEDI]"
    );
}

#[test]
fn an_invalid_enum_deep_in_a_list_reports_indices_and_fields() {
    let favorites = Arc::new(
        InputObjectType::builder()
            .name("FavoritesInput")
            .field(
                InputValueDefinition::builder()
                    .name("episodes")
                    .ty(InputType::enum_type(episode()).non_null().list().non_null())
                    .build(),
            )
            .build(),
    );

    let mut arguments = RawArguments::new();
    arguments.insert("favorites", json!({"episodes": ["NEWHOPE", "CLONES"]}));

    let error = Coercer::default()
        .coerce(
            "favorites",
            &InputType::object(favorites).non_null(),
            &arguments,
        )
        .unwrap_err();

    assert_eq!(error.path().to_string(), "favorites.episodes.1");
    assert_eq!(error.code(), "ARGUMENT_INVALID_ENUM_VALUE");
}

#[test]
fn coercion_is_idempotent_over_already_coerced_instances() {
    let mut arguments = RawArguments::new();
    arguments.insert(
        "review",
        json!({
            "episode": "JEDI",
            "stars": 4,
            "attachments": [{"name": "notes.md"}]
        }),
    );
    let ty = InputType::object(review_input()).non_null();
    let coercer = Coercer::default();

    let first = coercer.coerce("review", &ty, &arguments).unwrap();

    let mut replay = RawArguments::new();
    replay.insert("review", first.clone());
    let second = coercer.coerce("review", &ty, &replay).unwrap();

    assert_eq!(second, first);
}

#[test]
fn the_depth_limit_counts_lists_and_objects_alike() {
    let ty = InputType::object(review_input()).non_null();
    let raw = json!({
        "episode": "EMPIRE",
        "stars": 5,
        "attachments": [{"name": "holo.png"}]
    });

    let mut arguments = RawArguments::new();
    arguments.insert("review", raw);

    // the attachment name sits at depth 3: the list, its element, the field
    let strict = Coercer::builder().max_depth(2).build();
    let error = strict.coerce("review", &ty, &arguments).unwrap_err();
    assert_eq!(error.code(), "ARGUMENT_MAX_DEPTH_EXCEEDED");
    assert_eq!(error.path().to_string(), "review.attachments.0.name");

    let relaxed = Coercer::builder().max_depth(3).build();
    assert!(relaxed.coerce("review", &ty, &arguments).is_ok());
}

#[rstest]
#[case::integer(json!(7), ArgumentValue::Int(7))]
#[case::negative(json!(-7), ArgumentValue::Int(-7))]
#[case::i32_max(json!(i32::MAX), ArgumentValue::Int(i32::MAX))]
#[case::i32_min(json!(i32::MIN), ArgumentValue::Int(i32::MIN))]
#[case::numeric_string(json!("42"), ArgumentValue::Int(42))]
#[case::signed_numeric_string(json!("-42"), ArgumentValue::Int(-42))]
fn ints_accept_integers_and_numeric_strings(
    #[case] raw: Value,
    #[case] expected: ArgumentValue,
) {
    assert_eq!(coerce_single(InputType::Int, raw), Ok(expected));
}

#[rstest]
#[case::too_large(json!(i64::from(i32::MAX) + 1))]
#[case::too_small(json!(i64::from(i32::MIN) - 1))]
#[case::fractional(json!(7.5))]
#[case::whole_float(json!(7.0))]
#[case::fractional_string(json!("7.5"))]
#[case::textual(json!("seven"))]
#[case::boolean(json!(true))]
#[case::array(json!([7]))]
fn ints_reject_other_shapes(#[case] raw: Value) {
    let error = coerce_single(InputType::Int, raw).unwrap_err();
    assert!(matches!(error, CoercionError::TypeMismatch { .. }));
}

#[rstest]
#[case::fractional(json!(2.5), ArgumentValue::Float(2.5))]
#[case::integer_widens(json!(3), ArgumentValue::Float(3.0))]
#[case::numeric_string(json!("2.5"), ArgumentValue::Float(2.5))]
#[case::exponent_string(json!("2.5e2"), ArgumentValue::Float(250.0))]
fn floats_accept_numbers_and_numeric_strings(
    #[case] raw: Value,
    #[case] expected: ArgumentValue,
) {
    assert_eq!(coerce_single(InputType::Float, raw), Ok(expected));
}

#[rstest]
#[case::textual(json!("fast"))]
#[case::non_finite_string(json!("NaN"))]
#[case::boolean(json!(false))]
#[case::array(json!([1.5]))]
#[case::object(json!({"value": 1.5}))]
fn floats_reject_other_shapes(#[case] raw: Value) {
    let error = coerce_single(InputType::Float, raw).unwrap_err();
    assert!(matches!(error, CoercionError::TypeMismatch { .. }));
}

#[rstest]
#[case::string_for_boolean(InputType::Boolean, json!("true"))]
#[case::number_for_boolean(InputType::Boolean, json!(1))]
#[case::number_for_string(InputType::String, json!(42))]
#[case::boolean_for_string(InputType::String, json!(true))]
#[case::object_for_string(InputType::String, json!({}))]
fn strict_scalars_reject_lookalikes(#[case] ty: InputType, #[case] raw: Value) {
    let error = coerce_single(ty, raw).unwrap_err();
    assert!(matches!(error, CoercionError::TypeMismatch { .. }));
}
