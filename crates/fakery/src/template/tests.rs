//! Unit tests for record template compilation and generation.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::RngCore;
use rstest::{fixture, rstest};

use super::*;
use crate::error::{BindError, CatalogError};
use crate::random::{RandomSource, SharedRng};
use crate::registry::{ParamType, Registry};

/// Calls made to [`fails_on_third_call`].
static FLAKY_CALLS: AtomicUsize = AtomicUsize::new(0);

fn fails_on_third_call(rng: &mut SharedRng<'_>, _: &Arguments) -> Result<Value, CatalogError> {
    let calls = FLAKY_CALLS.fetch_add(1, Ordering::SeqCst).saturating_add(1);
    if calls == 3 {
        return Err(CatalogError::InvalidRange {
            min: "3".to_owned(),
            max: "1".to_owned(),
        });
    }
    Ok(Value::Int(i64::from(rng.next_u32())))
}

#[fixture]
fn registry() -> Registry {
    Registry::with_catalog()
}

fn ids(value: &Value) -> Vec<i64> {
    value
        .as_list()
        .expect("array output")
        .iter()
        .map(|row| {
            row.as_record()
                .and_then(|record| record.get("id"))
                .and_then(Value::as_i64)
                .expect("id column")
        })
        .collect()
}

fn nest(levels: usize) -> FieldSpec {
    (1..levels).fold(FieldSpec::new("leaf", "digit"), |inner, _| {
        FieldSpec::nested("level", vec![inner])
    })
}

fn untouched(source: &RandomSource, seed: u64) -> bool {
    let fresh = RandomSource::from_seed(seed);
    source.handle().next_u64() == fresh.handle().next_u64()
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(100)]
fn auto_increment_counts_rows_from_one(registry: Registry, #[case] rows: usize) {
    let random = RandomSource::from_seed(1);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::array(
        vec![
            FieldSpec::auto_increment("id"),
            FieldSpec::new("name", "firstname"),
        ],
        rows,
    );

    let value = generator.generate_value(&options).expect("generates");

    let expected: Vec<i64> = (1..=i64::try_from(rows).expect("small")).collect();
    assert_eq!(ids(&value), expected);
}

#[rstest]
fn every_auto_increment_column_counts_rows(registry: Registry) {
    let random = RandomSource::from_seed(1);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::array(
        vec![
            FieldSpec::auto_increment("id"),
            FieldSpec::new("name", "firstname"),
            FieldSpec::auto_increment("seq"),
        ],
        3,
    );

    let document = generator.generate(&options).expect("generates");

    let rows: Vec<serde_json::Value> = serde_json::from_str(&document).expect("json array");
    let pairs: Vec<_> = rows
        .iter()
        .map(|row| {
            (
                row.get("id").and_then(serde_json::Value::as_i64),
                row.get("seq").and_then(serde_json::Value::as_i64),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        [(Some(1), Some(1)), (Some(2), Some(2)), (Some(3), Some(3))]
    );
}

#[rstest]
fn nested_objects_get_their_own_counter(registry: Registry) {
    let random = RandomSource::from_seed(1);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::array(
        vec![
            FieldSpec::auto_increment("id"),
            FieldSpec::nested("inner", vec![FieldSpec::auto_increment("id")]),
        ],
        3,
    );

    let value = generator.generate_value(&options).expect("generates");

    assert_eq!(ids(&value), [1, 2, 3]);
    for row in value.as_list().expect("array") {
        let inner = row
            .as_record()
            .and_then(|record| record.get("inner"))
            .and_then(Value::as_record)
            .expect("nested record");
        assert_eq!(inner.get("id"), Some(&Value::Int(1)));
    }
}

#[rstest]
fn fields_keep_template_order(registry: Registry) {
    let random = RandomSource::from_seed(1);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::object(vec![
        FieldSpec::new("zeta", "word"),
        FieldSpec::new("alpha", "word"),
        FieldSpec::auto_increment("middle"),
    ]);

    let value = generator.generate_value(&options).expect("generates");

    let keys: Vec<_> = value.as_record().expect("object").keys().collect();
    assert_eq!(keys, ["zeta", "alpha", "middle"]);
}

#[rstest]
fn unknown_function_fails_before_any_draw(registry: Registry) {
    let random = RandomSource::from_seed(8);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::array(
        vec![
            FieldSpec::new("first", "firstname"),
            FieldSpec::nested("deep", vec![FieldSpec::new("x", "nosuchfn")]),
        ],
        10,
    );

    let err = generator.generate(&options).expect_err("unknown function");

    assert_eq!(
        err,
        GenerateError::UnknownFunction {
            field: "x".to_owned(),
            function: "nosuchfn".to_owned(),
        }
    );
    assert_eq!(
        err.to_string(),
        "field 'x' references unknown function 'nosuchfn'"
    );
    assert!(untouched(&random, 8));
}

#[rstest]
fn unbindable_parameters_fail_before_any_draw(registry: Registry) {
    let random = RandomSource::from_seed(8);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::object(vec![
        FieldSpec::new("first", "firstname"),
        FieldSpec::new("n", "number").with_param("min", "low"),
    ]);

    let err = generator.generate_value(&options).expect_err("bad parameter");

    assert_eq!(
        err,
        GenerateError::FieldFailed {
            field: "n".to_owned(),
            source: InvokeError::Bind(BindError::Invalid {
                field: "min".to_owned(),
                expected: ParamType::Int,
                value: "low".to_owned(),
            }),
        }
    );
    assert!(untouched(&random, 8));
}

#[rstest]
fn catalog_failure_names_the_field(registry: Registry) {
    let random = RandomSource::from_seed(3);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::array(
        vec![
            FieldSpec::new("first", "firstname"),
            FieldSpec::new("n", "number")
                .with_param("min", "10")
                .with_param("max", "1"),
        ],
        4,
    );

    let err = generator.generate(&options).expect_err("reversed range");

    assert!(matches!(
        &err,
        GenerateError::FieldFailed {
            field,
            source: InvokeError::Catalog(CatalogError::InvalidRange { .. }),
        } if field == "n"
    ));
    assert_eq!(
        err.to_string(),
        "field 'n' failed: minimum 10 is greater than maximum 1"
    );
}

#[rstest]
#[case::top_level(vec![FieldSpec::auto_increment("id"), FieldSpec::new("id", "word")])]
#[case::nested(vec![
    FieldSpec::new("first", "firstname"),
    FieldSpec::nested("inner", vec![FieldSpec::new("w", "word"), FieldSpec::new("w", "digit")]),
])]
fn duplicate_sibling_names_are_rejected(registry: Registry, #[case] fields: Vec<FieldSpec>) {
    let random = RandomSource::from_seed(6);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));

    let err = generator
        .generate(&RecordOptions::array(fields, 4))
        .expect_err("duplicate field");

    assert!(matches!(err, GenerateError::DuplicateField { .. }));
    assert!(err.to_string().ends_with("is declared more than once"));
    assert!(untouched(&random, 6));
}

#[rstest]
fn same_name_in_different_scopes_is_allowed(registry: Registry) {
    let random = RandomSource::from_seed(6);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::object(vec![
        FieldSpec::auto_increment("id"),
        FieldSpec::nested("inner", vec![FieldSpec::auto_increment("id")]),
    ]);

    assert_eq!(
        generator.generate(&options),
        Ok(r#"{"id":1,"inner":{"id":1}}"#.to_owned())
    );
}

#[rstest]
fn a_failing_later_row_discards_the_document(mut registry: Registry) {
    registry.register(Descriptor::new("flaky", "test", "Fails on its third call", fails_on_third_call));
    FLAKY_CALLS.store(0, Ordering::SeqCst);
    let mut random = RandomSource::from_seed(9);
    let options = RecordOptions::array(
        vec![
            FieldSpec::auto_increment("id"),
            FieldSpec::new("value", "flaky"),
        ],
        5,
    );

    let result = RecordGenerator::new(Invoker::new(&registry, &random)).generate(&options);

    assert_eq!(FLAKY_CALLS.load(Ordering::SeqCst), 3, "rows one and two succeeded");
    assert_eq!(
        result,
        Err(GenerateError::FieldFailed {
            field: "value".to_owned(),
            source: InvokeError::Catalog(CatalogError::InvalidRange {
                min: "3".to_owned(),
                max: "1".to_owned(),
            }),
        })
    );

    random.reseed(9);
    let fresh = RandomSource::from_seed(9);
    let retried = RecordGenerator::new(Invoker::new(&registry, &random)).generate(&options);
    let expected = RecordGenerator::new(Invoker::new(&registry, &fresh)).generate(&options);
    assert!(retried.is_ok());
    assert_eq!(retried, expected);
}

#[rstest]
fn zero_row_array_is_rejected(registry: Registry) {
    let random = RandomSource::from_seed(0);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));

    assert_eq!(
        generator.generate(&RecordOptions::array(vec![FieldSpec::new("w", "word")], 0)),
        Err(GenerateError::EmptyRowCount)
    );
}

#[rstest]
fn nesting_is_limited(registry: Registry) {
    let random = RandomSource::from_seed(0);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));

    let deepest = RecordOptions::object(vec![nest(MAX_NESTING_DEPTH)]);
    assert!(generator.generate_value(&deepest).is_ok());

    let too_deep = RecordOptions::object(vec![nest(MAX_NESTING_DEPTH + 1)]);
    assert_eq!(
        generator.generate_value(&too_deep),
        Err(GenerateError::NestingTooDeep {
            field: "level".to_owned(),
            max_depth: MAX_NESTING_DEPTH,
        })
    );
}

#[rstest]
fn indented_output_uses_four_spaces(registry: Registry) {
    let random = RandomSource::from_seed(0);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::array(
        vec![
            FieldSpec::auto_increment("id"),
            FieldSpec::nested("inner", vec![FieldSpec::auto_increment("id")]),
        ],
        1,
    )
    .with_indent(true);

    let document = generator.generate(&options).expect("generates");

    assert_eq!(
        document,
        "[\n    {\n        \"id\": 1,\n        \"inner\": {\n            \"id\": 1\n        }\n    }\n]"
    );
}

#[rstest]
fn compact_output_has_no_whitespace(registry: Registry) {
    let random = RandomSource::from_seed(0);
    let generator = RecordGenerator::new(Invoker::new(&registry, &random));
    let options = RecordOptions::object(vec![
        FieldSpec::auto_increment("id"),
        FieldSpec::new("pin", "numerify").with_param("str", "##"),
    ]);

    let document = generator.generate(&options).expect("generates");

    assert!(document.starts_with(r#"{"id":1,"pin":""#));
    assert!(!document.contains('\n'));
}

#[rstest]
fn indentation_does_not_change_content(registry: Registry) {
    let fields = vec![
        FieldSpec::new("name", "name"),
        FieldSpec::new("address", "address"),
        FieldSpec::new("password", "password"),
    ];
    let compact_source = RandomSource::from_seed(5);
    let pretty_source = RandomSource::from_seed(5);

    let compact = RecordGenerator::new(Invoker::new(&registry, &compact_source))
        .generate(&RecordOptions::array(fields.clone(), 3))
        .expect("compact");
    let pretty = RecordGenerator::new(Invoker::new(&registry, &pretty_source))
        .generate(&RecordOptions::array(fields, 3).with_indent(true))
        .expect("pretty");

    let compact_json: serde_json::Value = serde_json::from_str(&compact).expect("valid json");
    let pretty_json: serde_json::Value = serde_json::from_str(&pretty).expect("valid json");
    assert_eq!(compact_json, pretty_json);
}

#[rstest]
fn same_seed_same_document(registry: Registry) {
    let options = RecordOptions::array(
        vec![
            FieldSpec::auto_increment("id"),
            FieldSpec::new("email", "email"),
            FieldSpec::new("uuid", "uuid"),
        ],
        10,
    );
    let first = RandomSource::from_seed(77);
    let second = RandomSource::from_seed(77);

    assert_eq!(
        RecordGenerator::new(Invoker::new(&registry, &first)).generate(&options),
        RecordGenerator::new(Invoker::new(&registry, &second)).generate(&options),
    );
}
