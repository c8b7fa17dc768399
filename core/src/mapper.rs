//! Typed mapping of normalized vPIC results into records.
//!
//! # Design
//! Each record type declares its fields once in `Record::FIELDS`: the
//! snake-cased key, the kind of value it holds and whether it is required.
//! Mapping is a validation pass over that declaration followed by a plain
//! serde deserialization:
//!
//! 1. `Record::rename_fields` applies the record's own key renames.
//! 2. Undeclared keys are dropped (`UnknownFields::Exclude`) or rejected
//!    (`UnknownFields::Raise`).
//! 3. Declared values are coerced to their kind. `null` counts as absent,
//!    and nested record lists are validated against their own declaration.
//! 4. A required field that is still absent is a `SchemaError`; optional
//!    fields fall back to their serde default.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, SchemaError};

/// What to do with response keys a record does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnknownFields {
    /// Silently drop them. Tolerates new upstream variables.
    #[default]
    Exclude,
    /// Fail with `SchemaError::UnknownField`.
    Raise,
}

impl FromStr for UnknownFields {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXCLUDE" => Ok(UnknownFields::Exclude),
            "RAISE" => Ok(UnknownFields::Raise),
            other => Err(Error::invalid(format!(
                "unknown fields policy must be EXCLUDE or RAISE, got {other:?}"
            ))),
        }
    }
}

/// Validates and normalizes one object in place for a record type.
pub type Prepare = fn(&mut Map<String, Value>, UnknownFields) -> Result<(), SchemaError>;

/// Semantic kind of a declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A string. Numbers and booleans are accepted and rendered as text.
    Text,
    /// An integer. Numeric strings are accepted; empty strings are absent.
    Integer,
    /// A boolean. `"true"` / `"false"` strings are accepted.
    Flag,
    /// A list of nested records.
    Records(Prepare),
    /// A list passed through untouched.
    List,
}

impl FieldKind {
    fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "a text",
            FieldKind::Integer => "an integer",
            FieldKind::Flag => "a boolean",
            FieldKind::Records(_) => "a record list",
            FieldKind::List => "a list",
        }
    }
}

/// One declared field of a record.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A fixed-shape record built from a snake-cased vPIC result.
pub trait Record: DeserializeOwned {
    /// Type name used in errors.
    const NAME: &'static str;

    const FIELDS: &'static [Field];

    /// Record-specific key renames, run before validation.
    fn rename_fields(_fields: &mut Map<String, Value>) {}
}

/// Field kind for a list of `R` records.
pub const fn records<R: Record>() -> FieldKind {
    FieldKind::Records(prepare::<R>)
}

/// Move `from` to `to` when `from` holds a non-null value. `from` is always
/// removed.
pub fn rename_field(fields: &mut Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = fields.remove(from) {
        if !value.is_null() {
            fields.insert(to.to_string(), value);
        }
    }
}

/// Run the validation pass for `R` over one object.
pub fn prepare<R: Record>(
    fields: &mut Map<String, Value>,
    unknown: UnknownFields,
) -> Result<(), SchemaError> {
    R::rename_fields(fields);

    let undeclared: Vec<String> = fields
        .keys()
        .filter(|key| !R::FIELDS.iter().any(|f| f.name == key.as_str()))
        .cloned()
        .collect();
    for key in undeclared {
        match unknown {
            UnknownFields::Raise => {
                return Err(SchemaError::UnknownField {
                    record: R::NAME,
                    field: key,
                })
            }
            UnknownFields::Exclude => {
                tracing::debug!(record = R::NAME, field = %key, "dropping undeclared field");
                fields.remove(&key);
            }
        }
    }

    for field in R::FIELDS {
        if let Some(value) = fields.remove(field.name) {
            if let Some(value) = coerce(R::NAME, field, value, unknown)? {
                fields.insert(field.name.to_string(), value);
            }
        }
        if field.required && !fields.contains_key(field.name) {
            return Err(SchemaError::MissingField {
                record: R::NAME,
                field: field.name,
            });
        }
    }

    Ok(())
}

/// Coerce a present value to the field's kind. `Ok(None)` means absent.
fn coerce(
    record: &'static str,
    field: &Field,
    value: Value,
    unknown: UnknownFields,
) -> Result<Option<Value>, SchemaError> {
    let invalid = |reason: String| SchemaError::InvalidValue {
        record,
        field: field.name,
        reason,
    };

    if value.is_null() {
        return Ok(None);
    }

    let coerced = match (field.kind, value) {
        (FieldKind::Text, text @ Value::String(_)) => text,
        (FieldKind::Text, Value::Number(n)) => Value::String(n.to_string()),
        (FieldKind::Text, Value::Bool(b)) => Value::String(b.to_string()),

        (FieldKind::Integer, Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(_), _) => Value::Number(n),
            (None, Some(f)) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Value::Number(Number::from(f as i64))
            }
            _ => return Err(invalid(format!("expected an integer within i64 range, got {n}"))),
        },
        (FieldKind::Integer, Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            let n: i64 = s
                .parse()
                .map_err(|_| invalid(format!("expected an integer, got {s:?}")))?;
            Value::Number(Number::from(n))
        }

        (FieldKind::Flag, flag @ Value::Bool(_)) => flag,
        (FieldKind::Flag, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => return Err(invalid(format!("expected a boolean, got {other:?}"))),
        },

        (FieldKind::Records(prepare), Value::Array(items)) => {
            let mut prepared = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(mut object) => {
                        prepare(&mut object, unknown)?;
                        prepared.push(Value::Object(object));
                    }
                    other => {
                        return Err(invalid(format!(
                            "expected a list of objects, found {}",
                            json_type(&other)
                        )))
                    }
                }
            }
            Value::Array(prepared)
        }

        (FieldKind::List, list @ Value::Array(_)) => list,

        (kind, other) => {
            return Err(invalid(format!(
                "{} is not valid for {} field",
                json_type(&other),
                kind.describe()
            )))
        }
    };

    Ok(Some(coerced))
}

/// Build one record from a snake-cased object.
pub fn map_record<R: Record>(value: Value, unknown: UnknownFields) -> Result<R, SchemaError> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(SchemaError::NotAnObject {
                record: R::NAME,
                found: json_type(&other),
            })
        }
    };
    prepare::<R>(&mut fields, unknown)?;
    serde_json::from_value(Value::Object(fields))
        .map_err(|source| SchemaError::Deserialize {
            record: R::NAME,
            source,
        })
}

/// Build one record per element of a list, or a single record from an
/// object. Order is preserved; the first failure aborts.
pub fn map_records<R: Record>(value: Value, unknown: UnknownFields) -> Result<Vec<R>, SchemaError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| map_record(item, unknown))
            .collect(),
        other => map_record(other, unknown).map(|record| vec![record]),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Wheel {
        size: String,
        #[serde(default)]
        spare: Option<bool>,
    }

    impl Record for Wheel {
        const NAME: &'static str = "Wheel";
        const FIELDS: &'static [Field] = &[
            Field::required("size", FieldKind::Text),
            Field::optional("spare", FieldKind::Flag),
        ];
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Car {
        id: i64,
        #[serde(default)]
        label: String,
        #[serde(default)]
        wheels: Vec<Wheel>,
    }

    impl Record for Car {
        const NAME: &'static str = "Car";
        const FIELDS: &'static [Field] = &[
            Field::required("id", FieldKind::Integer),
            Field::optional("label", FieldKind::Text),
            Field::optional("wheels", records::<Wheel>()),
        ];

        fn rename_fields(fields: &mut Map<String, Value>) {
            rename_field(fields, "car_id", "id");
        }
    }

    #[test]
    fn missing_optional_field_uses_default() {
        let car: Car = map_record(json!({"id": 1}), UnknownFields::Raise).unwrap();
        assert_eq!(
            car,
            Car {
                id: 1,
                label: String::new(),
                wheels: Vec::new()
            }
        );
    }

    #[test]
    fn missing_required_field_fails() {
        let err = map_record::<Car>(json!({"label": "x"}), UnknownFields::Exclude).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField {
                record: "Car",
                field: "id"
            }
        ));
    }

    #[test]
    fn null_required_field_counts_as_missing() {
        let err = map_record::<Car>(json!({"id": null}), UnknownFields::Exclude).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field: "id", .. }));
    }

    #[test]
    fn unknown_field_is_dropped_under_exclude() {
        let car: Car =
            map_record(json!({"id": 1, "brand_new": "?"}), UnknownFields::Exclude).unwrap();
        assert_eq!(car.id, 1);
    }

    #[test]
    fn unknown_field_fails_under_raise() {
        let err =
            map_record::<Car>(json!({"id": 1, "brand_new": "?"}), UnknownFields::Raise).unwrap_err();
        match err {
            SchemaError::UnknownField { record, field } => {
                assert_eq!(record, "Car");
                assert_eq!(field, "brand_new");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_records_follow_the_same_policy() {
        let input = json!({"id": 1, "wheels": [{"size": "17", "tread": "new"}]});
        let car: Car = map_record(input.clone(), UnknownFields::Exclude).unwrap();
        assert_eq!(
            car.wheels,
            vec![Wheel {
                size: "17".to_string(),
                spare: None
            }]
        );

        let err = map_record::<Car>(input, UnknownFields::Raise).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownField { record: "Wheel", .. }));
    }

    #[test]
    fn nested_required_field_is_enforced() {
        let err = map_record::<Car>(json!({"id": 1, "wheels": [{}]}), UnknownFields::Exclude)
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField {
                record: "Wheel",
                field: "size"
            }
        ));
    }

    #[test]
    fn coercions() {
        let car: Car = map_record(
            json!({"id": " 42 ", "label": 7, "wheels": [{"size": 18, "spare": "TRUE"}]}),
            UnknownFields::Raise,
        )
        .unwrap();
        assert_eq!(car.id, 42);
        assert_eq!(car.label, "7");
        assert_eq!(car.wheels[0].size, "18");
        assert_eq!(car.wheels[0].spare, Some(true));
    }

    #[test]
    fn non_numeric_integer_is_invalid() {
        let err = map_record::<Car>(json!({"id": "abc"}), UnknownFields::Exclude).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { field: "id", .. }));
    }

    #[test]
    fn integral_float_is_an_integer() {
        let car: Car = map_record(json!({"id": 474.0}), UnknownFields::Raise).unwrap();
        assert_eq!(car.id, 474);
    }

    #[test]
    fn fractional_or_oversized_number_is_invalid() {
        for id in [json!(474.5), json!(u64::MAX)] {
            let err = map_record::<Car>(json!({ "id": id }), UnknownFields::Exclude).unwrap_err();
            assert!(matches!(err, SchemaError::InvalidValue { field: "id", .. }));
            assert!(err.to_string().contains("within i64 range"), "{err}");
        }
    }

    #[test]
    fn wrong_json_type_names_the_field_kind() {
        let err = map_record::<Car>(json!({"id": true}), UnknownFields::Exclude).unwrap_err();
        assert!(err.to_string().ends_with("boolean is not valid for an integer field"), "{err}");
    }

    #[test]
    fn nested_list_must_hold_objects() {
        let err = map_record::<Car>(json!({"id": 1, "wheels": ["17"]}), UnknownFields::Exclude)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidValue { field: "wheels", .. }));
    }

    #[test]
    fn rename_runs_before_validation() {
        let car: Car = map_record(json!({"car_id": 9}), UnknownFields::Raise).unwrap();
        assert_eq!(car.id, 9);
    }

    #[test]
    fn rename_skips_null_source() {
        let mut fields = json!({"car_id": null, "id": 3}).as_object().cloned().unwrap();
        rename_field(&mut fields, "car_id", "id");
        assert_eq!(Value::Object(fields), json!({"id": 3}));
    }

    #[test]
    fn scalar_input_is_not_an_object() {
        let err = map_record::<Car>(json!("car"), UnknownFields::Exclude).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::NotAnObject {
                record: "Car",
                found: "a string"
            }
        ));
    }

    #[test]
    fn map_records_accepts_a_list_or_a_single_object() {
        let cars: Vec<Car> =
            map_records(json!([{"id": 1}, {"id": 2}]), UnknownFields::Raise).unwrap();
        assert_eq!(cars.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);

        let cars: Vec<Car> = map_records(json!({"id": 3}), UnknownFields::Raise).unwrap();
        assert_eq!(cars.len(), 1);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("exclude".parse::<UnknownFields>().unwrap(), UnknownFields::Exclude);
        assert_eq!("RAISE".parse::<UnknownFields>().unwrap(), UnknownFields::Raise);
        assert!(matches!(
            "ignore".parse::<UnknownFields>(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
