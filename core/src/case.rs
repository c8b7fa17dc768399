//! Snake-casing of vPIC variable names.
//!
//! The general rule prefixes every run of uppercase letters with `_` and then
//! lowercases the key, so an acronym run stays one token: `ModelYear` becomes
//! `model_year`, `SuggestedVIN` becomes `suggested_vin` and `CAN_AACN` becomes
//! `can_aacn`. A run that swallows the first letter of the next word
//! (`NCSABodyType` -> `ncsabody_type`) is repaired by `COMPOUND_WORDS`.
//! Adding an entry there is how a new mis-split upstream key gets fixed.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+").expect("static regex is valid"));

/// Fragments the general rule leaves glued together, and their repair.
/// Every entry is applied, in order.
pub const COMPOUND_WORDS: &[(&str, &str)] = &[
    ("ncsa", "ncsa_"),
    ("evdrive", "ev_drive"),
    ("sae", "sae_"),
    ("dotcode", "dot_code"),
    ("gcwrfrom", "gcwr_from"),
    ("gvwrfrom", "gvwr_from"),
    ("gcwrto", "gcwr_to"),
    ("gvwrto", "gvwr_to"),
];

const SEPARATOR: char = '_';

/// Snake-case a single key. Applying it to its own output is a no-op.
pub fn snake_case_key(key: &str) -> String {
    let mut new_key = UPPERCASE_RUN
        .replace_all(key, "_${0}")
        .to_lowercase();
    squeeze_separators(&mut new_key);

    if key.starts_with(|c: char| c.is_ascii_uppercase()) && new_key.starts_with(SEPARATOR) {
        new_key.remove(0);
    }

    let ended_with_separator = new_key.ends_with(SEPARATOR);
    for (compound, separated) in COMPOUND_WORDS {
        if new_key.contains(compound) {
            new_key = new_key.replace(compound, separated);
        }
    }
    squeeze_separators(&mut new_key);
    if !ended_with_separator && new_key.ends_with(SEPARATOR) {
        new_key.pop();
    }

    new_key
}

/// Snake-case the keys of one object. Values that are arrays have their
/// object elements transformed too; everything else is passed through.
pub fn snake_case(object: Map<String, Value>) -> Map<String, Value> {
    object
        .into_iter()
        .map(|(key, value)| (snake_case_key(&key), snake_case_value(value)))
        .collect()
}

fn snake_case_value(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(snake_case(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Snake-case a whole `Results` payload: one object or a list of them.
pub fn snake_case_results(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(snake_case(map)),
        array @ Value::Array(_) => snake_case_value(array),
        other => other,
    }
}

/// Collapse runs of `_` into one.
fn squeeze_separators(key: &mut String) {
    let mut previous = None;
    key.retain(|c| {
        let keep = !(c == SEPARATOR && previous == Some(SEPARATOR));
        previous = Some(c);
        keep
    });
}
