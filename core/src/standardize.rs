//! Variable-name standardization.
//!
//! vPIC names the same variable differently depending on the endpoint
//! (`Mfr_ID`, `MfrId` and `ManufacturerId` are one concept). Every key found in
//! `STANDARD_VARIABLE_NAMES` is rewritten to its canonical name, at any depth.
//! Unlisted keys pass through untouched so new upstream variables never break
//! a caller; a missing entry here is a data bug, not a crash.

use serde_json::{Map, Value};

/// Upstream key to canonical key. Canonical names use the newer vPIC
/// convention (`Make`, `Manufacturer`, `Model`), not `MakeName` and friends.
pub const STANDARD_VARIABLE_NAMES: &[(&str, &str)] = &[
    ("ID", "Id"),
    ("GCWR", "GCWRFrom"),
    ("GCWR_to", "GCWRTo"),
    ("GVWR", "GVWRFrom"),
    ("GVWR_to", "GVWRTo"),
    ("Make_ID", "MakeId"),
    ("MakeID", "MakeId"),
    ("Make_Name", "Make"),
    ("MakeName", "Make"),
    ("Mfr_CommonName", "ManufacturerCommonName"),
    ("Mfr_ID", "ManufacturerId"),
    ("MfrId", "ManufacturerId"),
    ("Mfr_Name", "Manufacturer"),
    ("MfrName", "Manufacturer"),
    ("ManufacturerName", "Manufacturer"),
    ("Model_ID", "ModelId"),
    ("ModelID", "ModelId"),
    ("Model_Name", "Model"),
    ("ModelName", "Model"),
    ("VehicleTypeName", "VehicleType"),
];

/// Canonical name for `key`, or `key` itself when it is not in the table.
pub fn standard_name(key: &str) -> &str {
    STANDARD_VARIABLE_NAMES
        .iter()
        .find(|(upstream, _)| *upstream == key)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(key)
}

/// Rewrite every key of `value` (recursively through objects and arrays) to
/// its canonical name. Array order is preserved; scalars are returned as is.
pub fn standardize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(standardize_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(standardize).collect()),
        other => other,
    }
}

fn standardize_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (standard_name(&key).to_string(), standardize(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn manufacturer_id_variants_share_one_name() {
        for key in ["Mfr_ID", "MfrId", "ManufacturerId"] {
            assert_eq!(standard_name(key), "ManufacturerId", "{key}");
        }
    }

    #[test]
    fn manufacturer_name_variants_share_one_name() {
        for key in ["Mfr_Name", "MfrName", "ManufacturerName", "Manufacturer"] {
            assert_eq!(standard_name(key), "Manufacturer", "{key}");
        }
    }

    #[test]
    fn make_and_model_variants() {
        for key in ["Make_ID", "MakeID", "MakeId"] {
            assert_eq!(standard_name(key), "MakeId");
        }
        for key in ["Make_Name", "MakeName"] {
            assert_eq!(standard_name(key), "Make");
        }
        for key in ["Model_ID", "ModelID"] {
            assert_eq!(standard_name(key), "ModelId");
        }
        for key in ["Model_Name", "ModelName"] {
            assert_eq!(standard_name(key), "Model");
        }
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert_eq!(standard_name("BrandNewVariable"), "BrandNewVariable");
        assert_eq!(standard_name("Mfr_Id"), "Mfr_Id");
    }

    #[test]
    fn table_has_no_duplicate_upstream_keys() {
        let mut keys: Vec<&str> = STANDARD_VARIABLE_NAMES.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn standardizes_a_manufacturer() {
        let raw = json!({"Mfr_ID": 988, "Mfr_Name": "HONDA OF AMERICA MFG., INC.", "Mfr_CommonName": "Honda"});
        assert_eq!(
            standardize(raw),
            json!({
                "ManufacturerId": 988,
                "Manufacturer": "HONDA OF AMERICA MFG., INC.",
                "ManufacturerCommonName": "Honda"
            })
        );
    }

    #[test]
    fn recurses_into_lists_and_nested_objects() {
        let raw = json!([
            {"Make_ID": 440, "Make_Name": "ASTON MARTIN"},
            {"Mfr_ID": 955, "VehicleTypes": [{"VehicleTypeName": "Truck ", "GVWR": "Class 1"}]},
            {"Nested": {"Model_ID": 1685}}
        ]);
        assert_eq!(
            standardize(raw),
            json!([
                {"MakeId": 440, "Make": "ASTON MARTIN"},
                {"ManufacturerId": 955, "VehicleTypes": [{"VehicleType": "Truck ", "GVWRFrom": "Class 1"}]},
                {"Nested": {"ModelId": 1685}}
            ])
        );
    }

    #[test]
    fn scalars_are_untouched() {
        assert_eq!(standardize(json!("Mfr_ID")), json!("Mfr_ID"));
        assert_eq!(standardize(json!(42)), json!(42));
        assert_eq!(standardize(Value::Null), Value::Null);
    }
}
