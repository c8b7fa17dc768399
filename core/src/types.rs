//! Typed vPIC records.
//!
//! Field names are the snake-cased, standardized vPIC variable names. Each
//! record's `FIELDS` is the single source of truth for which keys it accepts;
//! the struct definitions mirror it one to one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mapper::{records, rename_field, Field, FieldKind, Record};

/// A make, as listed by `GetAllMakes` and the `GetMakesFor*` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Make {
    pub make_id: i64,
    pub make: String,
    #[serde(default)]
    pub manufacturer_id: Option<i64>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub vehicle_type_id: Option<i64>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
}

impl Record for Make {
    const NAME: &'static str = "Make";
    const FIELDS: &'static [Field] = &[
        Field::required("make_id", FieldKind::Integer),
        Field::required("make", FieldKind::Text),
        Field::optional("manufacturer_id", FieldKind::Integer),
        Field::optional("manufacturer", FieldKind::Text),
        Field::optional("vehicle_type_id", FieldKind::Integer),
        Field::optional("vehicle_type", FieldKind::Text),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub model_id: i64,
    pub model: String,
    #[serde(default)]
    pub make_id: Option<i64>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub vehicle_type_id: Option<i64>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
}

impl Record for Model {
    const NAME: &'static str = "Model";
    const FIELDS: &'static [Field] = &[
        Field::required("model_id", FieldKind::Integer),
        Field::required("model", FieldKind::Text),
        Field::optional("make_id", FieldKind::Integer),
        Field::optional("make", FieldKind::Text),
        Field::optional("vehicle_type_id", FieldKind::Integer),
        Field::optional("vehicle_type", FieldKind::Text),
    ];
}

/// A vehicle type, either nested in a manufacturer or listed for a make.
///
/// vPIC calls the type's name `Name` when nested and `VehicleTypeName` at
/// the top level; both end up in `vehicle_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleType {
    pub vehicle_type: Option<String>,
    pub vehicle_type_id: Option<i64>,
    pub make: Option<String>,
    pub make_id: Option<i64>,
    pub gvwr_from: Option<String>,
    pub gvwr_to: Option<String>,
    pub is_primary: Option<bool>,
}

impl Record for VehicleType {
    const NAME: &'static str = "VehicleType";
    const FIELDS: &'static [Field] = &[
        Field::optional("vehicle_type", FieldKind::Text),
        Field::optional("vehicle_type_id", FieldKind::Integer),
        Field::optional("make", FieldKind::Text),
        Field::optional("make_id", FieldKind::Integer),
        Field::optional("gvwr_from", FieldKind::Text),
        Field::optional("gvwr_to", FieldKind::Text),
        Field::optional("is_primary", FieldKind::Flag),
    ];

    fn rename_fields(fields: &mut Map<String, Value>) {
        rename_field(fields, "name", "vehicle_type");
    }
}

/// A manufacturer as listed by `GetAllManufacturers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub manufacturer_id: i64,
    pub manufacturer: String,
    #[serde(default)]
    pub manufacturer_common_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub vehicle_types: Vec<VehicleType>,
}

impl Record for Manufacturer {
    const NAME: &'static str = "Manufacturer";
    const FIELDS: &'static [Field] = &[
        Field::required("manufacturer_id", FieldKind::Integer),
        Field::required("manufacturer", FieldKind::Text),
        Field::optional("manufacturer_common_name", FieldKind::Text),
        Field::optional("country", FieldKind::Text),
        Field::optional("vehicle_types", records::<VehicleType>()),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerType {
    pub name: String,
}

impl Record for ManufacturerType {
    const NAME: &'static str = "ManufacturerType";
    const FIELDS: &'static [Field] = &[Field::required("name", FieldKind::Text)];
}

/// Everything `GetManufacturerDetails` reports about one manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerDetail {
    pub manufacturer_id: i64,
    pub manufacturer: String,
    #[serde(default)]
    pub manufacturer_common_name: Option<String>,
    pub manufacturer_types: Vec<ManufacturerType>,
    pub vehicle_types: Vec<VehicleType>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_fax: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub dbas: Option<String>,
    #[serde(default)]
    pub equipment_items: Vec<Value>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub other_manufacturer_details: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub primary_product: Option<String>,
    #[serde(default)]
    pub principal_first_name: Option<String>,
    #[serde(default)]
    pub principal_last_name: Option<String>,
    #[serde(default)]
    pub principal_position: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub submitted_name: Option<String>,
    #[serde(default)]
    pub submitted_on: Option<String>,
    #[serde(default)]
    pub submitted_position: Option<String>,
}

impl Record for ManufacturerDetail {
    const NAME: &'static str = "ManufacturerDetail";
    const FIELDS: &'static [Field] = &[
        Field::required("manufacturer_id", FieldKind::Integer),
        Field::required("manufacturer", FieldKind::Text),
        Field::optional("manufacturer_common_name", FieldKind::Text),
        Field::required("manufacturer_types", records::<ManufacturerType>()),
        Field::required("vehicle_types", records::<VehicleType>()),
        Field::optional("address", FieldKind::Text),
        Field::optional("address2", FieldKind::Text),
        Field::optional("city", FieldKind::Text),
        Field::optional("contact_email", FieldKind::Text),
        Field::optional("contact_fax", FieldKind::Text),
        Field::optional("contact_phone", FieldKind::Text),
        Field::optional("country", FieldKind::Text),
        Field::optional("dbas", FieldKind::Text),
        Field::optional("equipment_items", FieldKind::List),
        Field::optional("last_updated", FieldKind::Text),
        Field::optional("other_manufacturer_details", FieldKind::Text),
        Field::optional("postal_code", FieldKind::Text),
        Field::optional("primary_product", FieldKind::Text),
        Field::optional("principal_first_name", FieldKind::Text),
        Field::optional("principal_last_name", FieldKind::Text),
        Field::optional("principal_position", FieldKind::Text),
        Field::optional("state_province", FieldKind::Text),
        Field::optional("submitted_name", FieldKind::Text),
        Field::optional("submitted_on", FieldKind::Text),
        Field::optional("submitted_position", FieldKind::Text),
    ];
}

/// A World Manufacturer Identifier, from `DecodeWMI` or
/// `GetWMIsForManufacturer`. The two endpoints report different subsets,
/// hence the many optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldManufacturerIndex {
    #[serde(default)]
    pub wmi: Option<String>,
    #[serde(default)]
    pub manufacturer_id: Option<i64>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    pub vehicle_type: String,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub date_available_to_public: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub parent_company_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl Record for WorldManufacturerIndex {
    const NAME: &'static str = "WorldManufacturerIndex";
    const FIELDS: &'static [Field] = &[
        Field::optional("wmi", FieldKind::Text),
        Field::optional("manufacturer_id", FieldKind::Integer),
        Field::optional("manufacturer", FieldKind::Text),
        Field::required("vehicle_type", FieldKind::Text),
        Field::optional("created_on", FieldKind::Text),
        Field::optional("date_available_to_public", FieldKind::Text),
        Field::optional("updated_on", FieldKind::Text),
        Field::optional("common_name", FieldKind::Text),
        Field::optional("make", FieldKind::Text),
        Field::optional("parent_company_name", FieldKind::Text),
        Field::optional("url", FieldKind::Text),
        Field::optional("country", FieldKind::Text),
    ];

    // GetWMIsForManufacturer reports the manufacturer as a bare Id and Name.
    fn rename_fields(fields: &mut Map<String, Value>) {
        rename_field(fields, "id", "manufacturer_id");
        rename_field(fields, "name", "manufacturer");
    }
}

/// A decodable vehicle variable, from `GetVehicleVariableList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub group_name: Option<String>,
    pub data_type: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Variable {
    const NAME: &'static str = "Variable";
    const FIELDS: &'static [Field] = &[
        Field::required("id", FieldKind::Integer),
        Field::required("name", FieldKind::Text),
        Field::optional("group_name", FieldKind::Text),
        Field::required("data_type", FieldKind::Text),
        Field::optional("description", FieldKind::Text),
    ];
}

/// One accepted value of a lookup variable, from
/// `GetVehicleVariableValuesList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValue {
    pub element_name: String,
    pub id: i64,
    pub name: String,
}

impl Record for VariableValue {
    const NAME: &'static str = "VariableValue";
    const FIELDS: &'static [Field] = &[
        Field::required("element_name", FieldKind::Text),
        Field::required("id", FieldKind::Integer),
        Field::required("name", FieldKind::Text),
    ];
}

/// An equipment plant and its DOT code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantCode {
    pub dot_code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub old_dot_code: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Record for PlantCode {
    const NAME: &'static str = "PlantCode";
    const FIELDS: &'static [Field] = &[
        Field::required("dot_code", FieldKind::Text),
        Field::required("name", FieldKind::Text),
        Field::optional("address", FieldKind::Text),
        Field::optional("city", FieldKind::Text),
        Field::optional("country", FieldKind::Text),
        Field::optional("old_dot_code", FieldKind::Text),
        Field::optional("postal_code", FieldKind::Text),
        Field::optional("state_province", FieldKind::Text),
        Field::optional("status", FieldKind::Text),
    ];
}

/// A manufacturer-submitted document, from `GetParts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub cover_letter_url: String,
    pub letter_date: String,
    pub manufacturer_id: i64,
    pub manufacturer: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub model_year_from: Option<String>,
    #[serde(default)]
    pub model_year_to: Option<String>,
}

impl Record for Document {
    const NAME: &'static str = "Document";
    const FIELDS: &'static [Field] = &[
        Field::required("cover_letter_url", FieldKind::Text),
        Field::required("letter_date", FieldKind::Text),
        Field::required("manufacturer_id", FieldKind::Integer),
        Field::required("manufacturer", FieldKind::Text),
        Field::required("name", FieldKind::Text),
        Field::required("url", FieldKind::Text),
        Field::optional("type", FieldKind::Text),
        Field::optional("model_year_from", FieldKind::Text),
        Field::optional("model_year_to", FieldKind::Text),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::snake_case_results;
    use crate::error::SchemaError;
    use crate::mapper::{map_record, map_records, UnknownFields};
    use crate::standardize::standardize;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn normalize(raw: Value) -> Value {
        snake_case_results(standardize(raw))
    }

    #[test]
    fn honda_manufacturer_end_to_end() {
        let raw = json!({
            "Country": "UNITED STATES (USA)",
            "Mfr_CommonName": "Honda",
            "Mfr_ID": 988,
            "Mfr_Name": "HONDA DEVELOPMENT & MANUFACTURING OF AMERICA, LLC",
            "VehicleTypes": [
                {"IsPrimary": true, "Name": "Passenger Car"},
                {"IsPrimary": false, "Name": "Multipurpose Passenger Vehicle (MPV)"}
            ]
        });
        let manufacturer: Manufacturer =
            map_record(normalize(raw), UnknownFields::Raise).unwrap();
        assert_eq!(
            manufacturer,
            Manufacturer {
                manufacturer_id: 988,
                manufacturer: "HONDA DEVELOPMENT & MANUFACTURING OF AMERICA, LLC".to_string(),
                manufacturer_common_name: Some("Honda".to_string()),
                country: Some("UNITED STATES (USA)".to_string()),
                vehicle_types: vec![
                    VehicleType {
                        vehicle_type: Some("Passenger Car".to_string()),
                        is_primary: Some(true),
                        ..VehicleType::default()
                    },
                    VehicleType {
                        vehicle_type: Some("Multipurpose Passenger Vehicle (MPV)".to_string()),
                        is_primary: Some(false),
                        ..VehicleType::default()
                    },
                ],
            }
        );
    }

    #[test]
    fn vehicle_type_name_becomes_vehicle_type() {
        let vt: VehicleType =
            map_record(json!({"name": "Truck "}), UnknownFields::Raise).unwrap();
        assert_eq!(vt.vehicle_type.as_deref(), Some("Truck "));
    }

    #[test]
    fn top_level_vehicle_type_name_is_standardized() {
        let raw = json!([{"MakeId": 474, "MakeName": "HONDA", "VehicleTypeId": 2, "VehicleTypeName": "Passenger Car"}]);
        let types: Vec<VehicleType> = map_records(normalize(raw), UnknownFields::Raise).unwrap();
        assert_eq!(
            types,
            vec![VehicleType {
                vehicle_type: Some("Passenger Car".to_string()),
                vehicle_type_id: Some(2),
                make: Some("HONDA".to_string()),
                make_id: Some(474),
                ..VehicleType::default()
            }]
        );
    }

    #[test]
    fn wmi_from_manufacturer_listing_renames_id_and_name() {
        let raw = json!({
            "Country": null,
            "CreatedOn": "2015-03-26",
            "DateAvailableToPublic": "2015-01-01",
            "Id": 988,
            "Name": "HONDA DEVELOPMENT & MANUFACTURING OF AMERICA, LLC",
            "UpdatedOn": null,
            "VehicleType": "Passenger Car",
            "WMI": "1HG"
        });
        let wmi: WorldManufacturerIndex = map_record(normalize(raw), UnknownFields::Raise).unwrap();
        assert_eq!(wmi.wmi.as_deref(), Some("1HG"));
        assert_eq!(wmi.manufacturer_id, Some(988));
        assert_eq!(
            wmi.manufacturer.as_deref(),
            Some("HONDA DEVELOPMENT & MANUFACTURING OF AMERICA, LLC")
        );
        assert_eq!(wmi.country, None);
        assert_eq!(wmi.common_name, "");
    }

    #[test]
    fn decoded_wmi_keeps_manufacturer_name() {
        let raw = json!({
            "CommonName": "Honda",
            "CreatedOn": "2015-03-26",
            "DateAvailableToPublic": "2015-01-01",
            "Make": "HONDA",
            "ManufacturerName": "HONDA DEVELOPMENT & MANUFACTURING OF AMERICA, LLC",
            "ParentCompanyName": "",
            "URL": "http://www.honda.com",
            "UpdatedOn": null,
            "VehicleType": "Passenger Car"
        });
        let wmi: WorldManufacturerIndex = map_record(normalize(raw), UnknownFields::Raise).unwrap();
        assert_eq!(wmi.wmi, None);
        assert_eq!(wmi.make, "HONDA");
        assert_eq!(wmi.url, "http://www.honda.com");
        assert_eq!(wmi.vehicle_type, "Passenger Car");
    }

    #[test]
    fn document_type_keyword_field() {
        let raw = json!({
            "CoverLetterURL": "https://vpic.nhtsa.dot.gov/mid/home/displayfile/1",
            "LetterDate": "1/1/2015",
            "ManufacturerId": 959,
            "ManufacturerName": "MERCEDES-BENZ AG",
            "ModelYearFrom": null,
            "ModelYearTo": null,
            "Name": "ORG1234.pdf",
            "Type": "565 Document",
            "URL": "https://vpic.nhtsa.dot.gov/mid/home/displayfile/2"
        });
        let doc: Document = map_record(normalize(raw), UnknownFields::Raise).unwrap();
        assert_eq!(doc.document_type.as_deref(), Some("565 Document"));
        assert_eq!(doc.manufacturer, "MERCEDES-BENZ AG");
        assert_eq!(doc.model_year_from, None);
    }

    #[test]
    fn manufacturer_detail_requires_nested_lists() {
        let raw = json!({"Mfr_ID": 988, "Mfr_Name": "HONDA", "VehicleTypes": []});
        let err = map_record::<ManufacturerDetail>(normalize(raw), UnknownFields::Exclude)
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField { field: "manufacturer_types", .. }
        ));
    }

    #[test]
    fn plant_code_dot_code() {
        let raw = json!({"DOTCode": "001", "Name": "Plant", "OldDotCode": "", "Status": "Active"});
        let plant: PlantCode = map_record(normalize(raw), UnknownFields::Raise).unwrap();
        assert_eq!(plant.dot_code, "001");
        assert_eq!(plant.old_dot_code.as_deref(), Some(""));
    }
}
