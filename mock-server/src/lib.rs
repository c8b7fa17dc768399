//! A local stand-in for the NHTSA vPIC vehicle API.
//!
//! Serves canned results under `/api/vehicles` with vPIC's response envelope
//! and vPIC's error bodies. A few inputs trigger failures on purpose:
//! `THROTTLED_VIN` answers 429, `FAILING_MANUFACTURER` answers 500 with an
//! HTML body, and a non-numeric make id answers 400 the way vPIC reports
//! unbindable parameters. Unknown paths answer 404.

use std::collections::HashMap;

use axum::{
    extract::{Form, Path, Query},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

mod fixtures;

pub const API_PREFIX: &str = "/api/vehicles";

/// VIN that always answers 429 Too Many Requests.
pub const THROTTLED_VIN: &str = "THROTTLED";
pub const RETRY_AFTER_SECS: u64 = 30;

/// Manufacturer whose details always answer 500.
pub const FAILING_MANUFACTURER: &str = "crash";

const DECODED_VIN: &str = "1HGCM82633A004352";
const HONDA_MANUFACTURER_ID: &str = "988";
const HONDA_MAKE_ID: u32 = 474;
const TESLA_MAKE_ID: u32 = 441;
const KNOWN_WMI: &str = "1HG";
const PASSENGER_CAR: &str = "Passenger Car";
const PASSENGER_CAR_ID: u32 = 2;

/// First model year of each canned Tesla model.
const TESLA_MODEL_YEARS: &[(&str, u32)] = &[
    ("Model S", 2012),
    ("Model X", 2016),
    ("Model 3", 2017),
    ("Model Y", 2020),
];

type Params = HashMap<String, String>;

pub fn app() -> Router {
    Router::new()
        .nest(API_PREFIX, vehicles())
        .fallback(no_resource)
}

fn vehicles() -> Router {
    Router::new()
        .route("/DecodeVin/{vin}", get(decode_vin))
        .route("/DecodeVinExtended/{vin}", get(decode_vin))
        .route("/DecodeVinValues/{vin}", get(decode_vin_values))
        .route("/DecodeVinValuesExtended/{vin}", get(decode_vin_values))
        .route("/DecodeVINValuesBatch", post(decode_vin_values_batch))
        .route("/DecodeWMI/{wmi}", get(decode_wmi))
        .route("/GetWMIsForManufacturer", get(wmis_for_vehicle_type))
        .route("/GetWMIsForManufacturer/{manufacturer}", get(wmis_for_manufacturer))
        .route("/GetAllMakes", get(all_makes))
        .route("/GetParts", get(parts))
        .route("/GetAllManufacturers", get(all_manufacturers))
        .route("/GetManufacturerDetails/{manufacturer}", get(manufacturer_details))
        .route("/GetMakeForManufacturer/{manufacturer}", get(makes_for_manufacturer))
        .route(
            "/GetMakesForManufacturerAndYear/{manufacturer}",
            get(makes_for_manufacturer_and_year),
        )
        .route("/GetMakesForVehicleType/{vehicle_type}", get(makes_for_vehicle_type))
        .route("/GetVehicleTypesForMake/{make}", get(vehicle_types_for_make))
        .route("/GetVehicleTypesForMakeId/{make_id}", get(vehicle_types_for_make_id))
        .route("/GetModelsForMake/{make}", get(models_for_make))
        .route("/GetModelsForMakeId/{make_id}", get(models_for_make_id))
        .route("/GetModelsForMakeYear/make/{make}/{*filters}", get(models_for_make_year))
        .route(
            "/GetModelsForMakeIdYear/makeId/{make_id}/{*filters}",
            get(models_for_make_id_year),
        )
        .route("/GetEquipmentPlantCodes", get(equipment_plant_codes))
        .route("/GetVehicleVariableList", get(vehicle_variable_list))
        .route("/GetVehicleVariableValuesList/{variable}", get(vehicle_variable_values_list))
        .route(
            "/GetCanadianVehicleSpecifications",
            get(canadian_vehicle_specifications),
        )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Wrap results in the envelope every vPIC success response uses.
fn envelope(results: Value, search_criteria: Option<String>) -> Response {
    let count = results.as_array().map_or(1, Vec::len);
    Json(json!({
        "Count": count,
        "Message": "Results returned successfully",
        "SearchCriteria": search_criteria,
        "Results": results,
    }))
    .into_response()
}

fn vpic_error(status: StatusCode, message: &str, detail: &str) -> Response {
    (
        status,
        Json(json!({"message": message, "messageDetail": detail})),
    )
        .into_response()
}

/// vPIC's answer when a path parameter cannot be bound to its type.
fn unbindable_parameter(parameter: &str, method: &str) -> Response {
    tracing::debug!(parameter, method, "rejecting unbindable parameter");
    vpic_error(
        StatusCode::BAD_REQUEST,
        "The request is invalid.",
        &format!(
            "The parameters dictionary contains a null entry for parameter '{parameter}' of \
             non-nullable type 'System.Int32' for method '{method}' in \
             'Vpic.Api.Controllers.VehiclesController'. An optional parameter must be a \
             reference type, a nullable type, or be declared as an optional parameter."
        ),
    )
}

async fn no_resource(uri: Uri) -> Response {
    tracing::warn!(%uri, "no vPIC resource");
    vpic_error(
        StatusCode::NOT_FOUND,
        &format!("No HTTP resource was found that matches the request URI '{uri}'."),
        "No action was found on the controller 'Vehicles' that matches the request.",
    )
}

fn throttled() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, RETRY_AFTER_SECS.to_string())],
        Json(json!({"message": "Too many requests. Slow down."})),
    )
        .into_response()
}

fn is_honda(manufacturer: &str) -> bool {
    manufacturer == HONDA_MANUFACTURER_ID || manufacturer.to_ascii_lowercase().contains("honda")
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

/// Decode one VIN. Only `DECODED_VIN` decodes cleanly; any other VIN gets the
/// same variables with a check-digit error.
fn decode(vin: &str, model_year: Option<&str>) -> Value {
    let mut vehicle = fixtures::decode_vin_values();
    if let Value::Object(fields) = &mut vehicle {
        fields.insert("VIN".to_string(), json!(vin));
        if let Some(year) = model_year {
            fields.insert("ModelYear".to_string(), json!(year));
        }
        if vin != DECODED_VIN {
            fields.insert("ErrorCode".to_string(), json!("1"));
            fields.insert(
                "ErrorText".to_string(),
                json!("1 - Check Digit (9th position) does not calculate properly"),
            );
        }
    }
    vehicle
}

async fn decode_vin_values(Path(vin): Path<String>, Query(params): Query<Params>) -> Response {
    if vin.eq_ignore_ascii_case(THROTTLED_VIN) {
        tracing::debug!(%vin, "throttling");
        return throttled();
    }
    let vehicle = decode(&vin, params.get("modelyear").map(String::as_str));
    envelope(json!([vehicle]), Some(format!("VIN:{vin}")))
}

/// The unflattened decode: one object per variable.
async fn decode_vin(Path(vin): Path<String>, Query(params): Query<Params>) -> Response {
    if vin.eq_ignore_ascii_case(THROTTLED_VIN) {
        return throttled();
    }
    let variables: Vec<Value> = match decode(&vin, params.get("modelyear").map(String::as_str)) {
        Value::Object(fields) => fields
            .into_iter()
            .enumerate()
            .map(|(index, (variable, value))| {
                let value = match value {
                    Value::String(text) if text.is_empty() => Value::Null,
                    other => other,
                };
                json!({
                    "Value": value,
                    "ValueId": "",
                    "Variable": variable,
                    "VariableId": index + 1,
                })
            })
            .collect(),
        _ => Vec::new(),
    };
    envelope(Value::Array(variables), Some(format!("VIN:{vin}")))
}

async fn decode_vin_values_batch(Form(form): Form<Params>) -> Response {
    let Some(data) = form.get("DATA") else {
        return vpic_error(
            StatusCode::BAD_REQUEST,
            "The request is invalid.",
            "DATA is required",
        );
    };
    let vehicles: Vec<Value> = data
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(2, ',').map(str::trim);
            let vin = parts.next().unwrap_or_default();
            decode(vin, parts.next())
        })
        .collect();
    envelope(Value::Array(vehicles), None)
}

async fn decode_wmi(Path(wmi): Path<String>) -> Response {
    let results = if wmi.eq_ignore_ascii_case(KNOWN_WMI) {
        json!([fixtures::decode_wmi()])
    } else {
        json!([])
    };
    envelope(results, Some(format!("WMI:{wmi}")))
}

fn filter_wmis(manufacturer: Option<&str>, vehicle_type: Option<&str>) -> Value {
    if manufacturer.is_some_and(|m| !is_honda(m)) {
        return json!([]);
    }
    let wmis = match fixtures::wmis_for_manufacturer() {
        Value::Array(wmis) => wmis,
        other => return other,
    };
    Value::Array(
        wmis.into_iter()
            .filter(|wmi| match vehicle_type {
                Some(vehicle_type) => wmi["VehicleType"]
                    .as_str()
                    .is_some_and(|t| contains_ignore_case(t, vehicle_type)),
                None => true,
            })
            .collect(),
    )
}

async fn wmis_for_vehicle_type(Query(params): Query<Params>) -> Response {
    let vehicle_type = params.get("vehicleType").map(String::as_str);
    envelope(filter_wmis(None, vehicle_type), None)
}

async fn wmis_for_manufacturer(
    Path(manufacturer): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    let vehicle_type = params.get("vehicleType").map(String::as_str);
    envelope(
        filter_wmis(Some(&manufacturer), vehicle_type),
        Some(format!("Manufacturer:{manufacturer}")),
    )
}

async fn all_makes() -> Response {
    envelope(fixtures::all_makes(), None)
}

async fn parts(Query(params): Query<Params>) -> Response {
    let cfr_part = params.get("type").cloned().unwrap_or_default();
    envelope(fixtures::parts(), Some(format!("Type:{cfr_part}")))
}

async fn all_manufacturers(Query(params): Query<Params>) -> Response {
    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let type_matches = params
        .get("ManufacturerType")
        .map_or(true, |t| contains_ignore_case("Completed Vehicle Manufacturer", t));

    let results = if page == 1 && type_matches {
        fixtures::all_manufacturers()
    } else {
        json!([])
    };
    envelope(results, None)
}

async fn manufacturer_details(Path(manufacturer): Path<String>) -> Response {
    if manufacturer.eq_ignore_ascii_case(FAILING_MANUFACTURER) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html><body><h1>Runtime Error</h1></body></html>",
        )
            .into_response();
    }
    let results = if is_honda(&manufacturer) {
        fixtures::manufacturer_details()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Manufacturer:{manufacturer}")))
}

async fn makes_for_manufacturer(Path(manufacturer): Path<String>) -> Response {
    let results = if is_honda(&manufacturer) {
        fixtures::makes_for_manufacturer()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Manufacturer:{manufacturer}")))
}

async fn makes_for_manufacturer_and_year(
    Path(manufacturer): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    let Some(year) = params.get("year").and_then(|y| y.parse::<u32>().ok()) else {
        return unbindable_parameter("year", "GetMakesForManufacturerAndYear(System.String, Int32)");
    };
    let results = if is_honda(&manufacturer) {
        fixtures::makes_for_manufacturer_and_year()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Manufacturer:{manufacturer} | Year:{year}")))
}

async fn makes_for_vehicle_type(Path(vehicle_type): Path<String>) -> Response {
    let results = if contains_ignore_case(PASSENGER_CAR, &vehicle_type) {
        fixtures::makes_for_vehicle_type()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Vehicle Type: {vehicle_type}")))
}

async fn vehicle_types_for_make(Path(make): Path<String>) -> Response {
    let results = if make.eq_ignore_ascii_case("honda") {
        fixtures::vehicle_types_for_make()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Make: {make}")))
}

async fn vehicle_types_for_make_id(Path(make_id): Path<String>) -> Response {
    let Ok(make_id) = make_id.parse::<u32>() else {
        return unbindable_parameter("makeId", "GetVehicleTypesForMakeId(Int32)");
    };
    let results = if make_id == HONDA_MAKE_ID {
        fixtures::vehicle_types_for_make()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Make ID: {make_id}")))
}

async fn models_for_make_id(Path(make_id): Path<String>) -> Response {
    let Ok(make_id) = make_id.parse::<u32>() else {
        return unbindable_parameter("makeId", "GetModelsForMakeId(Int32)");
    };
    let results = if make_id == TESLA_MAKE_ID {
        fixtures::models_for_make()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Make ID: {make_id}")))
}

async fn models_for_make(Path(make): Path<String>) -> Response {
    let results = if make.eq_ignore_ascii_case("tesla") {
        fixtures::models_for_make()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Make:{make}")))
}

/// Model filters from the `modelyear/{y}/vehicletype/{t}` path tail, either
/// part optional. `None` when the tail is not made of known pairs.
fn model_filters(filters: &str) -> Option<(Option<u32>, Option<&str>)> {
    let parts: Vec<&str> = filters.split('/').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() || parts.len() % 2 != 0 {
        return None;
    }
    let mut year = None;
    let mut vehicle_type = None;
    for pair in parts.chunks(2) {
        match pair[0].to_ascii_lowercase().as_str() {
            "modelyear" => year = Some(pair[1].parse().ok()?),
            "vehicletype" => vehicle_type = Some(pair[1]),
            _ => return None,
        }
    }
    Some((year, vehicle_type))
}

/// Canned Tesla models available in `year`. Filtering by vehicle type also
/// reports the type of each model, as vPIC does.
fn filter_models(year: Option<u32>, vehicle_type: Option<&str>) -> Value {
    if vehicle_type.is_some_and(|t| !contains_ignore_case(PASSENGER_CAR, t)) {
        return json!([]);
    }
    let models = match fixtures::models_for_make() {
        Value::Array(models) => models,
        other => return other,
    };
    let in_production = |model: &Value| {
        let first_year = TESLA_MODEL_YEARS
            .iter()
            .find(|(name, _)| model["Model_Name"] == *name)
            .map(|(_, first_year)| *first_year);
        match (year, first_year) {
            (Some(year), Some(first_year)) => first_year <= year,
            _ => true,
        }
    };
    Value::Array(
        models
            .into_iter()
            .filter(in_production)
            .map(|mut model| {
                if let (Some(_), Value::Object(fields)) = (vehicle_type, &mut model) {
                    fields.insert("VehicleTypeId".to_string(), json!(PASSENGER_CAR_ID));
                    fields.insert("VehicleTypeName".to_string(), json!(PASSENGER_CAR));
                }
                model
            })
            .collect(),
    )
}

async fn models_for_make_year(
    Path((make, filters)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    let Some((year, vehicle_type)) = model_filters(&filters) else {
        return no_resource(uri).await;
    };
    let results = if make.eq_ignore_ascii_case("tesla") {
        filter_models(year, vehicle_type)
    } else {
        json!([])
    };
    envelope(results, Some(format!("Make:{make} | {filters}")))
}

async fn models_for_make_id_year(
    Path((make_id, filters)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    let Ok(make_id) = make_id.parse::<u32>() else {
        return unbindable_parameter("makeId", "GetModelsForMakeIdYear(Int32)");
    };
    let Some((year, vehicle_type)) = model_filters(&filters) else {
        return no_resource(uri).await;
    };
    let results = if make_id == TESLA_MAKE_ID {
        filter_models(year, vehicle_type)
    } else {
        json!([])
    };
    envelope(results, Some(format!("Make ID: {make_id} | {filters}")))
}

async fn equipment_plant_codes(Query(params): Query<Params>) -> Response {
    let year = params.get("year").and_then(|y| y.parse::<u32>().ok());
    match year {
        Some(year) if year >= 2016 => envelope(fixtures::equipment_plant_codes(), None),
        _ => vpic_error(
            StatusCode::BAD_REQUEST,
            "The request is invalid.",
            "Year must be 2016 or later",
        ),
    }
}

async fn vehicle_variable_list() -> Response {
    envelope(fixtures::vehicle_variable_list(), None)
}

async fn vehicle_variable_values_list(Path(variable): Path<String>) -> Response {
    let results = if variable == "2" || variable.eq_ignore_ascii_case("battery type") {
        fixtures::vehicle_variable_values_list()
    } else {
        json!([])
    };
    envelope(results, Some(format!("Variable:{variable}")))
}

async fn canadian_vehicle_specifications(Query(params): Query<Params>) -> Response {
    let year = params.get("Year").and_then(|y| y.parse::<u32>().ok());
    let make = params.get("Make").map(String::as_str).unwrap_or_default();
    let model_matches = params
        .get("Model")
        .map_or(true, |m| contains_ignore_case("MDX", m));

    let results = if year == Some(2011) && make.eq_ignore_ascii_case("acura") && model_matches {
        fixtures::canadian_vehicle_specifications()
    } else {
        json!([])
    };
    envelope(results, None)
}
