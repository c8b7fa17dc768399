//! Stateless HTTP request builder and response parser for the vPIC API.
//!
//! # Design
//! `VpicClient` holds only the parsed host URL and the standardization
//! toggle. Each endpoint is a `build_*` method that validates its arguments
//! and produces an `HttpRequest`. Every vPIC endpoint answers with the same
//! envelope, so parsing is shared: `parse_results` for list endpoints and
//! `parse_first` for the two endpoints that describe a single object
//! (`DecodeVinValues`, `DecodeWMI`). The caller executes the round-trip in
//! between.

use serde::Deserialize;
use serde_json::Value;
use url::form_urlencoded;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::{BatchVin, EquipmentType, NameOrId, ReportType, Units};
use crate::standardize::standardize;

const MIN_VIN_LEN: usize = 6;
const MAX_VIN_LEN: usize = 17;
const MIN_MODEL_YEAR: u16 = 1981;
const MAX_BATCH_VINS: usize = 50;
const MIN_PLANT_CODE_YEAR: u16 = 2016;
const MIN_CANADIAN_SPEC_YEAR: u16 = 1971;

/// The body of every successful vPIC response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope {
    count: Option<u64>,
    message: Option<String>,
    results: Option<Value>,
}

/// Synchronous, stateless client for the vPIC API returning JSON values.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Use `TypedClient` to get records instead.
#[derive(Debug, Clone)]
pub struct VpicClient {
    host: Url,
    standardize_variable_names: bool,
}

impl VpicClient {
    /// A client for `host` with variable-name standardization on.
    pub fn new(host: &str) -> Result<Self> {
        let host = Url::parse(host.trim())?;
        if host.cannot_be_a_base() {
            return Err(Error::invalid(format!("host {host} cannot carry a path")));
        }
        Ok(Self {
            host,
            standardize_variable_names: true,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(&config.host)?
            .with_standardize_variable_names(config.standardize_variable_names))
    }

    pub fn with_standardize_variable_names(mut self, standardize: bool) -> Self {
        self.standardize_variable_names = standardize;
        self
    }

    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    pub fn standardizes_variable_names(&self) -> bool {
        self.standardize_variable_names
    }

    /// Decode a complete or partial VIN into flat key-value variables.
    ///
    /// Use `*` for unknown characters of a partial VIN. `extend` adds the
    /// variables of other NHTSA programs such as NCSA.
    pub fn build_decode_vin(
        &self,
        vin: &str,
        model_year: Option<u16>,
        extend: bool,
    ) -> Result<HttpRequest> {
        self.build_vin_request("DecodeVinValues", vin, model_year, extend)
    }

    /// Like `build_decode_vin`, but vPIC answers with one object per
    /// variable (`Variable`, `VariableId`, `Value`, `ValueId`).
    pub fn build_decode_vin_variables(
        &self,
        vin: &str,
        model_year: Option<u16>,
        extend: bool,
    ) -> Result<HttpRequest> {
        self.build_vin_request("DecodeVin", vin, model_year, extend)
    }

    fn build_vin_request(
        &self,
        endpoint: &str,
        vin: &str,
        model_year: Option<u16>,
        extend: bool,
    ) -> Result<HttpRequest> {
        validate_vin(vin)?;
        if let Some(year) = model_year {
            validate_model_year(year)?;
        }

        let endpoint = if extend {
            format!("{endpoint}Extended")
        } else {
            endpoint.to_string()
        };
        let query: Vec<(&str, String)> = model_year
            .map(|year| ("modelyear", year.to_string()))
            .into_iter()
            .collect();

        self.get(&[endpoint.as_str(), vin], &query)
    }

    /// Decode up to 50 VINs in one POST.
    pub fn build_decode_vin_batch(&self, vins: &[BatchVin]) -> Result<HttpRequest> {
        if vins.is_empty() || vins.len() > MAX_BATCH_VINS {
            return Err(Error::invalid(format!(
                "pass at least one VIN, and at most {MAX_BATCH_VINS} VINs"
            )));
        }
        for entry in vins {
            validate_vin(&entry.vin)?;
            if let Some(year) = entry.model_year {
                validate_model_year(year)?;
            }
        }

        let data = vins
            .iter()
            .map(BatchVin::to_string)
            .collect::<Vec<_>>()
            .join(";");
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("DATA", &data)
            .finish();

        let url = self.url(&["DecodeVINValuesBatch"], &[])?;
        tracing::debug!(%url, vins = vins.len(), "built vPIC batch request");

        let mut headers = default_headers();
        headers.push((
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers,
            body: Some(body),
        })
    }

    /// Describe a World Manufacturer Identifier. Large manufacturers use
    /// 3 characters (VIN positions 1 to 3), small ones 6 (positions 1 to 3
    /// and 12 to 14).
    pub fn build_decode_wmi(&self, wmi: &str) -> Result<HttpRequest> {
        if !matches!(wmi.chars().count(), 3 | 6) {
            return Err(Error::invalid("WMI must be 3 or 6 characters"));
        }
        self.get(&["DecodeWMI", wmi], &[])
    }

    /// WMIs assigned to a manufacturer, a vehicle type, or both.
    pub fn build_wmis_for_manufacturer(
        &self,
        manufacturer: Option<NameOrId>,
        vehicle_type: Option<NameOrId>,
    ) -> Result<HttpRequest> {
        if manufacturer.is_none() && vehicle_type.is_none() {
            return Err(Error::invalid("manufacturer or vehicle_type is required"));
        }

        let mut segments = vec!["GetWMIsForManufacturer".to_string()];
        if let Some(manufacturer) = &manufacturer {
            manufacturer.validate("manufacturer")?;
            segments.push(manufacturer.to_string());
        }
        let mut query = Vec::new();
        if let Some(vehicle_type) = &vehicle_type {
            vehicle_type.validate("vehicle_type")?;
            query.push(("vehicleType", vehicle_type.to_string()));
        }

        self.get(&segments, &query)
    }

    pub fn build_all_makes(&self) -> Result<HttpRequest> {
        self.get(&["GetAllMakes"], &[])
    }

    /// Documents filed under 49 CFR Part 565 or 566 in a date range, up to
    /// 1,000 per page.
    pub fn build_parts(
        &self,
        cfr_part: &str,
        from_date: &str,
        to_date: &str,
        page: u32,
    ) -> Result<HttpRequest> {
        if cfr_part.trim().is_empty() {
            return Err(Error::invalid("cfr_part is required"));
        }
        let query = [
            ("type", cfr_part.to_string()),
            ("fromDate", from_date.to_string()),
            ("toDate", to_date.to_string()),
            ("page", page.to_string()),
        ];
        self.get(&["GetParts"], &query)
    }

    /// All manufacturers, optionally filtered by (partial) manufacturer type.
    pub fn build_all_manufacturers(
        &self,
        manufacturer_type: Option<&str>,
        page: u32,
    ) -> Result<HttpRequest> {
        let mut query = Vec::new();
        if let Some(manufacturer_type) = manufacturer_type {
            query.push(("ManufacturerType", manufacturer_type.to_string()));
        }
        query.push(("page", page.to_string()));
        self.get(&["GetAllManufacturers"], &query)
    }

    pub fn build_manufacturer_details(
        &self,
        manufacturer: impl Into<NameOrId>,
    ) -> Result<HttpRequest> {
        let manufacturer = manufacturer.into();
        manufacturer.validate("manufacturer")?;
        self.get(&["GetManufacturerDetails".to_string(), manufacturer.to_string()], &[])
    }

    /// Makes of a manufacturer, optionally restricted to one model year.
    pub fn build_makes_for_manufacturer(
        &self,
        manufacturer: impl Into<NameOrId>,
        model_year: Option<u16>,
    ) -> Result<HttpRequest> {
        let manufacturer = manufacturer.into();
        manufacturer.validate("manufacturer")?;
        let manufacturer = manufacturer.to_string();

        match model_year {
            Some(year) => self.get(
                &["GetMakesForManufacturerAndYear", manufacturer.as_str()],
                &[("year", year.to_string())],
            ),
            None => self.get(&["GetMakeForManufacturer", manufacturer.as_str()], &[]),
        }
    }

    /// Makes for a vehicle type such as "Passenger Car". Partial names and
    /// any letter case match.
    pub fn build_makes_for_vehicle_type(&self, vehicle_type: &str) -> Result<HttpRequest> {
        if vehicle_type.trim().is_empty() {
            return Err(Error::invalid("vehicle_type is required"));
        }
        self.get(&["GetMakesForVehicleType", vehicle_type], &[])
    }

    pub fn build_vehicle_types_for_make(&self, make: impl Into<NameOrId>) -> Result<HttpRequest> {
        let make = make.into();
        make.validate("make")?;
        match &make {
            NameOrId::Id(id) => self.get(&["GetVehicleTypesForMakeId".to_string(), id.to_string()], &[]),
            NameOrId::Name(name) => self.get(&["GetVehicleTypesForMake", name.as_str()], &[]),
        }
    }

    /// Plants that make `equipment_type`, identified by their DOT code.
    pub fn build_equipment_plant_codes(
        &self,
        year: u16,
        equipment_type: EquipmentType,
        report_type: ReportType,
    ) -> Result<HttpRequest> {
        if year < MIN_PLANT_CODE_YEAR {
            return Err(Error::invalid(format!(
                "year must be {MIN_PLANT_CODE_YEAR} or later"
            )));
        }
        let query = [
            ("year", year.to_string()),
            ("equipmentType", equipment_type.code().to_string()),
            ("reportType", report_type.as_str().to_string()),
        ];
        self.get(&["GetEquipmentPlantCodes"], &query)
    }

    /// Models of a make, optionally filtered by model year and vehicle type.
    /// vPIC only reports the vehicle type of each model when filtering by it.
    pub fn build_models_for_make(
        &self,
        make: impl Into<NameOrId>,
        model_year: Option<u16>,
        vehicle_type: Option<&str>,
    ) -> Result<HttpRequest> {
        let make = make.into();
        make.validate("make")?;

        if model_year.is_none() && vehicle_type.is_none() {
            return match &make {
                NameOrId::Id(id) => self.get(&["GetModelsForMakeId".to_string(), id.to_string()], &[]),
                NameOrId::Name(name) => self.get(&["GetModelsForMake", name.as_str()], &[]),
            };
        }

        let mut segments = match &make {
            NameOrId::Id(id) => vec![
                "GetModelsForMakeIdYear".to_string(),
                "makeId".to_string(),
                id.to_string(),
            ],
            NameOrId::Name(name) => vec![
                "GetModelsForMakeYear".to_string(),
                "make".to_string(),
                name.clone(),
            ],
        };
        if let Some(year) = model_year {
            segments.push("modelyear".to_string());
            segments.push(year.to_string());
        }
        if let Some(vehicle_type) = vehicle_type {
            segments.push("vehicletype".to_string());
            segments.push(vehicle_type.to_string());
        }

        self.get(&segments, &[])
    }

    /// Every variable a VIN decode can report.
    pub fn build_vehicle_variable_list(&self) -> Result<HttpRequest> {
        self.get(&["GetVehicleVariableList"], &[])
    }

    /// Accepted values of a lookup variable, by variable id or name.
    pub fn build_vehicle_variable_values_list(
        &self,
        variable: impl Into<NameOrId>,
    ) -> Result<HttpRequest> {
        let variable = variable.into();
        variable.validate("variable")?;
        self.get(&["GetVehicleVariableValuesList".to_string(), variable.to_string()], &[])
    }

    /// Original vehicle dimensions compiled by Transport Canada.
    pub fn build_canadian_vehicle_specifications(
        &self,
        year: u16,
        make: &str,
        model: Option<&str>,
        units: Units,
    ) -> Result<HttpRequest> {
        if year < MIN_CANADIAN_SPEC_YEAR {
            return Err(Error::invalid(format!(
                "year must be {MIN_CANADIAN_SPEC_YEAR} or later"
            )));
        }
        if make.trim().is_empty() {
            return Err(Error::invalid("make is required"));
        }
        let mut query = vec![("Year", year.to_string()), ("Make", make.to_string())];
        if let Some(model) = model {
            query.push(("Model", model.to_string()));
        }
        query.push(("units", units.as_str().to_string()));
        self.get(&["GetCanadianVehicleSpecifications"], &query)
    }

    /// Extract `Results` from a response, standardizing variable names when
    /// enabled. Any status >= 400 becomes an `ApiError`.
    pub fn parse_results(&self, response: HttpResponse) -> Result<Value> {
        if response.is_error() {
            return Err(ApiError::from_response(response).into());
        }

        let envelope: Envelope = serde_json::from_str(&response.body).map_err(Error::Decode)?;
        tracing::debug!(
            count = envelope.count,
            message = envelope.message.as_deref().unwrap_or_default(),
            "parsed vPIC response"
        );
        let results = envelope.results.ok_or(Error::MissingResults)?;

        Ok(if self.standardize_variable_names {
            standardize(results)
        } else {
            results
        })
    }

    /// Like `parse_results`, keeping only the first result.
    pub fn parse_first(&self, response: HttpResponse) -> Result<Value> {
        match self.parse_results(response)? {
            Value::Array(results) => results.into_iter().next().ok_or(Error::EmptyResults),
            single => Ok(single),
        }
    }

    fn get<S: AsRef<str>>(&self, segments: &[S], query: &[(&str, String)]) -> Result<HttpRequest> {
        let url = self.url(segments, query)?;
        tracing::debug!(%url, "built vPIC request");
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: default_headers(),
            body: None,
        })
    }

    /// Host + path segments (percent-encoded) + query + `format=json`.
    fn url<S: AsRef<str>>(&self, segments: &[S], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid(format!("host {} cannot carry a path", self.host)))?
            .pop_if_empty()
            .extend(segments);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("format", "json");
        }
        Ok(url)
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![("Accept-Charset".to_string(), "utf-8".to_string())]
}

fn validate_vin(vin: &str) -> Result<()> {
    let len = vin.chars().count();
    if !(MIN_VIN_LEN..=MAX_VIN_LEN).contains(&len) {
        return Err(Error::invalid(format!(
            "vin must be at least {MIN_VIN_LEN} characters and at most {MAX_VIN_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_model_year(year: u16) -> Result<()> {
    if year < MIN_MODEL_YEAR {
        return Err(Error::invalid(format!(
            "model year must be {MIN_MODEL_YEAR} or later"
        )));
    }
    Ok(())
}
