//! Record-returning vPIC client.
//!
//! # Design
//! `TypedClient` reuses `VpicClient` for every request and for envelope
//! parsing, with standardization forced on. Results are then snake-cased and
//! mapped into records under the configured `UnknownFields` policy.
//! Requests are built through `client()`; only parsing differs.

use crate::case::snake_case_results;
use crate::client::VpicClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpResponse;
use crate::mapper::{map_record, map_records, Record, UnknownFields};
use crate::types::{
    Document, Make, Manufacturer, ManufacturerDetail, Model, PlantCode, Variable, VariableValue,
    VehicleType, WorldManufacturerIndex,
};
use crate::vehicle::Vehicle;

#[derive(Debug, Clone)]
pub struct TypedClient {
    client: VpicClient,
    unknown_fields: UnknownFields,
}

impl TypedClient {
    pub fn new(host: &str) -> Result<Self> {
        Ok(Self {
            client: VpicClient::new(host)?,
            unknown_fields: UnknownFields::default(),
        })
    }

    /// `standardize_variable_names` is ignored; records are always built
    /// from standardized names.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: VpicClient::from_config(config)?.with_standardize_variable_names(true),
            unknown_fields: config.unknown_fields,
        })
    }

    pub fn with_unknown_fields(mut self, unknown_fields: UnknownFields) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    /// The request builder. Every `build_*` method lives there.
    pub fn client(&self) -> &VpicClient {
        &self.client
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    /// Map the first result of a response into `R`.
    pub fn parse_record<R: Record>(&self, response: HttpResponse) -> Result<R> {
        let result = snake_case_results(self.client.parse_first(response)?);
        Ok(map_record(result, self.unknown_fields)?)
    }

    /// Map every result of a response into `R`, in order.
    pub fn parse_records<R: Record>(&self, response: HttpResponse) -> Result<Vec<R>> {
        let results = snake_case_results(self.client.parse_results(response)?);
        Ok(map_records(results, self.unknown_fields)?)
    }

    pub fn parse_decode_vin(&self, response: HttpResponse) -> Result<Vehicle> {
        self.parse_record(response)
    }

    pub fn parse_decode_vin_batch(&self, response: HttpResponse) -> Result<Vec<Vehicle>> {
        self.parse_records(response)
    }

    pub fn parse_decode_wmi(&self, response: HttpResponse) -> Result<WorldManufacturerIndex> {
        self.parse_record(response)
    }

    pub fn parse_wmis_for_manufacturer(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<WorldManufacturerIndex>> {
        self.parse_records(response)
    }

    pub fn parse_all_makes(&self, response: HttpResponse) -> Result<Vec<Make>> {
        self.parse_records(response)
    }

    pub fn parse_parts(&self, response: HttpResponse) -> Result<Vec<Document>> {
        self.parse_records(response)
    }

    pub fn parse_all_manufacturers(&self, response: HttpResponse) -> Result<Vec<Manufacturer>> {
        self.parse_records(response)
    }

    pub fn parse_manufacturer_details(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ManufacturerDetail>> {
        self.parse_records(response)
    }

    pub fn parse_makes_for_manufacturer(&self, response: HttpResponse) -> Result<Vec<Make>> {
        self.parse_records(response)
    }

    pub fn parse_makes_for_vehicle_type(&self, response: HttpResponse) -> Result<Vec<Make>> {
        self.parse_records(response)
    }

    pub fn parse_vehicle_types_for_make(&self, response: HttpResponse) -> Result<Vec<VehicleType>> {
        self.parse_records(response)
    }

    pub fn parse_equipment_plant_codes(&self, response: HttpResponse) -> Result<Vec<PlantCode>> {
        self.parse_records(response)
    }

    pub fn parse_models_for_make(&self, response: HttpResponse) -> Result<Vec<Model>> {
        self.parse_records(response)
    }

    pub fn parse_vehicle_variable_list(&self, response: HttpResponse) -> Result<Vec<Variable>> {
        self.parse_records(response)
    }

    pub fn parse_vehicle_variable_values_list(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<VariableValue>> {
        self.parse_records(response)
    }
}
