//! Synchronous client core for the NHTSA vPIC vehicle API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, which keeps the core deterministic and testable.
//!
//! # Design
//! - `VpicClient` returns `serde_json::Value` results, optionally with
//!   variable names standardized (`standardize`).
//! - `TypedClient` goes further: standardized names are snake-cased (`case`)
//!   and mapped into records (`mapper`, `types`, `vehicle`).
//! - Failed responses are classified into `ApiError` (`error`).
//! - Both clients are stateless apart from their configuration (`config`).

pub mod case;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mapper;
pub mod params;
pub mod standardize;
pub mod typed;
pub mod types;
pub mod vehicle;

pub use client::VpicClient;
pub use config::ClientConfig;
pub use error::{ApiError, Error, ErrorKind, Result, SchemaError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mapper::{Record, UnknownFields};
pub use params::{BatchVin, EquipmentType, NameOrId, ReportType, Units};
pub use typed::TypedClient;
pub use types::{
    Document, Make, Manufacturer, ManufacturerDetail, ManufacturerType, Model, PlantCode, Variable,
    VariableValue, VehicleType, WorldManufacturerIndex,
};
pub use vehicle::Vehicle;
