//! Argument types for the vPIC endpoints.

use std::fmt;

use crate::error::{Error, Result};

/// A manufacturer, make or vehicle type given either by its vPIC id or by a
/// complete or partial name. vPIC matches partial names as substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameOrId {
    Id(u32),
    Name(String),
}

impl NameOrId {
    /// Reject blank names. `what` names the argument in the error.
    pub(crate) fn validate(&self, what: &str) -> Result<()> {
        match self {
            NameOrId::Name(name) if name.trim().is_empty() => {
                Err(Error::invalid(format!("{what} is required")))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for NameOrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameOrId::Id(id) => write!(f, "{id}"),
            NameOrId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for NameOrId {
    fn from(id: u32) -> Self {
        NameOrId::Id(id)
    }
}

impl From<&str> for NameOrId {
    fn from(name: &str) -> Self {
        NameOrId::Name(name.to_string())
    }
}

impl From<String> for NameOrId {
    fn from(name: String) -> Self {
        NameOrId::Name(name)
    }
}

/// One VIN of a batch decode, with its optional model year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchVin {
    pub vin: String,
    pub model_year: Option<u16>,
}

impl BatchVin {
    pub fn new(vin: impl Into<String>) -> Self {
        Self {
            vin: vin.into(),
            model_year: None,
        }
    }

    pub fn with_model_year(mut self, model_year: u16) -> Self {
        self.model_year = Some(model_year);
        self
    }
}

impl fmt::Display for BatchVin {
    /// vPIC's batch syntax: `vin` or `vin,year`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model_year {
            Some(year) => write!(f, "{},{year}", self.vin),
            None => f.write_str(&self.vin),
        }
    }
}

impl From<&str> for BatchVin {
    fn from(vin: &str) -> Self {
        BatchVin::new(vin)
    }
}

impl From<String> for BatchVin {
    fn from(vin: String) -> Self {
        BatchVin::new(vin)
    }
}

/// Equipment made at a plant, for `GetEquipmentPlantCodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentType {
    Tires,
    BrakeHoses,
    Glazing,
    Retread,
}

impl EquipmentType {
    pub fn code(self) -> u8 {
        match self {
            EquipmentType::Tires => 1,
            EquipmentType::BrakeHoses => 3,
            EquipmentType::Glazing => 13,
            EquipmentType::Retread => 16,
        }
    }
}

/// Which plants `GetEquipmentPlantCodes` reports for the chosen year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportType {
    /// Code assigned during the year.
    New,
    /// Data modified during the year.
    Updated,
    /// No longer active.
    Closed,
    /// Active and closed plants, regardless of year.
    #[default]
    All,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::New => "New",
            ReportType::Updated => "Updated",
            ReportType::Closed => "Closed",
            ReportType::All => "All",
        }
    }
}

/// Measurement system for Canadian vehicle specifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Metric,
    Us,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "Metric",
            Units::Us => "US",
        }
    }
}
