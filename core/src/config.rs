//! Client configuration.
//!
//! Loaded from serde (any format the caller likes) or from `VPIC_*`
//! environment variables. Missing values fall back to the public vPIC API
//! with variable-name standardization on and unknown fields excluded.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapper::UnknownFields;

pub const DEFAULT_HOST: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

pub const HOST_VAR: &str = "VPIC_HOST";
pub const STANDARDIZE_VAR: &str = "VPIC_STANDARDIZE";
pub const UNKNOWN_FIELDS_VAR: &str = "VPIC_UNKNOWN_FIELDS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the vPIC instance, including the `/api/vehicles` path.
    pub host: String,

    /// Rewrite inconsistent upstream variable names to one canonical name.
    /// Only affects the untyped client; typed parsing always standardizes.
    pub standardize_variable_names: bool,

    /// Policy for response keys a record does not declare.
    pub unknown_fields: UnknownFields,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            standardize_variable_names: true,
            unknown_fields: UnknownFields::default(),
        }
    }
}

impl ClientConfig {
    /// Read the `VPIC_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Unset or blank variables keep
    /// their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get(HOST_VAR) {
            config.host = host.trim().to_string();
        }
        if let Some(flag) = get(STANDARDIZE_VAR) {
            config.standardize_variable_names = parse_flag(STANDARDIZE_VAR, &flag)?;
        }
        if let Some(policy) = get(UNKNOWN_FIELDS_VAR) {
            config.unknown_fields = policy.parse()?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::invalid(format!(
            "{name} must be true or false, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.standardize_variable_names);
        assert_eq!(config.unknown_fields, UnknownFields::Exclude);
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("VPIC_HOST", "http://127.0.0.1:3000/api/vehicles"),
            ("VPIC_STANDARDIZE", "false"),
            ("VPIC_UNKNOWN_FIELDS", "raise"),
        ]))
        .unwrap();
        assert_eq!(config.host, "http://127.0.0.1:3000/api/vehicles");
        assert!(!config.standardize_variable_names);
        assert_eq!(config.unknown_fields, UnknownFields::Raise);
    }

    #[test]
    fn blank_variables_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("VPIC_HOST", "  ")])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("VPIC_UNKNOWN_FIELDS", "ignore")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = ClientConfig::from_lookup(lookup(&[("VPIC_STANDARDIZE", "maybe")])).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ClientConfig = serde_json::from_str(r#"{"unknown_fields": "RAISE"}"#).unwrap();
        assert_eq!(config.unknown_fields, UnknownFields::Raise);
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
