//! Network definitions loaded from TOML (or JSON with the `json` feature).
//!
//! ```toml
//! [[cities]]
//! id = "São Paulo"
//! role = "warehouse"
//!
//! [[cities]]
//! id = "Rio de Janeiro"
//! role = "customer"
//!
//! [[roads]]
//! from = "São Paulo"
//! to = "Rio de Janeiro"
//! cost = 430.0
//!
//! [[analysis.pairs]]
//! from = "São Paulo"
//! to = "Rio de Janeiro"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{CityPair, CityRole, RoadNetwork};
use crate::session::{build_graph, GraphHandle};

/// A city entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySpec {
    pub id: String,
    /// Defaults to `intermediate`.
    #[serde(default)]
    pub role: CityRole,
}

/// A road entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSpec {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

/// Analysis settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Pairs of interest. Default: every warehouse to every customer.
    pub pairs: Option<Vec<CityPair>>,
}

/// A complete network definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub cities: Vec<CitySpec>,
    pub roads: Vec<RoadSpec>,
    pub analysis: AnalysisSection,
}

impl NetworkConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a JSON string.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate values that parse but cannot describe a network.
    ///
    /// Graph-level problems (duplicates, unknown endpoints, negative costs)
    /// are reported by [`build`](Self::build) instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(i) = self.cities.iter().position(|c| c.id.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: format!("cities[{i}].id"),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(pairs) = &self.analysis.pairs {
            if pairs.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.pairs".to_string(),
                    message: "must list at least one pair when present".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Builds a session handle, failing on the first invalid entry.
    pub fn build(&self) -> Result<GraphHandle, ConfigError> {
        let cities: Vec<(&str, CityRole)> =
            self.cities.iter().map(|c| (c.id.as_str(), c.role)).collect();
        let roads: Vec<(&str, &str, f64)> = self
            .roads
            .iter()
            .map(|r| (r.from.as_str(), r.to.as_str(), r.cost))
            .collect();
        Ok(build_graph(&cities, &roads)?)
    }

    /// Configured pairs of interest, or warehouse to customer pairs of
    /// `network` when none are configured.
    pub fn pairs_of_interest(&self, network: &RoadNetwork) -> Vec<CityPair> {
        match &self.analysis.pairs {
            Some(pairs) => pairs.clone(),
            None => network.default_pairs(),
        }
    }

    /// The built-in example network: a warehouse in São Paulo, three
    /// intermediate cities and three customers in south-east Brazil.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_roadnet::config::NetworkConfig;
    ///
    /// let handle = NetworkConfig::sample().build().unwrap();
    /// assert_eq!(handle.list_cities().len(), 7);
    /// assert_eq!(handle.list_available_roads().len(), 14);
    /// ```
    pub fn sample() -> Self {
        let city = |id: &str, role| CitySpec {
            id: id.to_string(),
            role,
        };
        let road = |from: &str, to: &str, cost| RoadSpec {
            from: from.to_string(),
            to: to.to_string(),
            cost,
        };
        Self {
            cities: vec![
                city("São Paulo", CityRole::Warehouse),
                city("Campinas", CityRole::Intermediate),
                city("Ribeirão Preto", CityRole::Intermediate),
                city("Sorocaba", CityRole::Intermediate),
                city("Rio de Janeiro", CityRole::Customer),
                city("Belo Horizonte", CityRole::Customer),
                city("Curitiba", CityRole::Customer),
            ],
            roads: vec![
                road("São Paulo", "Campinas", 100.0),
                road("São Paulo", "Sorocaba", 90.0),
                road("São Paulo", "Ribeirão Preto", 310.0),
                road("Campinas", "Rio de Janeiro", 350.0),
                road("Campinas", "Belo Horizonte", 580.0),
                road("Campinas", "Sorocaba", 120.0),
                road("Sorocaba", "Curitiba", 280.0),
                road("Sorocaba", "Campinas", 120.0),
                road("Ribeirão Preto", "Belo Horizonte", 520.0),
                road("Ribeirão Preto", "Campinas", 220.0),
                road("São Paulo", "Rio de Janeiro", 430.0),
                road("São Paulo", "Curitiba", 410.0),
                road("Rio de Janeiro", "Belo Horizonte", 440.0),
                road("Belo Horizonte", "Curitiba", 980.0),
            ],
            analysis: AnalysisSection::default(),
        }
    }
}
