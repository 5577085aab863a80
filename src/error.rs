//! Error types.
//!
//! One enum per subsystem: [`NetworkError`] for the graph engine and
//! [`ConfigError`] for loading network definitions.

/// Result alias used throughout the crate.
pub type Result<T, E = NetworkError> = std::result::Result<T, E>;

/// Errors raised by graph construction, mutation, and route search.
///
/// Every variant is a recoverable, caller-visible condition. Mutations
/// validate their inputs first, so a returned error means the network
/// was left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error("city already exists: {id}")]
    DuplicateCity { id: String },

    #[error("road already exists: {from} -> {to}")]
    DuplicateRoad { from: String, to: String },

    #[error("city not found: {id}")]
    CityNotFound { id: String },

    #[error("road not found: {from} -> {to}")]
    RoadNotFound { from: String, to: String },

    #[error("road is not broken: {from} -> {to}")]
    RoadNotBroken { from: String, to: String },

    #[error("invalid cost {cost} for road {from} -> {to}")]
    InvalidCost { from: String, to: String, cost: f64 },

    #[error("no path exists from {from} to {to}")]
    NoPathExists { from: String, to: String },

    #[error("route has no cities")]
    EmptyRoute,
}

impl NetworkError {
    pub(crate) fn city_not_found(id: &str) -> Self {
        Self::CityNotFound { id: id.to_string() }
    }

    pub(crate) fn road_not_found(from: &str, to: &str) -> Self {
        Self::RoadNotFound {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Errors raised while loading or validating a [`NetworkConfig`](crate::config::NetworkConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("network construction failed: {0}")]
    Network(#[from] NetworkError),
}
