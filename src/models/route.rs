//! Route, route outcome, and city pair types.

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// An ordered sequence of cities from source to destination (inclusive)
/// with the total cost of the traversed roads.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::Route;
///
/// let route = Route::new(vec!["A".into(), "B".into(), "C".into()], 7.0);
/// assert_eq!(route.source(), Some("A"));
/// assert_eq!(route.destination(), Some("C"));
/// assert_eq!(route.legs(), vec![("A", "B"), ("B", "C")]);
/// assert_eq!(route.intermediates(), &["B".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    cities: Vec<String>,
    cost: f64,
}

impl Route {
    /// Creates a route from an explicit city sequence and its total cost.
    pub fn new(cities: Vec<String>, cost: f64) -> Self {
        Self { cities, cost }
    }

    /// Route that starts and ends at `city` without moving (cost 0).
    pub fn stationary(city: &str) -> Self {
        Self::new(vec![city.to_string()], 0.0)
    }

    /// Cities in travel order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Sum of traversed road costs.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn source(&self) -> Option<&str> {
        self.cities.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.cities.last().map(String::as_str)
    }

    /// Number of roads traversed.
    pub fn num_legs(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs, one per traversed road.
    pub fn legs(&self) -> Vec<(&str, &str)> {
        self.cities
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect()
    }

    /// Cities strictly between source and destination.
    pub fn intermediates(&self) -> &[String] {
        if self.cities.len() <= 2 {
            return &[];
        }
        &self.cities[1..self.cities.len() - 1]
    }

    /// Returns `true` if the route visits `city` (endpoints included).
    pub fn visits(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Returns `true` if the route traverses the road `from -> to`.
    pub fn uses_road(&self, from: &str, to: &str) -> bool {
        self.cities.windows(2).any(|w| w[0] == from && w[1] == to)
    }

    /// Serializes this route to a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Result of a route search: either a route, or the normal "no path" case.
///
/// Unreachability is a value rather than an error so callers branch on it
/// explicitly. Use [`into_route`](Self::into_route) to turn it into
/// [`NetworkError::NoPathExists`] instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// A minimum-cost route was found.
    Found(Route),
    /// The destination cannot be reached from the source.
    NoPath { from: String, to: String },
}

impl RouteOutcome {
    pub(crate) fn no_path(from: &str, to: &str) -> Self {
        Self::NoPath {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPath { .. })
    }

    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(route) => Some(route),
            Self::NoPath { .. } => None,
        }
    }

    /// The route cost, if one was found.
    pub fn cost(&self) -> Option<f64> {
        self.route().map(Route::cost)
    }

    /// Converts into a `Result`, mapping the no-path case to
    /// [`NetworkError::NoPathExists`].
    pub fn into_route(self) -> Result<Route> {
        match self {
            Self::Found(route) => Ok(route),
            Self::NoPath { from, to } => Err(NetworkError::NoPathExists { from, to }),
        }
    }
}

/// A `(source, destination)` pair that analyses are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityPair {
    pub from: String,
    pub to: String,
}

impl CityPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns `true` if `city` is the source or the destination.
    pub fn has_endpoint(&self, city: &str) -> bool {
        self.from == city || self.to == city
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for CityPair {
    fn from((from, to): (A, B)) -> Self {
        Self::new(from, to)
    }
}
