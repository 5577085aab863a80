//! Directed road type.

use serde::Serialize;

/// A directed, costed road between two cities.
///
/// A road from `A` to `B` says nothing about a road from `B` to `A`.
/// Roads are created by [`RoadNetwork::add_road`](super::RoadNetwork::add_road),
/// which validates the endpoints and the cost.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
///
/// let mut net = RoadNetwork::new();
/// net.add_city("A", CityRole::Warehouse).unwrap();
/// net.add_city("B", CityRole::Customer).unwrap();
/// net.add_road("A", "B", 12.5).unwrap();
///
/// let road = net.roads().next().unwrap();
/// assert_eq!(road.key(), ("A", "B"));
/// assert_eq!(road.cost(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    from: String,
    to: String,
    cost: f64,
    /// Index of `to` in the owning network.
    #[serde(skip)]
    pub(crate) target: usize,
    /// Global insertion sequence; keeps per-city order stable across restores.
    #[serde(skip)]
    pub(crate) ordinal: u64,
}

impl Road {
    pub(crate) fn new(from: &str, to: &str, cost: f64, target: usize, ordinal: u64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            cost,
            target,
            ordinal,
        }
    }

    /// Origin city.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination city.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Traversal cost (never negative).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The `(from, to)` pair that identifies this road.
    pub fn key(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }

    /// Returns `true` if this road connects `from` to `to`.
    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    /// Returns `true` if either endpoint is `city`.
    pub fn touches(&self, city: &str) -> bool {
        self.from == city || self.to == city
    }

    /// Plain `(from, to, cost)` triple, as consumed by report generators.
    pub fn to_triple(&self) -> (String, String, f64) {
        (self.from.clone(), self.to.clone(), self.cost)
    }
}
