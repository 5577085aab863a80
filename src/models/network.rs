//! The road network: cities, directed roads, and broken roads.

use std::collections::HashMap;

use tracing::debug;

use super::{BrokenRoadSet, City, CityPair, CityRole, Road};
use crate::error::{NetworkError, Result};

/// A directed, cost-weighted graph of cities and roads.
///
/// Cities are kept in insertion order. Each city owns an ordered list of
/// outgoing roads; that order drives the traversal order (and therefore
/// tie-breaking) of the path search. Removed roads move into a
/// [`BrokenRoadSet`] and can be restored with their original cost and
/// original position.
///
/// Every mutation validates its inputs before changing anything.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
///
/// let mut net = RoadNetwork::new();
/// net.add_city("São Paulo", CityRole::Warehouse).unwrap();
/// net.add_city("Rio de Janeiro", CityRole::Customer).unwrap();
/// net.add_road("São Paulo", "Rio de Janeiro", 430.0).unwrap();
///
/// net.remove_road("São Paulo", "Rio de Janeiro").unwrap();
/// assert_eq!(net.road_count(), 0);
/// assert_eq!(net.broken().len(), 1);
///
/// net.restore_all();
/// assert_eq!(net.road_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    cities: Vec<City>,
    index: HashMap<String, usize>,
    outgoing: Vec<Vec<Road>>,
    broken: BrokenRoadSet,
    next_ordinal: u64,
}

impl RoadNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a city.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateCity`] if `id` is already present.
    pub fn add_city(&mut self, id: impl Into<String>, role: CityRole) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(NetworkError::DuplicateCity { id });
        }
        debug!(city = %id, %role, "city added");
        self.index.insert(id.clone(), self.cities.len());
        self.cities.push(City::new(id, role));
        self.outgoing.push(Vec::new());
        Ok(())
    }

    /// Adds a directed road `from -> to`, appended after the existing
    /// outgoing roads of `from`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::CityNotFound`] if either endpoint is absent
    /// - [`NetworkError::DuplicateRoad`] if the road exists, broken or not
    /// - [`NetworkError::InvalidCost`] if `cost` is negative or not finite
    pub fn add_road(&mut self, from: &str, to: &str, cost: f64) -> Result<()> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        if self.has_road(from, to) || self.broken.contains(from, to) {
            return Err(NetworkError::DuplicateRoad {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(NetworkError::InvalidCost {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            });
        }

        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        self.outgoing[source].push(Road::new(from, to, cost, target, ordinal));
        debug!(from, to, cost, "road added");
        Ok(())
    }

    /// Removes the road `from -> to` and records it as broken.
    ///
    /// Returns a copy of the removed road.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::CityNotFound`] if either endpoint is absent
    /// - [`NetworkError::RoadNotFound`] if no such road is currently available
    ///   (including when it is already broken)
    pub fn remove_road(&mut self, from: &str, to: &str) -> Result<Road> {
        let source = self.require(from)?;
        self.require(to)?;
        let roads = &mut self.outgoing[source];
        let pos = roads
            .iter()
            .position(|r| r.to() == to)
            .ok_or_else(|| NetworkError::road_not_found(from, to))?;

        let road = roads.remove(pos);
        debug!(from, to, cost = road.cost(), "road broken");
        self.broken.insert(road.clone());
        Ok(road)
    }

    /// Restores the broken road `from -> to` with its original cost.
    ///
    /// The road goes back to its original slot among the outgoing roads of
    /// `from`, so restoring every broken road reproduces the original
    /// traversal order exactly.
    ///
    /// # Errors
    ///
    /// [`NetworkError::RoadNotBroken`] if the road is not currently broken.
    pub fn restore_road(&mut self, from: &str, to: &str) -> Result<()> {
        let road = self
            .broken
            .take(from, to)
            .ok_or_else(|| NetworkError::RoadNotBroken {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        debug!(from, to, cost = road.cost(), "road restored");
        self.reinsert(road);
        Ok(())
    }

    /// Restores every broken road. Returns how many roads were restored.
    pub fn restore_all(&mut self) -> usize {
        let roads = self.broken.drain();
        let count = roads.len();
        for road in roads {
            self.reinsert(road);
        }
        if count > 0 {
            debug!(count, "all broken roads restored");
        }
        count
    }

    fn reinsert(&mut self, road: Road) {
        let source = self.index[road.from()];
        let roads = &mut self.outgoing[source];
        let pos = roads.partition_point(|r| r.ordinal < road.ordinal);
        roads.insert(pos, road);
    }

    fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| NetworkError::city_not_found(id))
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn outgoing_at(&self, index: usize) -> &[Road] {
        &self.outgoing[index]
    }

    /// All cities in insertion order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Looks up a city by identifier.
    pub fn city(&self, id: &str) -> Option<&City> {
        self.index_of(id).map(|i| &self.cities[i])
    }

    pub fn contains_city(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Available (non-broken) roads: cities in insertion order, then each
    /// city's outgoing roads in insertion order.
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.outgoing.iter().flatten()
    }

    /// Available outgoing roads of `id`, in traversal order.
    ///
    /// # Errors
    ///
    /// [`NetworkError::CityNotFound`] if `id` is absent.
    pub fn outgoing(&self, id: &str) -> Result<&[Road]> {
        let i = self.require(id)?;
        Ok(&self.outgoing[i])
    }

    /// Returns the available road `from -> to`, if any.
    pub fn road(&self, from: &str, to: &str) -> Option<&Road> {
        let i = self.index_of(from)?;
        self.outgoing[i].iter().find(|r| r.to() == to)
    }

    /// Returns `true` if the road `from -> to` is available.
    pub fn has_road(&self, from: &str, to: &str) -> bool {
        self.road(from, to).is_some()
    }

    /// Roads currently broken.
    pub fn broken(&self) -> &BrokenRoadSet {
        &self.broken
    }

    /// Number of cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Number of available roads.
    pub fn road_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Number of available roads leaving `id`. Zero for unknown cities.
    pub fn out_degree(&self, id: &str) -> usize {
        self.index_of(id).map_or(0, |i| self.outgoing[i].len())
    }

    /// Number of available roads entering `id`. Zero for unknown cities.
    pub fn in_degree(&self, id: &str) -> usize {
        match self.index_of(id) {
            Some(i) => self.roads().filter(|r| r.target == i).count(),
            None => 0,
        }
    }

    /// Available roads with `id` as either endpoint, as `(from, to)` keys.
    pub fn incident_roads(&self, id: &str) -> Vec<(String, String)> {
        self.roads()
            .filter(|r| r.touches(id))
            .map(|r| (r.from().to_string(), r.to().to_string()))
            .collect()
    }

    fn with_role(&self, role: CityRole) -> impl Iterator<Item = &City> {
        self.cities.iter().filter(move |c| c.role() == role)
    }

    /// Warehouse cities in insertion order.
    pub fn warehouses(&self) -> Vec<&City> {
        self.with_role(CityRole::Warehouse).collect()
    }

    /// Customer cities in insertion order.
    pub fn customers(&self) -> Vec<&City> {
        self.with_role(CityRole::Customer).collect()
    }

    /// Intermediate cities in insertion order.
    pub fn intermediates(&self) -> Vec<&City> {
        self.with_role(CityRole::Intermediate).collect()
    }

    /// Default pairs of interest: every warehouse to every customer.
    pub fn default_pairs(&self) -> Vec<CityPair> {
        let customers = self.customers();
        self.with_role(CityRole::Warehouse)
            .flat_map(|w| customers.iter().map(move |c| CityPair::new(w.id(), c.id())))
            .collect()
    }
}
