//! Failure simulator over a mutable network.

use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::models::{Road, RoadNetwork};

/// Roads broken to isolate a city, remembered so exactly those roads can be
/// restored later.
#[derive(Debug, Clone, PartialEq)]
pub struct CityOutage {
    city: String,
    roads: Vec<(String, String)>,
}

impl CityOutage {
    /// The isolated city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Roads broken by this outage, as `(from, to)` keys.
    pub fn roads(&self) -> &[(String, String)] {
        &self.roads
    }
}

/// Breaks and restores roads (or whole cities) on a network.
///
/// All operations delegate to [`RoadNetwork`] mutations and share their
/// error semantics. Breaking an already broken road reports
/// [`NetworkError::RoadNotFound`]; restoring twice is a no-op the second
/// time for [`restore_all_roads`](Self::restore_all_roads).
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
/// use u_roadnet::failure::FailureSimulator;
/// use u_roadnet::pathfinding::find_min_cost_path;
///
/// let mut net = RoadNetwork::new();
/// net.add_city("A", CityRole::Warehouse).unwrap();
/// net.add_city("B", CityRole::Customer).unwrap();
/// net.add_road("A", "B", 1.0).unwrap();
///
/// let reachable = FailureSimulator::new(&mut net)
///     .with_road_broken("A", "B", |n| find_min_cost_path(n, "A", "B").unwrap().is_found())
///     .unwrap();
/// assert!(!reachable);
/// assert!(net.has_road("A", "B"));
/// ```
pub struct FailureSimulator<'a> {
    network: &'a mut RoadNetwork,
}

impl<'a> FailureSimulator<'a> {
    /// Creates a simulator that mutates `network`.
    pub fn new(network: &'a mut RoadNetwork) -> Self {
        Self { network }
    }

    /// Read access to the network in its current (possibly failed) state.
    pub fn network(&self) -> &RoadNetwork {
        &*self.network
    }

    /// Breaks the road `from -> to`.
    pub fn break_road(&mut self, from: &str, to: &str) -> Result<Road> {
        self.network.remove_road(from, to)
    }

    /// Restores the broken road `from -> to`.
    pub fn restore_road(&mut self, from: &str, to: &str) -> Result<()> {
        self.network.restore_road(from, to)
    }

    /// Restores every broken road, returning how many were restored.
    pub fn restore_all_roads(&mut self) -> usize {
        self.network.restore_all()
    }

    /// Isolates `city` by breaking every available road entering or
    /// leaving it. Roads that were already broken are left alone and are
    /// not part of the returned outage.
    ///
    /// # Errors
    ///
    /// [`NetworkError::CityNotFound`] if `city` is absent.
    pub fn fail_city(&mut self, city: &str) -> Result<CityOutage> {
        if !self.network.contains_city(city) {
            return Err(NetworkError::city_not_found(city));
        }
        let roads = self.network.incident_roads(city);
        for (from, to) in &roads {
            self.network.remove_road(from, to)?;
        }
        debug!(city, roads = roads.len(), "city isolated");
        Ok(CityOutage {
            city: city.to_string(),
            roads,
        })
    }

    /// Restores the roads broken by `outage`.
    ///
    /// Every road is checked before any is restored, so on error the
    /// network is unchanged and the same outage can be restored later.
    ///
    /// # Errors
    ///
    /// [`NetworkError::RoadNotBroken`] for the first road of the outage that
    /// is no longer broken.
    pub fn restore_outage(&mut self, outage: &CityOutage) -> Result<()> {
        if let Some((from, to)) = outage
            .roads
            .iter()
            .find(|(from, to)| !self.network.broken().contains(from, to))
        {
            return Err(NetworkError::RoadNotBroken {
                from: from.clone(),
                to: to.clone(),
            });
        }
        for (from, to) in &outage.roads {
            self.network.restore_road(from, to)?;
        }
        debug!(city = %outage.city, "city restored");
        Ok(())
    }

    /// Breaks `from -> to`, runs `probe` on the failed network, then
    /// restores the road.
    pub fn with_road_broken<T>(
        &mut self,
        from: &str,
        to: &str,
        probe: impl FnOnce(&RoadNetwork) -> T,
    ) -> Result<T> {
        self.break_road(from, to)?;
        let result = probe(&*self.network);
        self.restore_road(from, to)?;
        Ok(result)
    }

    /// Isolates `city`, runs `probe` on the failed network, then restores
    /// the city's roads.
    pub fn with_city_failed<T>(
        &mut self,
        city: &str,
        probe: impl FnOnce(&RoadNetwork) -> T,
    ) -> Result<T> {
        let outage = self.fail_city(city)?;
        let result = probe(&*self.network);
        self.restore_outage(&outage)?;
        Ok(result)
    }
}
