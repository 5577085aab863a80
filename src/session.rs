//! Session handle exposed to front ends and report generators.
//!
//! A [`GraphHandle`] owns one network together with its broken roads, and
//! is the only way collaborators mutate it. After any successful
//! [`break_road`](GraphHandle::break_road),
//! [`restore_road`](GraphHandle::restore_road) or
//! [`restore_all`](GraphHandle::restore_all), callers refresh what they
//! display by calling [`recompute`](GraphHandle::recompute).

use tracing::info;

use crate::analysis::{self, CentralityReport, NetworkStats, RobustnessReport};
use crate::error::Result;
use crate::matrix::CostMatrix;
use crate::models::{City, CityPair, CityRole, RoadNetwork, Route, RouteOutcome};
use crate::pathfinding;

/// Builds a network from city and road lists, failing fast on the first
/// invalid entry.
///
/// # Errors
///
/// The first of [`DuplicateCity`](crate::error::NetworkError::DuplicateCity),
/// [`CityNotFound`](crate::error::NetworkError::CityNotFound),
/// [`DuplicateRoad`](crate::error::NetworkError::DuplicateRoad) or
/// [`InvalidCost`](crate::error::NetworkError::InvalidCost) encountered.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::CityRole;
/// use u_roadnet::session::build_graph;
///
/// let mut handle = build_graph(
///     &[
///         ("São Paulo", CityRole::Warehouse),
///         ("Campinas", CityRole::Intermediate),
///         ("Rio de Janeiro", CityRole::Customer),
///     ],
///     &[
///         ("São Paulo", "Rio de Janeiro", 430.0),
///         ("São Paulo", "Campinas", 100.0),
///         ("Campinas", "Rio de Janeiro", 350.0),
///     ],
/// )
/// .unwrap();
///
/// let route = handle.set_active_pair("São Paulo", "Rio de Janeiro").unwrap();
/// assert_eq!(route.cost(), Some(430.0));
///
/// handle.break_road("São Paulo", "Rio de Janeiro").unwrap();
/// let route = handle.recompute().unwrap().unwrap();
/// assert_eq!(route.cost(), Some(450.0));
/// ```
pub fn build_graph(cities: &[(&str, CityRole)], roads: &[(&str, &str, f64)]) -> Result<GraphHandle> {
    let mut network = RoadNetwork::new();
    for &(id, role) in cities {
        network.add_city(id, role)?;
    }
    for &(from, to, cost) in roads {
        network.add_road(from, to, cost)?;
    }
    info!(
        cities = network.city_count(),
        roads = network.road_count(),
        "network built"
    );
    Ok(GraphHandle::from_network(network))
}

/// One analysis session: a network, its broken roads, and the
/// origin/destination pair currently on display.
#[derive(Debug, Clone, Default)]
pub struct GraphHandle {
    network: RoadNetwork,
    active: Option<CityPair>,
}

impl GraphHandle {
    /// Wraps an already populated network.
    pub fn from_network(network: RoadNetwork) -> Self {
        Self {
            network,
            active: None,
        }
    }

    /// Read access to the underlying network.
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// Consumes the handle, returning the network.
    pub fn into_network(self) -> RoadNetwork {
        self.network
    }

    /// Minimum-cost route from `from` to `to` over the available roads.
    pub fn compute_route(&self, from: &str, to: &str) -> Result<RouteOutcome> {
        pathfinding::find_min_cost_path(&self.network, from, to)
    }

    /// Every simple route from `from` to `to`, cheapest first.
    pub fn compare_routes(&self, from: &str, to: &str) -> Result<Vec<Route>> {
        pathfinding::enumerate_routes(&self.network, from, to)
    }

    /// Breaks the road `from -> to`.
    pub fn break_road(&mut self, from: &str, to: &str) -> Result<()> {
        self.network.remove_road(from, to).map(|_| ())
    }

    /// Restores the broken road `from -> to`.
    pub fn restore_road(&mut self, from: &str, to: &str) -> Result<()> {
        self.network.restore_road(from, to)
    }

    /// Restores every broken road. Returns how many were restored.
    pub fn restore_all(&mut self) -> usize {
        self.network.restore_all()
    }

    /// Cities in insertion order.
    pub fn list_cities(&self) -> &[City] {
        self.network.cities()
    }

    /// Available roads as `(from, to, cost)`, in listing order.
    pub fn list_available_roads(&self) -> Vec<(String, String, f64)> {
        self.network.roads().map(|r| r.to_triple()).collect()
    }

    /// Broken roads as `(from, to, cost)`, in the order they were broken.
    pub fn list_broken_roads(&self) -> Vec<(String, String, f64)> {
        self.network.broken().iter().map(|r| r.to_triple()).collect()
    }

    /// Warehouse to customer pairs, the usual pairs of interest.
    pub fn default_pairs(&self) -> Vec<CityPair> {
        self.network.default_pairs()
    }

    /// Critical roads and cities for `pairs`. The network is left exactly
    /// as it was.
    pub fn analyze_robustness(&mut self, pairs: &[CityPair]) -> Result<RobustnessReport> {
        analysis::analyze_robustness(&mut self.network, pairs)
    }

    /// Degree and path-participation rankings for `pairs`.
    pub fn rank_centrality(&self, pairs: &[CityPair]) -> Result<CentralityReport> {
        analysis::rank_centrality(&self.network, pairs)
    }

    /// Summary statistics of the current network.
    pub fn statistics(&self) -> NetworkStats {
        NetworkStats::compute(&self.network)
    }

    /// Direct-cost matrix of the current network.
    pub fn cost_matrix(&self) -> CostMatrix {
        CostMatrix::from_network(&self.network)
    }

    /// Selects the origin/destination pair on display and returns its
    /// route.
    ///
    /// # Errors
    ///
    /// [`CityNotFound`](crate::error::NetworkError::CityNotFound) if either
    /// city is absent; the previous pair stays active.
    pub fn set_active_pair(&mut self, from: &str, to: &str) -> Result<RouteOutcome> {
        let outcome = self.compute_route(from, to)?;
        self.active = Some(CityPair::new(from, to));
        Ok(outcome)
    }

    /// Clears the active pair.
    pub fn clear_active_pair(&mut self) {
        self.active = None;
    }

    pub fn active_pair(&self) -> Option<&CityPair> {
        self.active.as_ref()
    }

    /// Route for the active pair on the current network, or `None` when no
    /// pair is active.
    pub fn recompute(&self) -> Option<Result<RouteOutcome>> {
        self.active
            .as_ref()
            .map(|pair| self.compute_route(&pair.from, &pair.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    fn scenario() -> GraphHandle {
        build_graph(
            &[
                ("São Paulo", CityRole::Warehouse),
                ("Campinas", CityRole::Intermediate),
                ("Rio de Janeiro", CityRole::Customer),
            ],
            &[
                ("São Paulo", "Rio de Janeiro", 430.0),
                ("São Paulo", "Campinas", 100.0),
                ("Campinas", "Rio de Janeiro", 350.0),
            ],
        )
        .expect("valid network")
    }

    #[test]
    fn test_build_graph_fails_fast() {
        let err = build_graph(
            &[("A", CityRole::Warehouse), ("A", CityRole::Customer)],
            &[],
        )
        .unwrap_err();
        assert_eq!(err, NetworkError::DuplicateCity { id: "A".into() });

        let err = build_graph(
            &[("A", CityRole::Warehouse)],
            &[("A", "B", 1.0), ("A", "A", -1.0)],
        )
        .unwrap_err();
        assert_eq!(err, NetworkError::CityNotFound { id: "B".into() });

        let err = build_graph(
            &[("A", CityRole::Warehouse), ("B", CityRole::Customer)],
            &[("A", "B", 1.0), ("A", "B", 2.0)],
        )
        .unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateRoad { .. }));

        let err = build_graph(
            &[("A", CityRole::Warehouse), ("B", CityRole::Customer)],
            &[("A", "B", -5.0)],
        )
        .unwrap_err();
        assert!(matches!(err, NetworkError::InvalidCost { .. }));
    }

    #[test]
    fn test_new_handle_has_no_broken_roads() {
        let handle = scenario();
        assert!(handle.list_broken_roads().is_empty());
        assert_eq!(handle.list_available_roads().len(), 3);
        assert!(handle.active_pair().is_none());
        assert!(handle.recompute().is_none());
    }

    #[test]
    fn test_break_and_recompute() {
        let mut handle = scenario();
        let first = handle
            .set_active_pair("São Paulo", "Rio de Janeiro")
            .expect("cities exist");
        assert_eq!(first.cost(), Some(430.0));

        handle
            .break_road("São Paulo", "Rio de Janeiro")
            .expect("road exists");
        let rerouted = handle
            .recompute()
            .expect("active pair")
            .expect("cities exist");
        let route = rerouted.route().expect("detour exists");
        assert_eq!(route.cities(), &["São Paulo", "Campinas", "Rio de Janeiro"]);
        assert!((route.cost() - 450.0).abs() < 1e-10);
        assert_eq!(
            handle.list_broken_roads(),
            vec![("São Paulo".to_string(), "Rio de Janeiro".to_string(), 430.0)]
        );

        handle.restore_road("São Paulo", "Rio de Janeiro").expect("broken");
        assert_eq!(handle.recompute().expect("active pair"), Ok(first));
    }

    #[test]
    fn test_break_errors() {
        let mut handle = scenario();
        assert!(matches!(
            handle.break_road("Rio de Janeiro", "São Paulo"),
            Err(NetworkError::RoadNotFound { .. })
        ));
        assert!(matches!(
            handle.break_road("São Paulo", "Curitiba"),
            Err(NetworkError::CityNotFound { .. })
        ));
        assert!(matches!(
            handle.restore_road("São Paulo", "Campinas"),
            Err(NetworkError::RoadNotBroken { .. })
        ));
    }

    #[test]
    fn test_no_path_after_isolating_source() {
        let mut handle = scenario();
        handle.break_road("São Paulo", "Rio de Janeiro").expect("exists");
        handle.break_road("São Paulo", "Campinas").expect("exists");
        let outcome = handle
            .compute_route("São Paulo", "Rio de Janeiro")
            .expect("cities exist");
        assert!(outcome.is_no_path());

        assert_eq!(handle.restore_all(), 2);
        assert_eq!(handle.restore_all(), 0);
        assert!(handle
            .compute_route("São Paulo", "Rio de Janeiro")
            .expect("cities exist")
            .is_found());
    }

    #[test]
    fn test_set_active_pair_unknown_city_keeps_previous() {
        let mut handle = scenario();
        handle
            .set_active_pair("São Paulo", "Campinas")
            .expect("cities exist");
        assert!(handle.set_active_pair("São Paulo", "Curitiba").is_err());
        assert_eq!(
            handle.active_pair(),
            Some(&CityPair::new("São Paulo", "Campinas"))
        );
        handle.clear_active_pair();
        assert!(handle.recompute().is_none());
    }

    #[test]
    fn test_analyses_through_handle() {
        let mut handle = scenario();
        let pairs = handle.default_pairs();
        assert_eq!(pairs, vec![CityPair::new("São Paulo", "Rio de Janeiro")]);

        let report = handle.analyze_robustness(&pairs).expect("valid pairs");
        let direct = report
            .critical_road("São Paulo", "Rio de Janeiro")
            .expect("direct road is critical");
        assert_eq!(direct.impacts[0].cost_delta(), Some(20.0));
        assert!(handle.list_broken_roads().is_empty());

        let centrality = handle.rank_centrality(&pairs).expect("valid pairs");
        assert_eq!(centrality.path_participation[0].score, 0);

        assert_eq!(handle.statistics().roads, 3);
        assert_eq!(handle.cost_matrix().size(), 3);
        assert_eq!(
            handle
                .compare_routes("São Paulo", "Rio de Janeiro")
                .expect("cities exist")
                .len(),
            2
        );
    }
}
