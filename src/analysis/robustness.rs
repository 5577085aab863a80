//! Robustness analysis: which roads and cities the pairs of interest
//! depend on.
//!
//! Each available road is broken in turn, every pair of interest is routed
//! again, and the road is restored. A road is critical when its failure
//! makes a previously reachable pair unreachable or strictly more
//! expensive. Each city is then isolated the same way (all of its incident
//! roads broken); a city is critical when its outage disconnects a pair it
//! is not an endpoint of.
//!
//! The network is returned to its exact prior state, broken roads included.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{NetworkError, Result};
use crate::failure::FailureSimulator;
use crate::models::{CityPair, CityRole, RoadNetwork};
use crate::pathfinding::find_min_cost_path;

/// How a failure affected one pair of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImpactKind {
    /// The pair had a route and now has none.
    Disconnected { cost_before: f64 },
    /// The pair still has a route, but a strictly more expensive one.
    CostIncreased {
        cost_before: f64,
        cost_after: f64,
        delta: f64,
    },
}

/// Impact of a failure on a single pair of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairImpact {
    pub pair: CityPair,
    pub impact: ImpactKind,
}

impl PairImpact {
    pub fn is_disconnection(&self) -> bool {
        matches!(self.impact, ImpactKind::Disconnected { .. })
    }

    /// Cost increase for rerouted pairs; `None` for disconnected ones.
    pub fn cost_delta(&self) -> Option<f64> {
        match self.impact {
            ImpactKind::CostIncreased { delta, .. } => Some(delta),
            ImpactKind::Disconnected { .. } => None,
        }
    }
}

/// How badly a critical road hurts the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// At least one pair becomes unreachable.
    Disconnects,
    /// Every affected pair is rerouted at a higher cost.
    IncreasesCost,
}

/// A road whose failure affects at least one pair of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalRoad {
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub severity: Severity,
    /// Affected pairs, in pair order.
    pub impacts: Vec<PairImpact>,
    /// Sum of cost deltas over rerouted pairs.
    pub total_cost_increase: f64,
}

impl CriticalRoad {
    fn new(from: String, to: String, cost: f64, impacts: Vec<PairImpact>) -> Self {
        let severity = if impacts.iter().any(PairImpact::is_disconnection) {
            Severity::Disconnects
        } else {
            Severity::IncreasesCost
        };
        let total_cost_increase = impacts.iter().filter_map(PairImpact::cost_delta).sum();
        Self {
            from,
            to,
            cost,
            severity,
            impacts,
            total_cost_increase,
        }
    }

    /// Pairs this road's failure disconnects.
    pub fn disconnected_pairs(&self) -> Vec<&CityPair> {
        disconnected(&self.impacts)
    }
}

/// A city whose outage disconnects at least one pair it is not an
/// endpoint of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalCity {
    pub city: String,
    /// Every affected pair: disconnections and cost increases.
    pub impacts: Vec<PairImpact>,
}

impl CriticalCity {
    /// Pairs this city's outage disconnects (never empty).
    pub fn disconnected_pairs(&self) -> Vec<&CityPair> {
        disconnected(&self.impacts)
    }
}

fn disconnected(impacts: &[PairImpact]) -> Vec<&CityPair> {
    impacts
        .iter()
        .filter(|i| i.is_disconnection())
        .map(|i| &i.pair)
        .collect()
}

/// A non-warehouse city with exactly one road in or exactly one road out:
/// a single point of passage regardless of the pairs of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowConnectivityCity {
    pub city: String,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// Outcome of [`analyze_robustness`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobustnessReport {
    /// Pairs the analysis was evaluated against.
    pub pairs: Vec<CityPair>,
    /// Baseline minimum cost per pair (`None` when already unreachable).
    pub baseline_costs: Vec<Option<f64>>,
    /// Critical roads in road listing order.
    pub critical_roads: Vec<CriticalRoad>,
    /// Critical cities in city insertion order.
    pub critical_cities: Vec<CriticalCity>,
    pub low_connectivity_cities: Vec<LowConnectivityCity>,
    pub roads_examined: usize,
    pub cities_examined: usize,
}

impl RobustnessReport {
    /// Looks up the critical road `from -> to`.
    pub fn critical_road(&self, from: &str, to: &str) -> Option<&CriticalRoad> {
        self.critical_roads
            .iter()
            .find(|r| r.from == from && r.to == to)
    }

    /// Looks up a critical city.
    pub fn critical_city(&self, city: &str) -> Option<&CriticalCity> {
        self.critical_cities.iter().find(|c| c.city == city)
    }

    /// Serializes this report to a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Reroutes every pair in `baseline` on the failed network and reports the
/// pairs that got worse. Pairs unreachable at baseline are never affected.
fn assess(network: &RoadNetwork, baseline: &[(&CityPair, Option<f64>)]) -> Result<Vec<PairImpact>> {
    let mut impacts = Vec::new();
    for &(pair, before) in baseline {
        let Some(cost_before) = before else {
            continue;
        };
        let impact = match find_min_cost_path(network, &pair.from, &pair.to)?.cost() {
            None => ImpactKind::Disconnected { cost_before },
            Some(cost_after) if cost_after > cost_before => ImpactKind::CostIncreased {
                cost_before,
                cost_after,
                delta: cost_after - cost_before,
            },
            Some(_) => continue,
        };
        impacts.push(PairImpact {
            pair: pair.clone(),
            impact,
        });
    }
    Ok(impacts)
}

/// Finds the critical roads and cities of `network` for `pairs`.
///
/// The network is mutated during the analysis and restored before
/// returning, so its available and broken roads are unchanged afterwards.
/// Roads already broken are not examined.
///
/// # Errors
///
/// [`NetworkError::CityNotFound`] if a pair names an unknown city; checked
/// before anything is mutated.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityPair, CityRole, RoadNetwork};
/// use u_roadnet::analysis::{analyze_robustness, Severity};
///
/// let mut net = RoadNetwork::new();
/// net.add_city("W", CityRole::Warehouse).unwrap();
/// net.add_city("M", CityRole::Intermediate).unwrap();
/// net.add_city("C", CityRole::Customer).unwrap();
/// net.add_road("W", "M", 1.0).unwrap();
/// net.add_road("M", "C", 1.0).unwrap();
/// net.add_road("W", "C", 5.0).unwrap();
///
/// let report = analyze_robustness(&mut net, &[CityPair::new("W", "C")]).unwrap();
/// // Losing W->M or M->C reroutes through W->C at a higher cost.
/// assert_eq!(report.critical_roads.len(), 2);
/// assert_eq!(report.critical_roads[0].severity, Severity::IncreasesCost);
/// // Isolating M still leaves W->C, so M is not critical.
/// assert!(report.critical_cities.is_empty());
/// ```
pub fn analyze_robustness(network: &mut RoadNetwork, pairs: &[CityPair]) -> Result<RobustnessReport> {
    for pair in pairs {
        for id in [&pair.from, &pair.to] {
            if !network.contains_city(id) {
                return Err(NetworkError::city_not_found(id));
            }
        }
    }

    let mut baseline_costs = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let cost = find_min_cost_path(network, &pair.from, &pair.to)?.cost();
        if cost.is_none() {
            warn!(from = %pair.from, to = %pair.to, "pair unreachable before any failure");
        }
        baseline_costs.push(cost);
    }
    let baseline: Vec<(&CityPair, Option<f64>)> =
        pairs.iter().zip(baseline_costs.iter().copied()).collect();

    let roads: Vec<(String, String, f64)> = network.roads().map(|r| r.to_triple()).collect();
    let city_ids: Vec<String> = network
        .cities()
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    let mut sim = FailureSimulator::new(network);

    let mut critical_roads = Vec::new();
    for (from, to, cost) in &roads {
        let impacts = sim.with_road_broken(from, to, |net| assess(net, &baseline))??;
        if !impacts.is_empty() {
            critical_roads.push(CriticalRoad::new(from.clone(), to.clone(), *cost, impacts));
        }
    }

    let mut critical_cities = Vec::new();
    let mut cities_examined = 0;
    for city in &city_ids {
        let relevant: Vec<(&CityPair, Option<f64>)> = baseline
            .iter()
            .copied()
            .filter(|(pair, _)| !pair.has_endpoint(city))
            .collect();
        if relevant.is_empty() {
            continue;
        }
        cities_examined += 1;
        let impacts = sim.with_city_failed(city, |net| assess(net, &relevant))??;
        if impacts.iter().any(PairImpact::is_disconnection) {
            critical_cities.push(CriticalCity {
                city: city.clone(),
                impacts,
            });
        }
    }

    let network = sim.network();
    let low_connectivity_cities = network
        .cities()
        .iter()
        .filter(|c| c.role() != CityRole::Warehouse)
        .filter_map(|c| {
            let in_degree = network.in_degree(c.id());
            let out_degree = network.out_degree(c.id());
            (in_degree == 1 || out_degree == 1).then(|| LowConnectivityCity {
                city: c.id().to_string(),
                in_degree,
                out_degree,
            })
        })
        .collect();

    info!(
        pairs = pairs.len(),
        roads = roads.len(),
        critical_roads = critical_roads.len(),
        critical_cities = critical_cities.len(),
        "robustness analysis complete"
    );

    Ok(RobustnessReport {
        pairs: pairs.to_vec(),
        baseline_costs,
        critical_roads,
        critical_cities,
        low_connectivity_cities,
        roads_examined: roads.len(),
        cities_examined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Road;

    fn build(cities: &[(&str, CityRole)], roads: &[(&str, &str, f64)]) -> RoadNetwork {
        let mut net = RoadNetwork::new();
        for &(id, role) in cities {
            net.add_city(id, role).expect("unique city");
        }
        for &(a, b, cost) in roads {
            net.add_road(a, b, cost).expect("valid road");
        }
        net
    }

    /// W -> M -> C is the only way to C; W -> D is a direct second customer.
    fn chain() -> RoadNetwork {
        build(
            &[
                ("W", CityRole::Warehouse),
                ("M", CityRole::Intermediate),
                ("C", CityRole::Customer),
                ("D", CityRole::Customer),
            ],
            &[("W", "M", 2.0), ("M", "C", 3.0), ("W", "D", 4.0), ("M", "D", 1.0)],
        )
    }

    #[test]
    fn test_disconnecting_road() {
        let mut net = chain();
        let pairs = net.default_pairs();
        let report = analyze_robustness(&mut net, &pairs).expect("valid pairs");

        let wm = report.critical_road("W", "M").expect("W->M is critical");
        assert_eq!(wm.severity, Severity::Disconnects);
        assert_eq!(wm.disconnected_pairs(), vec![&CityPair::new("W", "C")]);

        let mc = report.critical_road("M", "C").expect("M->C is critical");
        assert_eq!(mc.severity, Severity::Disconnects);
    }

    #[test]
    fn test_cost_increasing_road() {
        let mut net = chain();
        let pairs = net.default_pairs();
        let report = analyze_robustness(&mut net, &pairs).expect("valid pairs");

        // W->D (4) vs W->M->D (3): losing W->M also raises W->D by 1.
        let wm = report.critical_road("W", "M").expect("W->M is critical");
        let d_impact = wm
            .impacts
            .iter()
            .find(|i| i.pair == CityPair::new("W", "D"))
            .expect("W->D affected");
        assert_eq!(d_impact.cost_delta(), Some(1.0));
        assert!((wm.total_cost_increase - 1.0).abs() < 1e-10);

        // Losing M->D falls back to W->D at +1.
        let md = report.critical_road("M", "D").expect("M->D is critical");
        assert_eq!(md.severity, Severity::IncreasesCost);
        assert!((md.total_cost_increase - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_critical_road() {
        let mut net = chain();
        let pairs = net.default_pairs();
        let report = analyze_robustness(&mut net, &pairs).expect("valid pairs");
        // W->D is not on any minimum-cost route.
        assert!(report.critical_road("W", "D").is_none());
        assert_eq!(report.roads_examined, 4);
    }

    #[test]
    fn test_critical_city() {
        let mut net = chain();
        let pairs = net.default_pairs();
        let report = analyze_robustness(&mut net, &pairs).expect("valid pairs");

        let m = report.critical_city("M").expect("M is critical");
        assert_eq!(m.disconnected_pairs(), vec![&CityPair::new("W", "C")]);
        // W->D is rerouted, not disconnected.
        assert!(m
            .impacts
            .iter()
            .any(|i| i.pair == CityPair::new("W", "D") && i.cost_delta() == Some(1.0)));

        // Endpoints are never critical for their own pairs.
        assert!(report.critical_city("W").is_none());
        assert!(report.critical_city("C").is_none());
    }

    #[test]
    fn test_endpoint_of_one_pair_can_be_critical_for_another() {
        let mut net = build(
            &[
                ("W", CityRole::Warehouse),
                ("C1", CityRole::Customer),
                ("C2", CityRole::Customer),
            ],
            &[("W", "C1", 1.0), ("C1", "C2", 1.0)],
        );
        let pairs = net.default_pairs();
        let report = analyze_robustness(&mut net, &pairs).expect("valid pairs");

        // C1 ends W->C1 but is only a stop on W->C2, which it disconnects.
        let c1 = report.critical_city("C1").expect("C1 is critical");
        assert_eq!(c1.disconnected_pairs(), vec![&CityPair::new("W", "C2")]);
        assert!(c1.impacts.iter().all(|i| i.pair != CityPair::new("W", "C1")));

        assert!(report.critical_city("C2").is_none());
        assert!(report.critical_city("W").is_none());
        assert_eq!(report.cities_examined, 2);
    }

    #[test]
    fn test_network_unchanged_after_analysis() {
        let mut net = chain();
        net.remove_road("W", "D").expect("exists");
        let roads: Vec<_> = net.roads().map(Road::to_triple).collect();
        let broken: Vec<_> = net.broken().iter().map(Road::to_triple).collect();

        let pairs = net.default_pairs();
        analyze_robustness(&mut net, &pairs).expect("valid pairs");

        assert_eq!(net.roads().map(Road::to_triple).collect::<Vec<_>>(), roads);
        assert_eq!(net.broken().iter().map(Road::to_triple).collect::<Vec<_>>(), broken);
    }

    #[test]
    fn test_unreachable_pair_is_never_affected() {
        let mut net = build(
            &[("W", CityRole::Warehouse), ("C", CityRole::Customer)],
            &[("C", "W", 1.0)],
        );
        let report =
            analyze_robustness(&mut net, &[CityPair::new("W", "C")]).expect("valid pairs");
        assert_eq!(report.baseline_costs, vec![None]);
        assert!(report.critical_roads.is_empty());
        assert!(report.critical_cities.is_empty());
    }

    #[test]
    fn test_unknown_pair_city() {
        let mut net = chain();
        let err = analyze_robustness(&mut net, &[CityPair::new("W", "Nowhere")]).unwrap_err();
        assert_eq!(err, NetworkError::CityNotFound { id: "Nowhere".into() });
        assert!(net.broken().is_empty());
    }

    #[test]
    fn test_low_connectivity_cities() {
        let mut net = chain();
        let pairs = net.default_pairs();
        let report = analyze_robustness(&mut net, &pairs).expect("valid pairs");
        let names: Vec<_> = report
            .low_connectivity_cities
            .iter()
            .map(|c| c.city.as_str())
            .collect();
        // M: in 1, out 2. C: in 1, out 0. D: in 2, out 0. W is a warehouse.
        assert_eq!(names, vec!["M", "C"]);
    }

    #[test]
    fn test_no_pairs() {
        let mut net = chain();
        let report = analyze_robustness(&mut net, &[]).expect("nothing to validate");
        assert!(report.critical_roads.is_empty());
        assert!(report.critical_cities.is_empty());
        assert_eq!(report.cities_examined, 0);
    }
}
