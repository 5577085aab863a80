//! City centrality rankings.
//!
//! Two measures over the current network (broken roads excluded):
//! degree (roads in plus roads out) and path participation (how many
//! minimum-cost routes of the pairs of interest pass through a city).
//! Rankings are descending by score, ties broken by city identifier.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::models::{CityPair, RoadNetwork};
use crate::pathfinding::find_min_cost_path;

/// Degree centrality of one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeScore {
    pub city: String,
    pub in_degree: usize,
    pub out_degree: usize,
    /// `in_degree + out_degree`.
    pub degree: usize,
    /// `degree / (n - 1)`; zero for single-city networks.
    pub normalized: f64,
}

/// Path-participation count of one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityScore {
    pub city: String,
    pub score: usize,
}

/// Both rankings, as consumed by report generators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    pub degree: Vec<DegreeScore>,
    pub path_participation: Vec<CityScore>,
}

impl CentralityReport {
    /// The city ranked first by path participation, if any city exists.
    pub fn most_traversed(&self) -> Option<&CityScore> {
        self.path_participation.first()
    }

    /// The city ranked first by degree, if any city exists.
    pub fn most_connected(&self) -> Option<&DegreeScore> {
        self.degree.first()
    }

    /// Serializes this report to a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Ranks every city by degree (in + out) over the available roads.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
/// use u_roadnet::analysis::degree_centrality;
///
/// let mut net = RoadNetwork::new();
/// net.add_city("A", CityRole::Warehouse).unwrap();
/// net.add_city("B", CityRole::Intermediate).unwrap();
/// net.add_city("C", CityRole::Customer).unwrap();
/// net.add_road("A", "B", 1.0).unwrap();
/// net.add_road("B", "C", 1.0).unwrap();
///
/// let ranking = degree_centrality(&net);
/// assert_eq!(ranking[0].city, "B");
/// assert_eq!(ranking[0].degree, 2);
/// assert_eq!(ranking[0].normalized, 1.0);
/// ```
pub fn degree_centrality(network: &RoadNetwork) -> Vec<DegreeScore> {
    let n = network.city_count();
    let mut scores: Vec<DegreeScore> = network
        .cities()
        .iter()
        .map(|c| {
            let in_degree = network.in_degree(c.id());
            let out_degree = network.out_degree(c.id());
            let degree = in_degree + out_degree;
            let normalized = if n > 1 {
                degree as f64 / (n - 1) as f64
            } else {
                0.0
            };
            DegreeScore {
                city: c.id().to_string(),
                in_degree,
                out_degree,
                degree,
                normalized,
            }
        })
        .collect();
    scores.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.city.cmp(&b.city)));
    scores
}

/// Ranks every city by how many minimum-cost routes of `pairs` pass
/// through it as an intermediate stop. Endpoints do not count, and
/// unreachable pairs contribute nothing.
///
/// # Errors
///
/// [`NetworkError::CityNotFound`](crate::error::NetworkError::CityNotFound)
/// if a pair names an unknown city.
pub fn path_participation(network: &RoadNetwork, pairs: &[CityPair]) -> Result<Vec<CityScore>> {
    let mut counts: HashMap<&str, usize> = network.cities().iter().map(|c| (c.id(), 0)).collect();

    for pair in pairs {
        let outcome = find_min_cost_path(network, &pair.from, &pair.to)?;
        if let Some(route) = outcome.route() {
            for city in route.intermediates() {
                if let Some(count) = counts.get_mut(city.as_str()) {
                    *count += 1;
                }
            }
        }
    }

    let mut scores: Vec<CityScore> = counts
        .into_iter()
        .map(|(city, score)| CityScore {
            city: city.to_string(),
            score,
        })
        .collect();
    scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.city.cmp(&b.city)));
    Ok(scores)
}

/// Computes both centrality rankings for `pairs`.
pub fn rank_centrality(network: &RoadNetwork, pairs: &[CityPair]) -> Result<CentralityReport> {
    let path_participation = path_participation(network, pairs)?;
    let degree = degree_centrality(network);
    info!(
        cities = degree.len(),
        pairs = pairs.len(),
        "centrality ranking complete"
    );
    Ok(CentralityReport {
        degree,
        path_participation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::models::CityRole;

    fn hub_network() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        net.add_city("W", CityRole::Warehouse).expect("unique city");
        net.add_city("Hub", CityRole::Intermediate).expect("unique city");
        net.add_city("X", CityRole::Intermediate).expect("unique city");
        net.add_city("C1", CityRole::Customer).expect("unique city");
        net.add_city("C2", CityRole::Customer).expect("unique city");
        net.add_road("W", "Hub", 1.0).expect("valid road");
        net.add_road("Hub", "C1", 1.0).expect("valid road");
        net.add_road("Hub", "X", 1.0).expect("valid road");
        net.add_road("X", "C2", 1.0).expect("valid road");
        net.add_road("W", "C2", 10.0).expect("valid road");
        net
    }

    fn names(scores: &[CityScore]) -> Vec<(&str, usize)> {
        scores.iter().map(|s| (s.city.as_str(), s.score)).collect()
    }

    #[test]
    fn test_degree_ranking() {
        let ranking = degree_centrality(&hub_network());
        let top: Vec<_> = ranking.iter().map(|s| (s.city.as_str(), s.degree)).collect();
        assert_eq!(
            top,
            vec![("Hub", 3), ("C2", 2), ("W", 2), ("X", 2), ("C1", 1)]
        );
    }

    #[test]
    fn test_degree_ignores_broken_roads() {
        let mut net = hub_network();
        net.remove_road("Hub", "X").expect("exists");
        let ranking = degree_centrality(&net);
        let hub = ranking.iter().find(|s| s.city == "Hub").expect("listed");
        assert_eq!(hub.in_degree, 1);
        assert_eq!(hub.out_degree, 1);
        assert!((hub.normalized - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_path_participation() {
        let net = hub_network();
        let scores = path_participation(&net, &net.default_pairs()).expect("valid pairs");
        // W->C1 via Hub; W->C2 via Hub, X (cost 3 beats direct 10).
        assert_eq!(
            names(&scores),
            vec![("Hub", 2), ("X", 1), ("C1", 0), ("C2", 0), ("W", 0)]
        );
    }

    #[test]
    fn test_path_participation_after_failure() {
        let mut net = hub_network();
        net.remove_road("X", "C2").expect("exists");
        let scores = path_participation(&net, &net.default_pairs()).expect("valid pairs");
        assert_eq!(scores[0].city, "Hub");
        assert_eq!(scores[0].score, 1);
        assert_eq!(scores.iter().find(|s| s.city == "X").map(|s| s.score), Some(0));
    }

    #[test]
    fn test_path_participation_unknown_city() {
        let net = hub_network();
        assert!(matches!(
            path_participation(&net, &[CityPair::new("W", "Nowhere")]),
            Err(NetworkError::CityNotFound { .. })
        ));
    }

    #[test]
    fn test_rank_centrality() {
        let net = hub_network();
        let report = rank_centrality(&net, &net.default_pairs()).expect("valid pairs");
        assert_eq!(report.most_traversed().map(|s| s.city.as_str()), Some("Hub"));
        assert_eq!(report.most_connected().map(|s| s.city.as_str()), Some("Hub"));
        assert_eq!(report.degree.len(), 5);
        assert_eq!(report.path_participation.len(), 5);
    }

    #[test]
    fn test_single_city_network() {
        let mut net = RoadNetwork::new();
        net.add_city("Only", CityRole::Warehouse).expect("unique city");
        let ranking = degree_centrality(&net);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].normalized, 0.0);
    }
}
