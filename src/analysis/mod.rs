//! Whole-network analyses built on route search and failure simulation.
//!
//! - [`robustness`] — Critical roads and cities for a set of city pairs
//! - [`centrality`] — Degree and path-participation rankings
//! - [`statistics`] — Size, density, degree, cost and connectivity summary

pub mod centrality;
pub mod robustness;
pub mod statistics;

pub use centrality::{
    degree_centrality, path_participation, rank_centrality, CentralityReport, CityScore,
    DegreeScore,
};
pub use robustness::{
    analyze_robustness, CriticalCity, CriticalRoad, ImpactKind, LowConnectivityCity,
    PairImpact, RobustnessReport, Severity,
};
pub use statistics::{strongly_connected_components, NetworkStats};
