//! Domain model types for delivery road networks.
//!
//! Provides the core abstractions: cities tagged with a role, directed
//! costed roads, the network that owns them together with the set of
//! currently broken roads, and routes as ordered city sequences.

mod broken;
mod city;
mod network;
mod road;
mod route;

pub use broken::BrokenRoadSet;
pub use city::{City, CityRole};
pub use network::RoadNetwork;
pub use road::Road;
pub use route::{CityPair, Route, RouteOutcome};
