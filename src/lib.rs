//! # u-roadnet
//!
//! Delivery network analysis library: models a network of cities and
//! directed, costed roads, finds minimum-cost routes by exhaustive
//! simple-path search, simulates road and city failures, and ranks the
//! roads and cities the network depends on.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (City, Road, Route, RoadNetwork, BrokenRoadSet)
//! - [`pathfinding`] — Exhaustive minimum-cost path search and route enumeration
//! - [`evaluation`] — Cost of explicit city sequences on the current network
//! - [`matrix`] — Direct road cost matrix
//! - [`failure`] — Road and city failure simulation
//! - [`analysis`] — Robustness, centrality, and summary statistics
//! - [`session`] — Session handle used by front ends and report generators
//! - [`config`] — Network definitions from TOML
//! - [`error`] — Error types
//!
//! The path search enumerates every simple path, so it is exponential in the
//! branching factor and meant for networks of tens of cities. All operations run synchronously
//! on the caller's thread; a network must not be mutated while a search over
//! it is in progress, which the borrow checker enforces for a single owner.

pub mod analysis;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod failure;
pub mod matrix;
pub mod models;
pub mod pathfinding;
pub mod session;

pub use error::{ConfigError, NetworkError, Result};
pub use session::{build_graph, GraphHandle};
