//! Route search over a [`RoadNetwork`](crate::models::RoadNetwork).
//!
//! - [`find_min_cost_path`] — Minimum-cost simple path by exhaustive DFS, O(b^d)
//! - [`enumerate_routes`] — Every simple path, sorted by cost, O(b^d)
//!
//! Both enumerate simple paths rather than running a shortest-path
//! algorithm: the equal-cost tie-break depends on enumeration order, which
//! follows each city's outgoing roads in insertion order.

mod exhaustive;

pub use exhaustive::{enumerate_routes, find_min_cost_path};
