//! Exhaustive simple-path search.
//!
//! Depth-first enumeration of every simple path (no repeated city) from a
//! source to a destination. Outgoing roads are followed in their stored
//! order, and the visited set of the current partial path prevents cycles.
//!
//! # Complexity
//!
//! Exponential in the branching factor of the network. Intended for
//! networks of tens of cities.

use tracing::trace;

use crate::error::{NetworkError, Result};
use crate::models::{RoadNetwork, Route, RouteOutcome};

/// Depth-first walker that reports every simple path reaching `target`.
struct SimplePathWalk<'a, F> {
    network: &'a RoadNetwork,
    target: usize,
    visited: Vec<bool>,
    path: Vec<usize>,
    on_path: F,
}

impl<F: FnMut(&[usize], f64)> SimplePathWalk<'_, F> {
    fn descend(&mut self, current: usize, cost: f64) {
        if current == self.target {
            (self.on_path)(&self.path, cost);
            return;
        }

        self.visited[current] = true;
        let network = self.network;
        for road in network.outgoing_at(current) {
            if self.visited[road.target] {
                continue;
            }
            self.path.push(road.target);
            self.descend(road.target, cost + road.cost());
            self.path.pop();
        }
        self.visited[current] = false;
    }
}

/// Runs the DFS from `from` to `to`, calling `on_path` with the city
/// indices and accumulated cost of each simple path, in discovery order.
fn walk_simple_paths<F>(network: &RoadNetwork, from: &str, to: &str, on_path: F) -> Result<()>
where
    F: FnMut(&[usize], f64),
{
    let source = network
        .index_of(from)
        .ok_or_else(|| NetworkError::city_not_found(from))?;
    let target = network
        .index_of(to)
        .ok_or_else(|| NetworkError::city_not_found(to))?;

    let mut walk = SimplePathWalk {
        network,
        target,
        visited: vec![false; network.city_count()],
        path: vec![source],
        on_path,
    };
    walk.descend(source, 0.0);
    Ok(())
}

fn to_route(network: &RoadNetwork, path: &[usize], cost: f64) -> Route {
    let cities = network.cities();
    Route::new(path.iter().map(|&i| cities[i].id().to_string()).collect(), cost)
}

/// Finds the minimum-cost simple path from `from` to `to`.
///
/// Every simple path is enumerated; a path replaces the current best only
/// when its cost is strictly lower, so among equal-cost paths the first one
/// discovered wins. `from == to` yields a single-city route of cost 0.
///
/// # Errors
///
/// [`NetworkError::CityNotFound`] if either city is absent. An unreachable
/// destination is not an error: it yields [`RouteOutcome::NoPath`].
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
/// use u_roadnet::pathfinding::find_min_cost_path;
///
/// let mut net = RoadNetwork::new();
/// net.add_city("São Paulo", CityRole::Warehouse).unwrap();
/// net.add_city("Campinas", CityRole::Intermediate).unwrap();
/// net.add_city("Rio de Janeiro", CityRole::Customer).unwrap();
/// net.add_road("São Paulo", "Rio de Janeiro", 430.0).unwrap();
/// net.add_road("São Paulo", "Campinas", 100.0).unwrap();
/// net.add_road("Campinas", "Rio de Janeiro", 350.0).unwrap();
///
/// let outcome = find_min_cost_path(&net, "São Paulo", "Rio de Janeiro").unwrap();
/// assert_eq!(outcome.cost(), Some(430.0));
///
/// net.remove_road("São Paulo", "Rio de Janeiro").unwrap();
/// let outcome = find_min_cost_path(&net, "São Paulo", "Rio de Janeiro").unwrap();
/// let route = outcome.route().unwrap();
/// assert_eq!(route.cities(), &["São Paulo", "Campinas", "Rio de Janeiro"]);
/// assert_eq!(route.cost(), 450.0);
/// ```
pub fn find_min_cost_path(network: &RoadNetwork, from: &str, to: &str) -> Result<RouteOutcome> {
    let mut best: Option<(Vec<usize>, f64)> = None;
    let mut explored = 0usize;

    walk_simple_paths(network, from, to, |path, cost| {
        explored += 1;
        if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
            trace!(from, to, cost, hops = path.len() - 1, "new best path");
            best = Some((path.to_vec(), cost));
        }
    })?;

    trace!(from, to, explored, "path search finished");
    Ok(match best {
        Some((path, cost)) => RouteOutcome::Found(to_route(network, &path, cost)),
        None => RouteOutcome::no_path(from, to),
    })
}

/// Lists every simple path from `from` to `to`, sorted by ascending cost.
///
/// Equal-cost routes keep their discovery order, so the first element is
/// always the route [`find_min_cost_path`] returns. Empty when the
/// destination is unreachable.
///
/// # Errors
///
/// [`NetworkError::CityNotFound`] if either city is absent.
pub fn enumerate_routes(network: &RoadNetwork, from: &str, to: &str) -> Result<Vec<Route>> {
    let mut routes = Vec::new();
    walk_simple_paths(network, from, to, |path, cost| {
        routes.push(to_route(network, path, cost));
    })?;
    routes.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
    Ok(routes)
}
