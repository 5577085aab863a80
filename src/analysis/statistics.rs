//! Network summary statistics.

use serde::Serialize;

use crate::models::RoadNetwork;

/// Size, density, degree, cost and connectivity summary of a network's
/// available roads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub cities: usize,
    pub roads: usize,
    pub broken_roads: usize,
    /// `roads / (cities * (cities - 1))`; zero below two cities.
    pub density: f64,
    /// Mean of in-degree plus out-degree.
    pub average_degree: f64,
    pub average_in_degree: f64,
    pub average_out_degree: f64,
    pub total_cost: f64,
    pub mean_cost: f64,
    pub strongly_connected_components: usize,
    pub largest_component: usize,
}

impl NetworkStats {
    /// Computes statistics over the available (non-broken) roads.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_roadnet::models::{CityRole, RoadNetwork};
    /// use u_roadnet::analysis::NetworkStats;
    ///
    /// let mut net = RoadNetwork::new();
    /// net.add_city("A", CityRole::Warehouse).unwrap();
    /// net.add_city("B", CityRole::Customer).unwrap();
    /// net.add_road("A", "B", 4.0).unwrap();
    /// net.add_road("B", "A", 6.0).unwrap();
    ///
    /// let stats = NetworkStats::compute(&net);
    /// assert_eq!(stats.density, 1.0);
    /// assert_eq!(stats.mean_cost, 5.0);
    /// assert_eq!(stats.strongly_connected_components, 1);
    /// ```
    pub fn compute(network: &RoadNetwork) -> Self {
        let n = network.city_count();
        let m = network.road_count();
        let total_cost: f64 = network.roads().map(|r| r.cost()).sum();
        let ratio = |num: f64, den: usize| if den == 0 { 0.0 } else { num / den as f64 };

        let components = strongly_connected_components(network);
        let largest_component = components.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            cities: n,
            roads: m,
            broken_roads: network.broken().len(),
            density: if n < 2 {
                0.0
            } else {
                m as f64 / (n * (n - 1)) as f64
            },
            average_degree: ratio(2.0 * m as f64, n),
            average_in_degree: ratio(m as f64, n),
            average_out_degree: ratio(m as f64, n),
            total_cost,
            mean_cost: ratio(total_cost, m),
            strongly_connected_components: components.len(),
            largest_component,
        }
    }

    /// Serializes these statistics to a JSON string.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Strongly connected components over the available roads (Kosaraju).
///
/// Each component lists city ids in insertion order; components are
/// ordered by the insertion position of their first city.
pub fn strongly_connected_components(network: &RoadNetwork) -> Vec<Vec<String>> {
    let n = network.city_count();
    let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for road in network.outgoing_at(i) {
            reverse[road.target].push(i);
        }
    }

    // Pass 1: finish order on the forward graph, iteratively.
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack = vec![(start, 0usize)];
        while let Some((node, next)) = stack.pop() {
            let roads = network.outgoing_at(node);
            if next < roads.len() {
                stack.push((node, next + 1));
                let target = roads[next].target;
                if !visited[target] {
                    visited[target] = true;
                    stack.push((target, 0));
                }
            } else {
                order.push(node);
            }
        }
    }

    // Pass 2: collect components on the reversed graph.
    let mut component_of = vec![usize::MAX; n];
    let mut count = 0;
    for &start in order.iter().rev() {
        if component_of[start] != usize::MAX {
            continue;
        }
        component_of[start] = count;
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for &prev in &reverse[node] {
                if component_of[prev] == usize::MAX {
                    component_of[prev] = count;
                    stack.push(prev);
                }
            }
        }
        count += 1;
    }

    let cities = network.cities();
    let mut slot_of_component = vec![usize::MAX; count];
    let mut components: Vec<Vec<String>> = Vec::with_capacity(count);
    for (i, &c) in component_of.iter().enumerate() {
        if slot_of_component[c] == usize::MAX {
            slot_of_component[c] = components.len();
            components.push(Vec::new());
        }
        components[slot_of_component[c]].push(cities[i].id().to_string());
    }
    components
}
