//! Dense direct-cost matrix.

use serde::Serialize;

use crate::models::RoadNetwork;

/// A dense n×n matrix of direct road costs stored in row-major order.
///
/// Rows and columns follow city insertion order. An entry is `None` when no
/// available road connects the two cities directly; broken roads are
/// absent.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
/// use u_roadnet::matrix::CostMatrix;
///
/// let mut net = RoadNetwork::new();
/// net.add_city("A", CityRole::Warehouse).unwrap();
/// net.add_city("B", CityRole::Customer).unwrap();
/// net.add_road("A", "B", 7.0).unwrap();
///
/// let m = CostMatrix::from_network(&net);
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.get(0, 1), Some(7.0));
/// assert_eq!(m.get(1, 0), None);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CostMatrix {
    city_ids: Vec<String>,
    data: Vec<Option<f64>>,
    size: usize,
}

impl CostMatrix {
    /// Builds the matrix from the available roads of `network`.
    pub fn from_network(network: &RoadNetwork) -> Self {
        let size = network.city_count();
        let mut data = vec![None; size * size];
        for road in network.roads() {
            if let Some(from) = network.index_of(road.from()) {
                data[from * size + road.target] = Some(road.cost());
            }
        }
        Self {
            city_ids: network.cities().iter().map(|c| c.id().to_string()).collect(),
            data,
            size,
        }
    }

    /// Returns the direct cost from row `from` to column `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.data[from * self.size + to]
    }

    /// Returns the direct cost between two cities by identifier.
    pub fn get_by_id(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.position(from)?;
        let j = self.position(to)?;
        self.get(i, j)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.city_ids.iter().position(|c| c == id)
    }

    /// Number of cities (rows and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// City identifiers labelling rows and columns.
    pub fn city_ids(&self) -> &[String] {
        &self.city_ids
    }

    /// Returns `true` if every road has a reverse road of the same cost
    /// within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                match (self.get(i, j), self.get(j, i)) {
                    (None, None) => {}
                    (Some(a), Some(b)) if (a - b).abs() <= tol => {}
                    _ => return false,
                }
            }
        }
        true
    }

    fn costs(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flatten().copied()
    }

    /// Cheapest direct road, if any.
    pub fn min_cost(&self) -> Option<f64> {
        self.costs().min_by(f64::total_cmp)
    }

    /// Most expensive direct road, if any.
    pub fn max_cost(&self) -> Option<f64> {
        self.costs().max_by(f64::total_cmp)
    }

    /// Mean direct road cost, if any road exists.
    pub fn mean_cost(&self) -> Option<f64> {
        let (sum, n) = self.costs().fold((0.0, 0usize), |(s, n), c| (s + c, n + 1));
        (n > 0).then(|| sum / n as f64)
    }
}
