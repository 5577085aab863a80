//! Route evaluator that recomputes the cost of an explicit city sequence.

use crate::error::{NetworkError, Result};
use crate::models::{RoadNetwork, Route};

/// Evaluates explicit city sequences against a network, summing the costs
/// of the available roads between consecutive cities.
///
/// Useful to check whether a previously computed route survives a set of
/// road failures, and what it costs now.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{CityRole, RoadNetwork};
/// use u_roadnet::evaluation::RouteEvaluator;
///
/// let mut net = RoadNetwork::new();
/// net.add_city("A", CityRole::Warehouse).unwrap();
/// net.add_city("B", CityRole::Intermediate).unwrap();
/// net.add_city("C", CityRole::Customer).unwrap();
/// net.add_road("A", "B", 2.0).unwrap();
/// net.add_road("B", "C", 3.0).unwrap();
///
/// let evaluator = RouteEvaluator::new(&net);
/// let route = evaluator.evaluate(&["A", "B", "C"]).unwrap();
/// assert_eq!(route.cost(), 5.0);
/// assert!(evaluator.evaluate(&["A", "C"]).is_err());
/// ```
pub struct RouteEvaluator<'a> {
    network: &'a RoadNetwork,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given network.
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    /// Builds a route from a sequence of city ids, computing its cost.
    ///
    /// A single city yields a stationary route of cost 0.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::EmptyRoute`] if the sequence is empty
    /// - [`NetworkError::CityNotFound`] if the sequence names an unknown city
    /// - [`NetworkError::RoadNotFound`] if a leg has no available road
    pub fn evaluate<S: AsRef<str>>(&self, cities: &[S]) -> Result<Route> {
        let first = cities.first().ok_or(NetworkError::EmptyRoute)?;
        if !self.network.contains_city(first.as_ref()) {
            return Err(NetworkError::city_not_found(first.as_ref()));
        }

        let mut total = 0.0;
        for leg in cities.windows(2) {
            total += self.leg_cost(leg[0].as_ref(), leg[1].as_ref())?;
        }

        let ids = cities.iter().map(|c| c.as_ref().to_string()).collect();
        Ok(Route::new(ids, total))
    }

    /// Cost of the available road `from -> to`.
    pub fn leg_cost(&self, from: &str, to: &str) -> Result<f64> {
        if !self.network.contains_city(to) {
            return Err(NetworkError::city_not_found(to));
        }
        self.network
            .road(from, to)
            .map(|r| r.cost())
            .ok_or_else(|| {
                if self.network.contains_city(from) {
                    NetworkError::road_not_found(from, to)
                } else {
                    NetworkError::city_not_found(from)
                }
            })
    }

    /// Returns `true` if every leg of `route` is still available.
    pub fn is_traversable(&self, route: &Route) -> bool {
        self.evaluate(route.cities()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CityRole;

    fn setup() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        for id in ["A", "B", "C", "D"] {
            net.add_city(id, CityRole::Intermediate).expect("unique city");
        }
        net.add_road("A", "B", 5.0).expect("valid road");
        net.add_road("B", "C", 4.0).expect("valid road");
        net.add_road("C", "D", 3.0).expect("valid road");
        net.add_road("A", "D", 20.0).expect("valid road");
        net
    }

    #[test]
    fn test_evaluate_chain() {
        let net = setup();
        let eval = RouteEvaluator::new(&net);
        let route = eval.evaluate(&["A", "B", "C", "D"]).expect("all legs exist");
        assert!((route.cost() - 12.0).abs() < 1e-10);
        assert_eq!(route.num_legs(), 3);
    }

    #[test]
    fn test_evaluate_single_city() {
        let net = setup();
        let eval = RouteEvaluator::new(&net);
        let route = eval.evaluate(&["C"]).expect("city exists");
        assert_eq!(route.cost(), 0.0);
        assert!(eval.evaluate(&["Z"]).is_err());
    }

    #[test]
    fn test_evaluate_empty() {
        let net = setup();
        let eval = RouteEvaluator::new(&net);
        let empty: [&str; 0] = [];
        assert_eq!(eval.evaluate(&empty), Err(NetworkError::EmptyRoute));
        assert!(!eval.is_traversable(&Route::new(Vec::new(), 0.0)));
    }

    #[test]
    fn test_evaluate_missing_leg() {
        let net = setup();
        let eval = RouteEvaluator::new(&net);
        assert_eq!(
            eval.evaluate(&["A", "C"]),
            Err(NetworkError::RoadNotFound {
                from: "A".into(),
                to: "C".into()
            })
        );
        assert!(matches!(
            eval.evaluate(&["A", "Z"]),
            Err(NetworkError::CityNotFound { .. })
        ));
    }

    #[test]
    fn test_traversable_after_failure() {
        let mut net = setup();
        let route = RouteEvaluator::new(&net)
            .evaluate(&["A", "B", "C"])
            .expect("all legs exist");
        net.remove_road("B", "C").expect("exists");
        let eval = RouteEvaluator::new(&net);
        assert!(!eval.is_traversable(&route));
        assert!(matches!(
            eval.leg_cost("B", "C"),
            Err(NetworkError::RoadNotFound { .. })
        ));
    }
}
