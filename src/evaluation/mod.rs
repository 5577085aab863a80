//! Route evaluation against the current network state.

mod evaluator;

pub use evaluator::RouteEvaluator;
