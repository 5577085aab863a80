//! Direct road cost matrices.
//!
//! Provides a dense cost matrix of the currently available roads.

mod cost_matrix;

pub use cost_matrix::CostMatrix;
