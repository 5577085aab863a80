//! Road and city failure simulation.
//!
//! Failures are applied to the network in place and undone through the
//! network's broken-road bookkeeping, never by keeping a second copy of the
//! graph. Recomputing any displayed route afterwards is the caller's job.

mod simulator;

pub use simulator::{CityOutage, FailureSimulator};
