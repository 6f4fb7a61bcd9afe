//! Ports (trait boundaries) for external collaborators.
//!
//! The agent core owns these traits; simulators, planners, random sources
//! and observers plug in as adapters.

pub mod environment;
pub mod observer;
pub mod random;

pub use environment::{Environment, RoutePlanner, TrialStatus};
pub use observer::Observer;
pub use random::RandomSource;
