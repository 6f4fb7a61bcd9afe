//! Smartcab learning agent
//!
//! A tabular reinforcement-learning driver for a discrete traffic
//! simulation. This crate provides:
//! - State construction from route-planner and sensor readings
//! - A lazily grown Q-table over the environment's legal actions
//! - ε-greedy action selection with uniform random tie-breaking
//! - Immediate-reward Q-value updates
//! - A trial harness that schedules exploration and evaluates the policy
//!
//! The simulator, route planner and rendering are external collaborators,
//! reached through the traits in [`ports`].

pub mod adapters;
pub mod app;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod state;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{Branch, Decision, LearningAgent, Mode, QTable};
pub use state::{State, StateTuple};
pub use types::{Action, Light, Sensed};
