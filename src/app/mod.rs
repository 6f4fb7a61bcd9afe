//! Application configuration.
//!
//! ```
//! use smartcab::{Action, app::AgentConfig, q_learning::LearningAgent};
//!
//! let config = AgentConfig::new().with_learning(true).with_seed(42);
//! let agent = LearningAgent::new(Action::ALL.to_vec(), config)?;
//! assert!(agent.is_learning());
//! # Ok::<(), smartcab::Error>(())
//! ```

pub mod config;

pub use config::AgentConfig;
