pub mod authority;
pub mod config;
pub mod simulation;

pub use authority::BatchApproval;
pub use config::{AuthorityConfig, ConfigError, SimulationConfig};
