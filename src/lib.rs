pub mod error;
pub mod validation;
pub mod model;
pub mod db;
pub mod ops;
pub mod queries;
pub mod registry;
pub mod chain;
pub mod config;
pub mod telemetry;
pub mod cli;

pub use chain::Chain;
pub use error::{CircleError, CircleResult, ErrorCode};
pub use registry::CircleRegistry;
