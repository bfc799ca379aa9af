pub mod ids;
pub mod principal;
pub mod context;
pub mod circle;
pub mod receipt;

// Re-exports for convenience
pub use ids::Id;
pub use principal::Principal;
pub use context::{BlockHeight, TxContext};
pub use circle::{Circle, CircleView};
pub use receipt::{Receipt, TxResult};
