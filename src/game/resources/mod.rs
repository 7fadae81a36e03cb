//! Session state pieces
//!
//! Plain data structures the session store is built from. Each one is mutated
//! only by [`crate::game::session::BoardSession`] transitions.
//!
//! - [`Selection`] - selected square and its reachable targets
//! - [`PendingPromotion`] - promotion move waiting for a piece choice
//! - [`MoveHistory`] - move log for display
//! - [`CapturedPieces`] - capture lists and material advantage

pub mod captured;
pub mod history;
pub mod promotion;
pub mod selection;

// Re-export all resources for convenience
pub use captured::*;
pub use history::*;
pub use promotion::*;
pub use selection::*;
