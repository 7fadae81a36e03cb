//! Input module - gestures from the board widget
//!
//! # Architecture
//!
//! - `controller` - [`InteractionController`], drag/drop and tap handling
//!
//! All handlers run synchronously and leave the session either changed by one
//! transition or untouched.

pub mod controller;

pub use controller::InteractionController;
