//! xfboard - chess board session component
//!
//! Keeps the state of one board session (position, move log, captured pieces,
//! selection, pending promotion), turns drag and tap gestures into rules-engine
//! calls and persists the session into an injected storage slot.
//!
//! # Modules
//!
//! - `core` - configuration and storage slots
//! - `game` - rules engine seam, session store, persistence, status
//! - `input` - interaction controller for board widget gestures
//! - `rendering` - board widget seam, square styles, text board

pub mod core;
pub mod game;
pub mod input;
pub mod rendering;
