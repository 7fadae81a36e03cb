//! Core module - configuration, storage slots and shared error types
//!
//! # Architecture
//!
//! - [`config::SessionConfig`] - user settings loaded from `config.json`
//! - [`storage::SessionStorage`] - injected single-value slot the session persists into
//! - [`error::CoreError`] - storage, serialization and config failures
//!
//! Nothing in this module is a global: the binary (or a browser host) builds the
//! config and the storage slot and hands them to the session.

pub mod config;
pub mod error;
pub mod storage;

pub use config::SessionConfig;
pub use error::{CoreError, CoreResult};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
