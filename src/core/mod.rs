//! Core library components.
//!
//! The synchronization engine: policy, source catalog, platform stores,
//! presence checking and the dispatcher. Nothing here prints; the CLI
//! renders results.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod context;
pub mod dispatch;
pub mod domain;
pub mod platform;
pub mod policy;
pub mod presence;
pub mod types;
pub mod validation;
