//! `agenda-core` — shared configuration and error types for the agenda
//! workspace.
//!
//! The maintenance daemon and any future admin tooling read the same
//! `agenda.toml`; keeping the config model here avoids each binary growing
//! its own half of it.

pub mod config;
pub mod error;

pub use config::AgendaConfig;
pub use error::{AgendaError, Result};
