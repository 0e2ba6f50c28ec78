//! `agenda-store` — SQLite-backed store for scheduled class occurrences.
//!
//! One table, `occurrences`, holds every scheduled class instance. The
//! fields the window maintainer cares about (series membership, recurring
//! flag, date, the four content fields it clears on generation) are real
//! columns; the rest of the domain record (subject, teacher, price, …)
//! travels as a JSON `detail` column and is copied verbatim when an
//! occurrence is cloned.
//!
//! [`OccurrenceStore`] wraps an explicitly passed `Connection`, so tests
//! run the whole job against `Connection::open_in_memory()`.

pub mod db;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::OccurrenceStore;
pub use types::{NewOccurrence, Occurrence};
