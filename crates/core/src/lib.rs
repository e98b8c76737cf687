//! Opportunity pipeline domain logic.
//!
//! Pure functions and types shared by the persistence and HTTP layers:
//! the semaphore (color vs. percentage) rule, the lifecycle state machine,
//! the ordering / filtering engine and the date arithmetic behind the
//! pipeline KPIs. Nothing in this crate performs I/O.

pub mod catalog;
pub mod dates;
pub mod error;
pub mod lifecycle;
pub mod observations;
pub mod ordering;
pub mod record;
pub mod semaphore;
pub mod submission;
pub mod types;
