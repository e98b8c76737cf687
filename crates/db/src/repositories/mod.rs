//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod catalog_repo;
pub mod employee_repo;
pub mod opportunity_repo;

pub use account_repo::AccountRepo;
pub use catalog_repo::{CatalogSnapshotRepo, NamedCatalogRepo};
pub use employee_repo::EmployeeRepo;
pub use opportunity_repo::OpportunityRepo;
