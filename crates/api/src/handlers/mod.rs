//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers run the core rules, delegate to the repositories in
//! `oppboard_db` and map errors via [`AppError`](crate::error::AppError).

pub mod account;
pub mod catalog;
pub mod employee;
pub mod lifecycle;
pub mod opportunity;
pub mod trash;
