//! Test doubles for the repository layer.

pub mod repositories;
pub mod transaction;
