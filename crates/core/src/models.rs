pub mod auth;
pub mod service;
pub mod time_slot;
