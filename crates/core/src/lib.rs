//! Domain types and the pure slot synthesizer for the slotbook booking backend.
//!
//! Nothing in this crate performs I/O. Lookups and persistence live in `slotbook-db`.

pub mod errors;
pub mod models;
pub mod slots;
