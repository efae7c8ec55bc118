//! SeaORM table models
//!
//! Mirrors `migrations/0001_create_persons_and_addresses.sql`.

pub mod addresses;
pub mod persons;
