//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for the person and address stores
//! - `validation`: Field rules shared by the boundary and the services

pub mod entities;
pub mod ports;
pub mod validation;
