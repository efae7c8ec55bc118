//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports and transfer shapes.

pub mod address_service;
pub mod person_service;
pub mod transfer;

pub use address_service::AddressService;
pub use person_service::{PersonDeletePolicy, PersonService};
pub use transfer::{AddressDto, PersonDto};
