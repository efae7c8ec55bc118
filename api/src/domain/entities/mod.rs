//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod address;
pub mod person;

pub use address::{Address, AddressId, NewAddress, StateCode};
pub use person::{NewPerson, Person, PersonId};
