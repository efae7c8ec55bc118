//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.
//! Handlers are generic over the store types so tests can serve the
//! same router over in-memory stores.

use uuid::Uuid;

use crate::error::AppError;

pub mod addresses;
pub mod persons;

pub use addresses::{create_address, delete_address, get_address, list_addresses, update_address};
pub use persons::{
    add_person_address, attach_address, create_person, delete_person, detach_address, get_person,
    list_person_addresses, list_persons, update_person,
};

/// Parse an identifier taken from the path
fn parse_id(kind: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} ID: {}", kind, raw)))
}
