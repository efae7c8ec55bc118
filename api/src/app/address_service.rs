//! Address service
//!
//! CRUD over address records. Linking an address to a person is owned by
//! `PersonService`; nothing here changes the owner link.

use std::sync::Arc;

use crate::app::transfer::AddressDto;
use crate::domain::entities::AddressId;
use crate::domain::ports::AddressRepository;
use crate::error::DomainError;

/// Service for managing addresses
pub struct AddressService<AR>
where
    AR: AddressRepository,
{
    addresses: Arc<AR>,
}

impl<AR> AddressService<AR>
where
    AR: AddressRepository,
{
    pub fn new(addresses: Arc<AR>) -> Self {
        Self { addresses }
    }

    /// Validate and store a new, unlinked address
    pub async fn create(&self, address: &AddressDto) -> Result<AddressDto, DomainError> {
        let new_address = address.to_new_address(None)?;
        let created = self.addresses.create(&new_address).await?;

        tracing::info!(address_id = %created.id, "Address created");
        Ok(AddressDto::from(&created))
    }

    /// Validate and overwrite every mutable field of an existing address
    pub async fn update(
        &self,
        id: &AddressId,
        address: &AddressDto,
    ) -> Result<AddressDto, DomainError> {
        let changes = address.to_new_address(None)?;

        let mut existing = self
            .addresses
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Address", id))?;

        existing.apply(changes);
        let updated = self.addresses.update(&existing).await?;

        tracing::info!(address_id = %id, "Address updated");
        Ok(AddressDto::from(&updated))
    }

    /// Get an address by ID
    pub async fn get(&self, id: &AddressId) -> Result<AddressDto, DomainError> {
        tracing::debug!(address_id = %id, "Getting address");

        self.addresses
            .find_by_id(id)
            .await?
            .map(AddressDto::from)
            .ok_or_else(|| DomainError::not_found("Address", id))
    }

    /// List all addresses
    pub async fn list(&self) -> Result<Vec<AddressDto>, DomainError> {
        let addresses = self.addresses.find_all().await?;
        tracing::debug!("Listed {} addresses", addresses.len());
        Ok(addresses.iter().map(AddressDto::from).collect())
    }

    /// Delete an address. A linked person simply loses it.
    pub async fn delete(&self, id: &AddressId) -> Result<(), DomainError> {
        let existing = self
            .addresses
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Address", id))?;

        self.addresses.delete(&existing.id).await?;

        tracing::info!(address_id = %id, "Address deleted");
        Ok(())
    }
}
