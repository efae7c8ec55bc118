//! Person service
//!
//! Handles person registration, profile updates and the link between a person
//! and its addresses.
//!
//! Business checks here are fail-fast and run in a fixed order. Field format
//! validation is the caller's job (see `PersonDto::validate`), so an underage
//! submission is reported as an eligibility failure even when its birth date
//! would also fail a format rule.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::app::transfer::{AddressDto, PersonDto};
use crate::domain::entities::{Address, AddressId, NewAddress, Person, PersonId};
use crate::domain::ports::{AddressRepository, PersonRepository};
use crate::domain::validation::{self, MINIMUM_AGE};
use crate::error::{DomainError, FieldErrors};

/// What happens to linked addresses when a person is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonDeletePolicy {
    /// Clear the owner link on every linked address, then delete the person
    #[default]
    DetachAddresses,
    /// Refuse to delete while any address is still linked
    RejectIfLinked,
}

impl std::fmt::Display for PersonDeletePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonDeletePolicy::DetachAddresses => write!(f, "detach"),
            PersonDeletePolicy::RejectIfLinked => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for PersonDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detach" => Ok(PersonDeletePolicy::DetachAddresses),
            "reject" => Ok(PersonDeletePolicy::RejectIfLinked),
            _ => Err(format!("Unknown person delete policy: {}", s)),
        }
    }
}

/// Service for managing persons and their address links
pub struct PersonService<PR, AR>
where
    PR: PersonRepository,
    AR: AddressRepository,
{
    persons: Arc<PR>,
    addresses: Arc<AR>,
    delete_policy: PersonDeletePolicy,
    minimum_age: u32,
}

impl<PR, AR> PersonService<PR, AR>
where
    PR: PersonRepository,
    AR: AddressRepository,
{
    pub fn new(persons: Arc<PR>, addresses: Arc<AR>) -> Self {
        Self {
            persons,
            addresses,
            delete_policy: PersonDeletePolicy::default(),
            minimum_age: MINIMUM_AGE,
        }
    }

    pub fn with_delete_policy(mut self, policy: PersonDeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn with_minimum_age(mut self, years: u32) -> Self {
        self.minimum_age = years;
        self
    }

    /// Register a new person
    ///
    /// Checks, in order:
    /// 1. Minimum age
    /// 2. Email not used by any person
    /// 3. CPF not used by any person
    ///
    /// The person and its embedded addresses are stored as one unit, each
    /// address linked to the new id.
    pub async fn create(&self, person: &PersonDto) -> Result<PersonDto, DomainError> {
        let birth_date = self.eligible_birth_date(person)?;

        if self.persons.find_by_email(&person.email).await?.is_some() {
            tracing::warn!("Rejected person: email already in use");
            return Err(DomainError::Conflict(
                "Email is already in use".to_string(),
            ));
        }

        if self.persons.find_by_cpf(&person.cpf).await?.is_some() {
            tracing::warn!("Rejected person: CPF already in use");
            return Err(DomainError::Conflict("CPF is already in use".to_string()));
        }

        let new_person = person.to_new_person(birth_date);
        let new_addresses = person
            .addresses
            .iter()
            .flatten()
            .map(|address| address.to_new_address(None))
            .collect::<Result<Vec<NewAddress>, DomainError>>()?;

        let (created, linked) = self
            .persons
            .create_with_addresses(&new_person, &new_addresses)
            .await?;

        tracing::info!(
            person_id = %created.id,
            addresses = linked.len(),
            "Person created"
        );
        Ok(PersonDto::from_person(&created, Some(&linked)))
    }

    /// Overwrite the scalar fields of a person. Address links are untouched.
    pub async fn update(&self, id: &PersonId, person: &PersonDto) -> Result<PersonDto, DomainError> {
        let mut existing = self.find_person(id).await?;

        if let Some(other) = self.persons.find_by_email(&person.email).await? {
            if other.id != *id {
                tracing::warn!(person_id = %id, "Rejected update: email used by another person");
                return Err(DomainError::Conflict(
                    "Email is already in use by another person".to_string(),
                ));
            }
        }

        if let Some(other) = self.persons.find_by_cpf(&person.cpf).await? {
            if other.id != *id {
                tracing::warn!(person_id = %id, "Rejected update: CPF used by another person");
                return Err(DomainError::Conflict(
                    "CPF is already in use by another person".to_string(),
                ));
            }
        }

        let birth_date = person.birth_date.ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.add("birthDate", "Birth date is required");
            DomainError::Validation(errors)
        })?;

        existing.apply(person.to_new_person(birth_date));
        let updated = self.persons.update(&existing).await?;
        let addresses = self.addresses.find_by_person(id).await?;

        tracing::info!(person_id = %id, "Person updated");
        Ok(PersonDto::from_person(&updated, Some(&addresses)))
    }

    /// Get a person by ID, with its linked addresses
    pub async fn get(&self, id: &PersonId) -> Result<PersonDto, DomainError> {
        tracing::debug!(person_id = %id, "Getting person");

        let person = self.find_person(id).await?;
        let addresses = self.addresses.find_by_person(id).await?;
        Ok(PersonDto::from_person(&person, Some(&addresses)))
    }

    /// List all persons. Addresses are not loaded on this path.
    pub async fn list(&self) -> Result<Vec<PersonDto>, DomainError> {
        let persons = self.persons.find_all().await?;
        tracing::debug!("Listed {} persons", persons.len());
        Ok(persons
            .iter()
            .map(|person| PersonDto::from_person(person, None))
            .collect())
    }

    /// Delete a person according to the configured delete policy.
    /// Address rows are never deleted here.
    pub async fn delete(&self, id: &PersonId) -> Result<(), DomainError> {
        let person = self.find_person(id).await?;

        match self.delete_policy {
            PersonDeletePolicy::RejectIfLinked => {
                let linked = self.addresses.find_by_person(id).await?;
                if !linked.is_empty() {
                    tracing::warn!(
                        person_id = %id,
                        linked = linked.len(),
                        "Rejected delete: person still has linked addresses"
                    );
                    return Err(DomainError::Conflict(format!(
                        "Person with ID {} still has {} linked address(es)",
                        id,
                        linked.len()
                    )));
                }
                // A link added after this check is rejected by the store as a conflict
                self.persons.delete(&person.id).await?;
            }
            PersonDeletePolicy::DetachAddresses => {
                self.persons.delete_detaching(&person.id).await?;
            }
        }

        tracing::info!(person_id = %id, policy = %self.delete_policy, "Person deleted");
        Ok(())
    }

    /// Link an existing address to a person. Re-attaching the same pair is a no-op.
    pub async fn attach_existing_address(
        &self,
        person_id: &PersonId,
        address_id: &AddressId,
    ) -> Result<(), DomainError> {
        let person = self.find_person(person_id).await?;
        let mut address = self
            .addresses
            .find_by_id(address_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Address", address_id))?;

        if address.is_linked_to(&person.id) {
            tracing::debug!(%person_id, %address_id, "Address already linked");
            return Ok(());
        }

        if let Some(previous) = address.person_id {
            tracing::info!(%address_id, from = %previous, to = %person_id, "Moving address to another person");
        }

        address.person_id = Some(person.id);
        self.addresses.update(&address).await?;

        tracing::info!(%person_id, %address_id, "Address attached");
        Ok(())
    }

    /// Clear the link between a person and one of its addresses.
    /// Neither row is deleted.
    pub async fn detach_address(
        &self,
        person_id: &PersonId,
        address_id: &AddressId,
    ) -> Result<(), DomainError> {
        self.find_person(person_id).await?;

        let address = self
            .addresses
            .find_by_person(person_id)
            .await?
            .into_iter()
            .find(|address| address.id == *address_id)
            .ok_or_else(|| DomainError::address_not_linked(person_id, address_id))?;

        self.unlink(address).await?;

        tracing::info!(%person_id, %address_id, "Address detached");
        Ok(())
    }

    /// Addresses currently linked to a person
    pub async fn list_addresses_for(
        &self,
        person_id: &PersonId,
    ) -> Result<Vec<AddressDto>, DomainError> {
        self.find_person(person_id).await?;

        let addresses = self.addresses.find_by_person(person_id).await?;
        Ok(addresses.iter().map(AddressDto::from).collect())
    }

    /// Create a new address already linked to a person
    pub async fn add_new_address(
        &self,
        person_id: &PersonId,
        address: &AddressDto,
    ) -> Result<AddressDto, DomainError> {
        let person = self.find_person(person_id).await?;
        let new_address = address.to_new_address(Some(person.id))?;

        let created = self.addresses.create(&new_address).await?;

        tracing::info!(%person_id, address_id = %created.id, "Address created for person");
        Ok(AddressDto::from(&created))
    }

    async fn find_person(&self, id: &PersonId) -> Result<Person, DomainError> {
        self.persons
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Person", id))
    }

    async fn unlink(&self, mut address: Address) -> Result<Address, DomainError> {
        address.person_id = None;
        self.addresses.update(&address).await
    }

    fn eligible_birth_date(&self, person: &PersonDto) -> Result<NaiveDate, DomainError> {
        validation::adult(person.birth_date, validation::today(), self.minimum_age).map_err(
            |reason| {
                tracing::warn!("Rejected person: {}", reason);
                DomainError::Eligibility(reason)
            },
        )?;

        person
            .birth_date
            .ok_or_else(|| DomainError::Eligibility("Birth date is required".to_string()))
    }
}
