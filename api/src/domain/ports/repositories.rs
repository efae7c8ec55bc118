//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Uniqueness of person email and CPF must also be enforced by the storage
//! itself. The services check before writing to produce a friendly error, but
//! that check is not atomic with the write; an implementation should report a
//! violated unique constraint as `DomainError::Conflict`.

use async_trait::async_trait;

use crate::domain::entities::{Address, AddressId, NewAddress, NewPerson, Person, PersonId};
use crate::error::DomainError;

/// Repository for Person entities
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Find a person by ID
    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, DomainError>;

    /// Find a person by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>, DomainError>;

    /// Find a person by CPF
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Person>, DomainError>;

    /// List all persons
    async fn find_all(&self) -> Result<Vec<Person>, DomainError>;

    /// Insert a new person; the store assigns the identifier
    async fn create(&self, person: &NewPerson) -> Result<Person, DomainError>;

    /// Insert a person together with addresses linked to it, as one unit.
    /// The `person_id` of each address is replaced by the new person's id.
    /// Nothing is stored if any insert fails.
    async fn create_with_addresses(
        &self,
        person: &NewPerson,
        addresses: &[NewAddress],
    ) -> Result<(Person, Vec<Address>), DomainError>;

    /// Overwrite the scalar fields of an existing person
    async fn update(&self, person: &Person) -> Result<Person, DomainError>;

    /// Delete a person row. Fails with `Conflict` while addresses still link to it.
    async fn delete(&self, id: &PersonId) -> Result<(), DomainError>;

    /// Clear every address link to the person, then delete the person row,
    /// as one unit. Address rows are kept.
    async fn delete_detaching(&self, id: &PersonId) -> Result<(), DomainError>;
}

/// Repository for Address entities
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Find an address by ID
    async fn find_by_id(&self, id: &AddressId) -> Result<Option<Address>, DomainError>;

    /// Find every address linked to a person
    async fn find_by_person(&self, person_id: &PersonId) -> Result<Vec<Address>, DomainError>;

    /// List all addresses
    async fn find_all(&self) -> Result<Vec<Address>, DomainError>;

    /// Insert a new address; the store assigns the identifier
    async fn create(&self, address: &NewAddress) -> Result<Address, DomainError>;

    /// Overwrite the fields of an existing address, including its owner link
    async fn update(&self, address: &Address) -> Result<Address, DomainError>;

    /// Delete an address row
    async fn delete(&self, id: &AddressId) -> Result<(), DomainError>;
}
