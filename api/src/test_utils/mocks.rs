//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.
//! Rows keep insertion order, so listings are stable.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Address, AddressId, NewAddress, NewPerson, Person, PersonId};
use crate::domain::ports::{AddressRepository, PersonRepository};
use crate::error::DomainError;

fn store_unavailable() -> DomainError {
    DomainError::Database("connection refused".to_string())
}

// ============================================================================
// In-Memory Person Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryPersonRepository {
    persons: Arc<RwLock<Vec<Person>>>,
    /// Rows touched by the multi-table writes
    addresses: InMemoryAddressRepository,
    should_fail: bool,
    fail_deletes: bool,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were down
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Person deletes fail as if the database dropped the connection mid-write
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    /// Share address rows with the store the service uses
    pub fn with_address_store(mut self, addresses: InMemoryAddressRepository) -> Self {
        self.addresses = addresses;
        self
    }

    /// Pre-populate with a person for testing
    pub fn with_person(self, person: Person) -> Self {
        self.persons.write().unwrap().push(person);
        self
    }

    pub fn count(&self) -> usize {
        self.persons.read().unwrap().len()
    }

    pub fn get(&self, id: &PersonId) -> Option<Person> {
        self.persons
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            Err(store_unavailable())
        } else {
            Ok(())
        }
    }

    fn check_delete(&self) -> Result<(), DomainError> {
        self.check()?;
        if self.fail_deletes {
            Err(store_unavailable())
        } else {
            Ok(())
        }
    }

    /// Mirrors the unique indexes on email and cpf
    fn ensure_unique(
        persons: &[Person],
        id: Option<&PersonId>,
        email: &str,
        cpf: &str,
    ) -> Result<(), DomainError> {
        let clash = persons
            .iter()
            .filter(|p| Some(&p.id) != id)
            .any(|p| p.email == email || p.cpf == cpf);
        if clash {
            Err(DomainError::Conflict(
                "Person with this email or CPF already exists".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Person>, DomainError> {
        self.check()?;
        let persons = self.persons.read().unwrap();
        Ok(persons.iter().find(|p| p.email == email).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Person>, DomainError> {
        self.check()?;
        let persons = self.persons.read().unwrap();
        Ok(persons.iter().find(|p| p.cpf == cpf).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Person>, DomainError> {
        self.check()?;
        Ok(self.persons.read().unwrap().clone())
    }

    async fn create(&self, new_person: &NewPerson) -> Result<Person, DomainError> {
        self.check()?;
        let mut persons = self.persons.write().unwrap();
        Self::ensure_unique(&persons, None, &new_person.email, &new_person.cpf)?;

        let person = Person {
            id: PersonId::new(),
            name: new_person.name.clone(),
            email: new_person.email.clone(),
            cpf: new_person.cpf.clone(),
            birth_date: new_person.birth_date,
            phone: new_person.phone.clone(),
        };
        persons.push(person.clone());
        Ok(person)
    }

    async fn create_with_addresses(
        &self,
        new_person: &NewPerson,
        new_addresses: &[NewAddress],
    ) -> Result<(Person, Vec<Address>), DomainError> {
        self.check()?;
        // Failures are raised before any row is written
        if !new_addresses.is_empty() {
            self.addresses.check_create()?;
        }
        let mut persons = self.persons.write().unwrap();
        Self::ensure_unique(&persons, None, &new_person.email, &new_person.cpf)?;

        let person = Person {
            id: PersonId::new(),
            name: new_person.name.clone(),
            email: new_person.email.clone(),
            cpf: new_person.cpf.clone(),
            birth_date: new_person.birth_date,
            phone: new_person.phone.clone(),
        };
        let linked: Vec<Address> = new_addresses
            .iter()
            .map(|address| stored_address(address, Some(person.id)))
            .collect();

        persons.push(person.clone());
        self.addresses
            .addresses
            .write()
            .unwrap()
            .extend(linked.iter().cloned());
        Ok((person, linked))
    }

    async fn update(&self, person: &Person) -> Result<Person, DomainError> {
        self.check()?;
        let mut persons = self.persons.write().unwrap();
        Self::ensure_unique(&persons, Some(&person.id), &person.email, &person.cpf)?;

        match persons.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => {
                *existing = person.clone();
                Ok(person.clone())
            }
            None => Err(DomainError::not_found("Person", person.id)),
        }
    }

    async fn delete(&self, id: &PersonId) -> Result<(), DomainError> {
        self.check_delete()?;
        let mut persons = self.persons.write().unwrap();
        if !persons.iter().any(|p| p.id == *id) {
            return Err(DomainError::not_found("Person", id));
        }
        // Mirrors the foreign key on addresses.person_id
        let linked = self
            .addresses
            .addresses
            .read()
            .unwrap()
            .iter()
            .any(|a| a.is_linked_to(id));
        if linked {
            return Err(DomainError::Conflict(format!(
                "Person with ID {} still has linked addresses",
                id
            )));
        }
        persons.retain(|p| p.id != *id);
        Ok(())
    }

    async fn delete_detaching(&self, id: &PersonId) -> Result<(), DomainError> {
        self.check_delete()?;
        self.addresses.check()?;
        let mut persons = self.persons.write().unwrap();
        if !persons.iter().any(|p| p.id == *id) {
            return Err(DomainError::not_found("Person", id));
        }

        for address in self.addresses.addresses.write().unwrap().iter_mut() {
            if address.is_linked_to(id) {
                address.person_id = None;
            }
        }
        persons.retain(|p| p.id != *id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Address Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryAddressRepository {
    addresses: Arc<RwLock<Vec<Address>>>,
    updates: Arc<AtomicUsize>,
    should_fail: bool,
    fail_creates: bool,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were down
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Address inserts fail; reads and updates still work
    pub fn failing_creates() -> Self {
        Self {
            fail_creates: true,
            ..Self::default()
        }
    }

    /// Pre-populate with an address for testing
    pub fn with_address(self, address: Address) -> Self {
        self.addresses.write().unwrap().push(address);
        self
    }

    pub fn count(&self) -> usize {
        self.addresses.read().unwrap().len()
    }

    pub fn get(&self, id: &AddressId) -> Option<Address> {
        self.addresses
            .read()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned()
    }

    /// Number of `update` calls that reached the store
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            Err(store_unavailable())
        } else {
            Ok(())
        }
    }

    fn check_create(&self) -> Result<(), DomainError> {
        self.check()?;
        if self.fail_creates {
            Err(store_unavailable())
        } else {
            Ok(())
        }
    }
}

fn stored_address(new_address: &NewAddress, owner: Option<PersonId>) -> Address {
    Address {
        id: AddressId::new(),
        street: new_address.street.clone(),
        number: new_address.number.clone(),
        neighborhood: new_address.neighborhood.clone(),
        city: new_address.city.clone(),
        state: new_address.state,
        zip_code: new_address.zip_code.clone(),
        person_id: owner,
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn find_by_id(&self, id: &AddressId) -> Result<Option<Address>, DomainError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn find_by_person(&self, person_id: &PersonId) -> Result<Vec<Address>, DomainError> {
        self.check()?;
        let addresses = self.addresses.read().unwrap();
        Ok(addresses
            .iter()
            .filter(|a| a.is_linked_to(person_id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Address>, DomainError> {
        self.check()?;
        Ok(self.addresses.read().unwrap().clone())
    }

    async fn create(&self, new_address: &NewAddress) -> Result<Address, DomainError> {
        self.check_create()?;
        let address = stored_address(new_address, new_address.person_id);
        self.addresses.write().unwrap().push(address.clone());
        Ok(address)
    }

    async fn update(&self, address: &Address) -> Result<Address, DomainError> {
        self.check()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut addresses = self.addresses.write().unwrap();
        match addresses.iter_mut().find(|a| a.id == address.id) {
            Some(existing) => {
                *existing = address.clone();
                Ok(address.clone())
            }
            None => Err(DomainError::not_found("Address", address.id)),
        }
    }

    async fn delete(&self, id: &AddressId) -> Result<(), DomainError> {
        self.check()?;
        let mut addresses = self.addresses.write().unwrap();
        let before = addresses.len();
        addresses.retain(|a| a.id != *id);
        if addresses.len() == before {
            Err(DomainError::not_found("Address", id))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_address, test_new_person, test_person};

    #[tokio::test]
    async fn person_store_enforces_unique_email() {
        let repo = InMemoryPersonRepository::new()
            .with_person(test_person("john@x.com", "123.456.789-00"));

        let result = repo
            .create(&test_new_person("john@x.com", "987.654.321-00"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn failing_store_reports_database_error() {
        let repo = InMemoryAddressRepository::failing();

        let result = repo.find_all().await;

        assert!(matches!(result, Err(DomainError::Database(_))));
    }

    #[tokio::test]
    async fn person_delete_blocked_by_linked_address() {
        let person = test_person("john@x.com", "123.456.789-00");
        let mut address = test_address();
        address.person_id = Some(person.id);
        let addresses = InMemoryAddressRepository::new().with_address(address);
        let repo = InMemoryPersonRepository::new()
            .with_person(person.clone())
            .with_address_store(addresses);

        let result = repo.delete(&person.id).await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(repo.count(), 1);
    }
}
