//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Months, NaiveDate};

use crate::app::transfer::{AddressDto, PersonDto};
use crate::domain::entities::{Address, AddressId, NewPerson, Person, PersonId, StateCode};
use crate::domain::validation;

/// A birth date comfortably past the minimum age
pub fn adult_birth_date() -> NaiveDate {
    validation::today()
        .checked_sub_months(Months::new(30 * 12))
        .expect("date in range")
}

/// Create a stored person with the given unique fields
pub fn test_person(email: &str, cpf: &str) -> Person {
    Person {
        id: PersonId::new(),
        name: "John Doe".to_string(),
        email: email.to_string(),
        cpf: cpf.to_string(),
        birth_date: adult_birth_date(),
        phone: Some("(11) 99999-9999".to_string()),
    }
}

/// Insert shape for a person
pub fn test_new_person(email: &str, cpf: &str) -> NewPerson {
    NewPerson {
        name: "John Doe".to_string(),
        email: email.to_string(),
        cpf: cpf.to_string(),
        birth_date: adult_birth_date(),
        phone: Some("(11) 99999-9999".to_string()),
    }
}

/// A valid person submission without embedded addresses
pub fn test_person_dto(email: &str, cpf: &str) -> PersonDto {
    PersonDto {
        id: None,
        name: "John Doe".to_string(),
        email: email.to_string(),
        cpf: cpf.to_string(),
        birth_date: Some(adult_birth_date()),
        phone: Some("(11) 99999-9999".to_string()),
        addresses: None,
    }
}

/// Create a stored, unlinked address
pub fn test_address() -> Address {
    Address {
        id: AddressId::new(),
        street: "Rua Exemplo".to_string(),
        number: "123".to_string(),
        neighborhood: "Bairro Exemplo".to_string(),
        city: "Cidade Exemplo".to_string(),
        state: StateCode::SP,
        zip_code: "12345-678".to_string(),
        person_id: None,
    }
}

/// A valid address submission
pub fn test_address_dto() -> AddressDto {
    AddressDto {
        id: None,
        street: "Rua Exemplo".to_string(),
        number: "123".to_string(),
        neighborhood: "Bairro Exemplo".to_string(),
        city: "Cidade Exemplo".to_string(),
        state: "SP".to_string(),
        zip_code: "12345-678".to_string(),
    }
}
