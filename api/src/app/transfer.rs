//! Transfer shapes
//!
//! The externally visible form of persons and addresses, and the mapping
//! between those shapes and the persisted entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Address, AddressId, NewAddress, NewPerson, Person, PersonId, StateCode,
};
use crate::domain::validation;
use crate::error::{DomainError, FieldErrors};

/// Address as exchanged with callers
///
/// Missing string fields deserialize as empty and are rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    /// Server-assigned; ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl AddressDto {
    /// Every failing field with its reason
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("street", validation::street(&self.street));
        errors.check("number", validation::address_number(&self.number));
        errors.check(
            "neighborhood",
            validation::neighborhood(&self.neighborhood),
        );
        errors.check("city", validation::city(&self.city));
        errors.check("state", validation::state(&self.state));
        errors.check("zipCode", validation::zip_code(&self.zip_code));
        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.field_errors().into_result()
    }

    /// Validate and convert to an insert shape. The incoming `id` is dropped.
    pub fn to_new_address(&self, owner: Option<PersonId>) -> Result<NewAddress, DomainError> {
        self.validate()?;
        let state: StateCode = self.state.parse().map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.add("state", validation::STATE_REASON);
            DomainError::Validation(errors)
        })?;

        Ok(NewAddress {
            street: self.street.clone(),
            number: self.number.clone(),
            neighborhood: self.neighborhood.clone(),
            city: self.city.clone(),
            state,
            zip_code: self.zip_code.clone(),
            person_id: owner,
        })
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        AddressDto {
            id: Some(address.id),
            street: address.street.clone(),
            number: address.number.clone(),
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            state: address.state.to_string(),
            zip_code: address.zip_code.clone(),
        }
    }
}

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        AddressDto::from(&address)
    }
}

/// Person as exchanged with callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    /// Server-assigned; ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Linked addresses. Absent when the read path did not load them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressDto>>,
}

impl PersonDto {
    /// Build the transfer shape. `addresses` is `None` when they were not loaded.
    pub fn from_person(person: &Person, addresses: Option<&[Address]>) -> Self {
        PersonDto {
            id: Some(person.id),
            name: person.name.clone(),
            email: person.email.clone(),
            cpf: person.cpf.clone(),
            birth_date: Some(person.birth_date),
            phone: person.phone.clone(),
            addresses: addresses.map(|list| list.iter().map(AddressDto::from).collect()),
        }
    }

    /// Failing scalar fields only; embedded addresses are not looked at
    pub fn scalar_field_errors(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("name", validation::person_name(&self.name));
        errors.check("email", validation::email(&self.email));
        errors.check("cpf", validation::cpf(&self.cpf));
        errors.check(
            "birthDate",
            validation::birth_date(self.birth_date, today),
        );
        errors.check("phone", validation::phone(self.phone.as_deref()));
        errors
    }

    /// Every failing field with its reason, embedded addresses included
    pub fn field_errors(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = self.scalar_field_errors(today);

        if let Some(addresses) = &self.addresses {
            for (index, address) in addresses.iter().enumerate() {
                errors.extend_prefixed(&format!("addresses[{}]", index), address.field_errors());
            }
        }

        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.field_errors(validation::today()).into_result()
    }

    /// Validation for updates, which never touch address links
    pub fn validate_scalars(&self) -> Result<(), DomainError> {
        self.scalar_field_errors(validation::today()).into_result()
    }

    /// Scalar fields as an insert shape, with the birth date already checked
    pub(crate) fn to_new_person(&self, birth_date: NaiveDate) -> NewPerson {
        NewPerson {
            name: self.name.clone(),
            email: self.email.clone(),
            cpf: self.cpf.clone(),
            birth_date,
            phone: self.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_address, test_address_dto, test_person, test_person_dto};

    #[test]
    fn address_to_dto_preserves_every_field() {
        let address = test_address();
        let dto = AddressDto::from(&address);

        assert_eq!(dto.id, Some(address.id));
        assert_eq!(dto.street, address.street);
        assert_eq!(dto.number, address.number);
        assert_eq!(dto.neighborhood, address.neighborhood);
        assert_eq!(dto.city, address.city);
        assert_eq!(dto.state, "SP");
        assert_eq!(dto.zip_code, address.zip_code);
    }

    #[test]
    fn to_new_address_ignores_incoming_id() {
        let mut dto = test_address_dto();
        dto.id = Some(AddressId::new());
        let owner = PersonId::new();

        let new_address = dto.to_new_address(Some(owner)).unwrap();

        assert_eq!(new_address.street, dto.street);
        assert_eq!(new_address.state, StateCode::SP);
        assert_eq!(new_address.person_id, Some(owner));
    }

    #[test]
    fn to_new_address_rejects_invalid_shape() {
        let mut dto = test_address_dto();
        dto.zip_code = "12345678".to_string();

        match dto.to_new_address(None) {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.get("zipCode"), Some(validation::ZIP_CODE_REASON));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn address_validation_collects_all_failures() {
        let dto = AddressDto {
            id: None,
            street: "Ru".to_string(),
            number: "".to_string(),
            neighborhood: "Bairro B".to_string(),
            city: "C".to_string(),
            state: "ZZ".to_string(),
            zip_code: "123".to_string(),
        };

        let errors = dto.field_errors();

        assert_eq!(errors.len(), 5);
        assert!(errors.contains("street"));
        assert!(errors.contains("number"));
        assert!(errors.contains("city"));
        assert!(errors.contains("state"));
        assert!(errors.contains("zipCode"));
        assert!(!errors.contains("neighborhood"));
    }

    #[test]
    fn person_validation_collects_nested_address_failures() {
        let mut dto = test_person_dto("nested@example.com", "321.654.987-00");
        dto.phone = Some("99999-9999".to_string());
        let mut bad_address = test_address_dto();
        bad_address.state = "XX".to_string();
        dto.addresses = Some(vec![test_address_dto(), bad_address]);

        let errors = dto.field_errors(validation::today());

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("phone"));
        assert!(errors.contains("addresses[1].state"));
    }

    #[test]
    fn scalar_validation_ignores_embedded_addresses() {
        let mut dto = test_person_dto("stale@example.com", "321.654.987-00");
        let mut stale = test_address_dto();
        stale.zip_code = "12345678".to_string();
        dto.addresses = Some(vec![stale]);

        assert!(dto.validate().is_err());
        assert!(dto.validate_scalars().is_ok());

        dto.email = "broken".to_string();
        let errors = dto.scalar_field_errors(validation::today());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("email"));
    }

    #[test]
    fn person_validation_requires_birth_date() {
        let mut dto = test_person_dto("a@example.com", "111.222.333-44");
        dto.birth_date = None;

        let errors = dto.field_errors(validation::today());

        assert_eq!(errors.get("birthDate"), Some("Birth date is required"));
    }

    #[test]
    fn person_to_dto_without_loaded_addresses_omits_them() {
        let person = test_person("john@example.com", "123.456.789-00");
        let dto = PersonDto::from_person(&person, None);

        assert_eq!(dto.id, Some(person.id));
        assert_eq!(dto.addresses, None);

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("addresses").is_none());
        assert_eq!(json["birthDate"], person.birth_date.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn person_to_dto_keeps_address_order() {
        let person = test_person("john@example.com", "123.456.789-00");
        let mut first = test_address();
        first.street = "Rua Primeira".to_string();
        let mut second = test_address();
        second.street = "Rua Segunda".to_string();

        let dto = PersonDto::from_person(&person, Some(&[first, second]));

        let streets: Vec<_> = dto
            .addresses
            .unwrap()
            .into_iter()
            .map(|a| a.street)
            .collect();
        assert_eq!(streets, vec!["Rua Primeira", "Rua Segunda"]);
    }

    #[test]
    fn parse_person_dto_camel_case() {
        let json = r#"{
            "name": "John Doe",
            "email": "john@x.com",
            "cpf": "123.456.789-00",
            "birthDate": "1990-05-20",
            "phone": "(11) 99999-9999",
            "unknown": true
        }"#;

        let dto: PersonDto = serde_json::from_str(json).unwrap();

        assert_eq!(dto.name, "John Doe");
        assert_eq!(dto.birth_date, NaiveDate::from_ymd_opt(1990, 5, 20));
        assert_eq!(dto.phone.as_deref(), Some("(11) 99999-9999"));
        assert!(dto.addresses.is_none());
    }

    #[test]
    fn parse_address_dto_with_missing_fields() {
        let dto: AddressDto = serde_json::from_str(r#"{"street": "Rua A"}"#).unwrap();

        let errors = dto.field_errors();

        assert_eq!(errors.get("zipCode"), Some("Zip code is required"));
        assert_eq!(errors.get("city"), Some("City is required"));
        assert!(!errors.contains("street"));
    }
}
