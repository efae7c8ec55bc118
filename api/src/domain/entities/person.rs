//! Person domain entity
//!
//! A registered person. Addresses are linked from the address side
//! (`Address::person_id`), so a person never holds address objects directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub Uuid);

impl PersonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PersonId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    /// National tax id, `XXX.XXX.XXX-XX`
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
}

impl Person {
    /// Overwrite every mutable scalar field. The identifier is left alone.
    pub fn apply(&mut self, changes: NewPerson) {
        self.name = changes.name;
        self.email = changes.email;
        self.cpf = changes.cpf;
        self.birth_date = changes.birth_date;
        self.phone = changes.phone;
    }
}

/// Data needed to create a new person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
}
