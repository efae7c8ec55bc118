//! Address domain entity
//!
//! A postal address. It may exist on its own or be linked to exactly one
//! owning person through `person_id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::person::PersonId;

/// Unique identifier for an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(pub Uuid);

impl AddressId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AddressId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AddressId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Brazilian federative unit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateCode {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl StateCode {
    pub const ALL: [StateCode; 27] = [
        StateCode::AC,
        StateCode::AL,
        StateCode::AP,
        StateCode::AM,
        StateCode::BA,
        StateCode::CE,
        StateCode::DF,
        StateCode::ES,
        StateCode::GO,
        StateCode::MA,
        StateCode::MT,
        StateCode::MS,
        StateCode::MG,
        StateCode::PA,
        StateCode::PB,
        StateCode::PR,
        StateCode::PE,
        StateCode::PI,
        StateCode::RJ,
        StateCode::RN,
        StateCode::RS,
        StateCode::RO,
        StateCode::RR,
        StateCode::SC,
        StateCode::SP,
        StateCode::SE,
        StateCode::TO,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateCode::AC => "AC",
            StateCode::AL => "AL",
            StateCode::AP => "AP",
            StateCode::AM => "AM",
            StateCode::BA => "BA",
            StateCode::CE => "CE",
            StateCode::DF => "DF",
            StateCode::ES => "ES",
            StateCode::GO => "GO",
            StateCode::MA => "MA",
            StateCode::MT => "MT",
            StateCode::MS => "MS",
            StateCode::MG => "MG",
            StateCode::PA => "PA",
            StateCode::PB => "PB",
            StateCode::PR => "PR",
            StateCode::PE => "PE",
            StateCode::PI => "PI",
            StateCode::RJ => "RJ",
            StateCode::RN => "RN",
            StateCode::RS => "RS",
            StateCode::RO => "RO",
            StateCode::RR => "RR",
            StateCode::SC => "SC",
            StateCode::SP => "SP",
            StateCode::SE => "SE",
            StateCode::TO => "TO",
        }
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StateCode {
    type Err = String;

    /// Case-sensitive: `sp` is not a state code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("Unknown state code: {}", s))
    }
}

/// A persisted address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: StateCode,
    /// Postal code, `XXXXX-XXX`
    pub zip_code: String,
    /// Owning person, if linked
    pub person_id: Option<PersonId>,
}

impl Address {
    /// Overwrite the mutable fields. The owning-person link is not touched.
    pub fn apply(&mut self, changes: NewAddress) {
        self.street = changes.street;
        self.number = changes.number;
        self.neighborhood = changes.neighborhood;
        self.city = changes.city;
        self.state = changes.state;
        self.zip_code = changes.zip_code;
    }

    pub fn is_linked_to(&self, person_id: &PersonId) -> bool {
        self.person_id.as_ref() == Some(person_id)
    }
}

/// Data needed to create a new address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: StateCode,
    pub zip_code: String,
    pub person_id: Option<PersonId>,
}
