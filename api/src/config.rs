use std::env;

use anyhow::{Context, Result};

use crate::app::PersonDeletePolicy;
use crate::domain::validation::MINIMUM_AGE;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// What deleting a person does to its linked addresses
    pub person_delete_policy: PersonDeletePolicy,
    /// Eligibility threshold in whole years
    pub minimum_age: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let person_delete_policy = match env::var("PERSON_DELETE_POLICY") {
            Ok(value) => value
                .parse::<PersonDeletePolicy>()
                .map_err(anyhow::Error::msg)
                .context("PERSON_DELETE_POLICY must be 'detach' or 'reject'")?,
            Err(_) => PersonDeletePolicy::default(),
        };

        let minimum_age = match env::var("MINIMUM_AGE") {
            Ok(value) => value
                .parse::<u32>()
                .with_context(|| format!("MINIMUM_AGE must be a whole number, got '{}'", value))?,
            Err(_) => MINIMUM_AGE,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            person_delete_policy,
            minimum_age,
        })
    }
}
