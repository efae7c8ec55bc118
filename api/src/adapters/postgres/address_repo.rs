//! PostgreSQL adapter for AddressRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::db_error;
use crate::domain::entities::{Address, AddressId, NewAddress, PersonId, StateCode};
use crate::domain::ports::AddressRepository;
use crate::entity::addresses;
use crate::error::DomainError;

/// PostgreSQL implementation of AddressRepository
pub struct PostgresAddressRepository {
    db: DatabaseConnection,
}

impl PostgresAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn find_by_id(&self, id: &AddressId) -> Result<Option<Address>, DomainError> {
        let result = addresses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        result.map(Address::try_from).transpose()
    }

    async fn find_by_person(&self, person_id: &PersonId) -> Result<Vec<Address>, DomainError> {
        let results = addresses::Entity::find()
            .filter(addresses::Column::PersonId.eq(person_id.0))
            .order_by_asc(addresses::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        results.into_iter().map(Address::try_from).collect()
    }

    async fn find_all(&self) -> Result<Vec<Address>, DomainError> {
        let results = addresses::Entity::find()
            .order_by_asc(addresses::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        results.into_iter().map(Address::try_from).collect()
    }

    async fn create(&self, address: &NewAddress) -> Result<Address, DomainError> {
        let model = new_address_model(address, address.person_id);

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Address::try_from(result)
    }

    async fn update(&self, address: &Address) -> Result<Address, DomainError> {
        let result = addresses::ActiveModel {
            id: Set(address.id.0),
            street: Set(address.street.clone()),
            number: Set(address.number.clone()),
            neighborhood: Set(address.neighborhood.clone()),
            city: Set(address.city.clone()),
            state: Set(address.state.to_string()),
            zip_code: Set(address.zip_code.clone()),
            person_id: Set(address.person_id.map(|id| id.0)),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Address", address.id),
            e => db_error(e),
        })?;

        Address::try_from(result)
    }

    async fn delete(&self, id: &AddressId) -> Result<(), DomainError> {
        let result = addresses::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            Err(DomainError::not_found("Address", id))
        } else {
            Ok(())
        }
    }
}

/// Insert model for a new address owned by `owner`
pub(super) fn new_address_model(
    address: &NewAddress,
    owner: Option<PersonId>,
) -> addresses::ActiveModel {
    addresses::ActiveModel {
        id: Set(Uuid::new_v4()),
        street: Set(address.street.clone()),
        number: Set(address.number.clone()),
        neighborhood: Set(address.neighborhood.clone()),
        city: Set(address.city.clone()),
        state: Set(address.state.to_string()),
        zip_code: Set(address.zip_code.clone()),
        person_id: Set(owner.map(|id| id.0)),
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<addresses::Model> for Address {
    type Error = DomainError;

    fn try_from(model: addresses::Model) -> Result<Self, Self::Error> {
        let state = model.state.trim().parse::<StateCode>().map_err(|e| {
            DomainError::Internal(format!("Address {} has invalid state: {}", model.id, e))
        })?;

        Ok(Address {
            id: AddressId(model.id),
            street: model.street,
            number: model.number,
            neighborhood: model.neighborhood,
            city: model.city,
            state,
            zip_code: model.zip_code,
            person_id: model.person_id.map(PersonId),
        })
    }
}
