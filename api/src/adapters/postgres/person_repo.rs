//! PostgreSQL adapter for PersonRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::address_repo::new_address_model;
use super::{db_error, transaction_error};
use crate::domain::entities::{Address, NewAddress, NewPerson, Person, PersonId};
use crate::domain::ports::PersonRepository;
use crate::entity::{addresses, persons};
use crate::error::DomainError;

/// PostgreSQL implementation of PersonRepository
pub struct PostgresPersonRepository {
    db: DatabaseConnection,
}

impl PostgresPersonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonRepository for PostgresPersonRepository {
    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        let result = persons::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Person>, DomainError> {
        let result = persons::Entity::find()
            .filter(persons::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Person>, DomainError> {
        let result = persons::Entity::find()
            .filter(persons::Column::Cpf.eq(cpf))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Person>, DomainError> {
        let results = persons::Entity::find()
            .order_by_asc(persons::Column::Name)
            .order_by_asc(persons::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, person: &NewPerson) -> Result<Person, DomainError> {
        let result = new_person_model(person)
            .insert(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.into())
    }

    async fn create_with_addresses(
        &self,
        person: &NewPerson,
        addresses: &[NewAddress],
    ) -> Result<(Person, Vec<Address>), DomainError> {
        let model = new_person_model(person);
        let addresses = addresses.to_vec();

        self.db
            .transaction::<_, (Person, Vec<Address>), DomainError>(move |txn| {
                Box::pin(async move {
                    let created = model.insert(txn).await.map_err(db_error)?;
                    let owner = PersonId(created.id);

                    let mut linked = Vec::with_capacity(addresses.len());
                    for address in &addresses {
                        let row = new_address_model(address, Some(owner))
                            .insert(txn)
                            .await
                            .map_err(db_error)?;
                        linked.push(Address::try_from(row)?);
                    }

                    Ok((created.into(), linked))
                })
            })
            .await
            .map_err(transaction_error)
    }

    async fn update(&self, person: &Person) -> Result<Person, DomainError> {
        let result = persons::ActiveModel {
            id: Set(person.id.0),
            name: Set(person.name.clone()),
            email: Set(person.email.clone()),
            cpf: Set(person.cpf.clone()),
            birth_date: Set(person.birth_date),
            phone: Set(person.phone.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Person", person.id),
            e => db_error(e),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &PersonId) -> Result<(), DomainError> {
        let result = persons::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| delete_error(id, e))?;

        if result.rows_affected == 0 {
            Err(DomainError::not_found("Person", id))
        } else {
            Ok(())
        }
    }

    async fn delete_detaching(&self, id: &PersonId) -> Result<(), DomainError> {
        let id = *id;

        self.db
            .transaction::<_, (), DomainError>(move |txn| {
                Box::pin(async move {
                    addresses::Entity::update_many()
                        .col_expr(addresses::Column::PersonId, Expr::value(Option::<Uuid>::None))
                        .filter(addresses::Column::PersonId.eq(id.0))
                        .exec(txn)
                        .await
                        .map_err(db_error)?;

                    let result = persons::Entity::delete_by_id(id.0)
                        .exec(txn)
                        .await
                        .map_err(|e| delete_error(&id, e))?;

                    if result.rows_affected == 0 {
                        return Err(DomainError::not_found("Person", id));
                    }
                    Ok(())
                })
            })
            .await
            .map_err(transaction_error)
    }
}

fn new_person_model(person: &NewPerson) -> persons::ActiveModel {
    persons::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(person.name.clone()),
        email: Set(person.email.clone()),
        cpf: Set(person.cpf.clone()),
        birth_date: Set(person.birth_date),
        phone: Set(person.phone.clone()),
    }
}

/// An address linked after the caller's check makes the foreign key reject the delete
fn delete_error(id: &PersonId, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            tracing::warn!(person_id = %id, "Delete blocked by linked addresses");
            DomainError::Conflict(format!("Person with ID {} still has linked addresses", id))
        }
        _ => db_error(e),
    }
}

/// Convert SeaORM model to domain entity
impl From<persons::Model> for Person {
    fn from(model: persons::Model) -> Self {
        Person {
            id: PersonId(model.id),
            name: model.name,
            email: model.email,
            cpf: model.cpf,
            birth_date: model.birth_date,
            phone: model.phone,
        }
    }
}
