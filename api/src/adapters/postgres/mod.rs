//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

use sea_orm::{DbErr, SqlErr, TransactionError};

use crate::error::DomainError;

pub mod address_repo;
pub mod person_repo;


pub use address_repo::PostgresAddressRepository;
pub use person_repo::PostgresPersonRepository;

/// Map a SeaORM error into the domain taxonomy.
/// Constraint violations become conflicts; everything else is a database failure.
pub(crate) fn db_error(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("Unique constraint violated: {}", detail);
            DomainError::Conflict("Person with this email or CPF already exists".to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!("Foreign key constraint violated: {}", detail);
            DomainError::Conflict("Linked person does not exist".to_string())
        }
        _ => DomainError::Database(e.to_string()),
    }
}

/// Unwrap the error of a `TransactionTrait::transaction` closure.
/// Errors raised inside the closure are already domain errors.
pub(crate) fn transaction_error(e: TransactionError<DomainError>) -> DomainError {
    match e {
        TransactionError::Connection(e) => db_error(e),
        TransactionError::Transaction(e) => e,
    }
}
