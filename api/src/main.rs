//! Registry API Server
//!
//! Keeps people and their postal addresses: registration with eligibility
//! and uniqueness checks, and the link between a person and addresses.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresAddressRepository, PostgresPersonRepository};
use app::{AddressService, PersonService};
use config::Config;
use domain::ports::{AddressRepository, PersonRepository};

/// Application state shared across all handlers
pub struct AppState<PR, AR>
where
    PR: PersonRepository,
    AR: AddressRepository,
{
    pub person_service: Arc<PersonService<PR, AR>>,
    pub address_service: Arc<AddressService<AR>>,
}

// Derived Clone would require the store types themselves to be Clone.
impl<PR, AR> Clone for AppState<PR, AR>
where
    PR: PersonRepository,
    AR: AddressRepository,
{
    fn clone(&self) -> Self {
        Self {
            person_service: self.person_service.clone(),
            address_service: self.address_service.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router over any pair of stores
pub fn build_router<PR, AR>(state: AppState<PR, AR>) -> Router
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    Router::new()
        .route("/health", get(health))
        // Persons
        .route(
            "/api/persons",
            post(handlers::create_person::<PR, AR>).get(handlers::list_persons::<PR, AR>),
        )
        .route(
            "/api/persons/:id",
            get(handlers::get_person::<PR, AR>)
                .put(handlers::update_person::<PR, AR>)
                .delete(handlers::delete_person::<PR, AR>),
        )
        // Person/address link
        .route(
            "/api/persons/:id/addresses",
            get(handlers::list_person_addresses::<PR, AR>)
                .post(handlers::add_person_address::<PR, AR>),
        )
        .route(
            "/api/persons/:id/addresses/:address_id",
            post(handlers::attach_address::<PR, AR>).delete(handlers::detach_address::<PR, AR>),
        )
        // Addresses
        .route(
            "/api/addresses",
            post(handlers::create_address::<PR, AR>).get(handlers::list_addresses::<PR, AR>),
        )
        .route(
            "/api/addresses/:id",
            get(handlers::get_address::<PR, AR>)
                .put(handlers::update_address::<PR, AR>)
                .delete(handlers::delete_address::<PR, AR>),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,registry_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Registry API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let person_repo = Arc::new(PostgresPersonRepository::new(db.clone()));
    let address_repo = Arc::new(PostgresAddressRepository::new(db));

    // Create application services
    let person_service = Arc::new(
        PersonService::new(person_repo, address_repo.clone())
            .with_delete_policy(config.person_delete_policy)
            .with_minimum_age(config.minimum_age),
    );
    let address_service = Arc::new(AddressService::new(address_repo));

    tracing::info!(
        delete_policy = %config.person_delete_policy,
        minimum_age = config.minimum_age,
        "Services configured"
    );

    let app = build_router(AppState {
        person_service,
        address_service,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
