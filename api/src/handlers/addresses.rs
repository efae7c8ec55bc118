//! Address handlers
//!
//! Endpoints for standalone address management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::parse_id;
use crate::app::AddressDto;
use crate::domain::entities::AddressId;
use crate::domain::ports::{AddressRepository, PersonRepository};
use crate::error::AppError;
use crate::AppState;

/// POST /api/addresses
pub async fn create_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Json(request): Json<AddressDto>,
) -> Result<(StatusCode, Json<AddressDto>), AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let address = state.address_service.create(&request).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// GET /api/addresses
pub async fn list_addresses<PR, AR>(
    State(state): State<AppState<PR, AR>>,
) -> Result<Json<Vec<AddressDto>>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    Ok(Json(state.address_service.list().await?))
}

/// GET /api/addresses/:id
pub async fn get_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
) -> Result<Json<AddressDto>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = AddressId(parse_id("address", &id)?);
    Ok(Json(state.address_service.get(&id).await?))
}

/// PUT /api/addresses/:id
///
/// The owning-person link is not changed by this endpoint.
pub async fn update_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
    Json(request): Json<AddressDto>,
) -> Result<Json<AddressDto>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = AddressId(parse_id("address", &id)?);
    let address = state.address_service.update(&id, &request).await?;
    Ok(Json(address))
}

/// DELETE /api/addresses/:id
pub async fn delete_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = AddressId(parse_id("address", &id)?);
    state.address_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
