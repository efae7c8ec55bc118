//! Person handlers
//!
//! Endpoints for person management and the person/address link.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::parse_id;
use crate::app::{AddressDto, PersonDto};
use crate::domain::entities::{AddressId, PersonId};
use crate::domain::ports::{AddressRepository, PersonRepository};
use crate::error::AppError;
use crate::AppState;

fn person_id(raw: &str) -> Result<PersonId, AppError> {
    parse_id("person", raw).map(PersonId)
}

fn address_id(raw: &str) -> Result<AddressId, AppError> {
    parse_id("address", raw).map(AddressId)
}

/// POST /api/persons
///
/// Register a person. Field formats are checked first, all at once;
/// age and uniqueness are checked by the service afterwards.
pub async fn create_person<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Json(request): Json<PersonDto>,
) -> Result<(StatusCode, Json<PersonDto>), AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    request.validate()?;
    let person = state.person_service.create(&request).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /api/persons
pub async fn list_persons<PR, AR>(
    State(state): State<AppState<PR, AR>>,
) -> Result<Json<Vec<PersonDto>>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    Ok(Json(state.person_service.list().await?))
}

/// GET /api/persons/:id
pub async fn get_person<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
) -> Result<Json<PersonDto>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    Ok(Json(state.person_service.get(&id).await?))
}

/// PUT /api/persons/:id
///
/// Replace the scalar fields of a person. Linked addresses are left alone,
/// so an `addresses` list in the body is neither validated nor used.
pub async fn update_person<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
    Json(request): Json<PersonDto>,
) -> Result<Json<PersonDto>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    request.validate_scalars()?;
    let person = state.person_service.update(&id, &request).await?;
    Ok(Json(person))
}

/// DELETE /api/persons/:id
pub async fn delete_person<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    state.person_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/persons/:id/addresses
pub async fn list_person_addresses<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AddressDto>>, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    let addresses = state.person_service.list_addresses_for(&id).await?;
    Ok(Json(addresses))
}

/// POST /api/persons/:id/addresses
///
/// Create a new address already linked to the person.
pub async fn add_person_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path(id): Path<String>,
    Json(request): Json<AddressDto>,
) -> Result<(StatusCode, Json<AddressDto>), AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    let address = state.person_service.add_new_address(&id, &request).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// POST /api/persons/:id/addresses/:address_id
///
/// Link an existing address to the person.
pub async fn attach_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path((id, address)): Path<(String, String)>,
) -> Result<StatusCode, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    let address = address_id(&address)?;
    state
        .person_service
        .attach_existing_address(&id, &address)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/persons/:id/addresses/:address_id
///
/// Unlink an address from the person. Neither record is deleted.
pub async fn detach_address<PR, AR>(
    State(state): State<AppState<PR, AR>>,
    Path((id, address)): Path<(String, String)>,
) -> Result<StatusCode, AppError>
where
    PR: PersonRepository + 'static,
    AR: AddressRepository + 'static,
{
    let id = person_id(&id)?;
    let address = address_id(&address)?;
    state.person_service.detach_address(&id, &address).await?;
    Ok(StatusCode::NO_CONTENT)
}
