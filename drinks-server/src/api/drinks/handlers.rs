use super::models::{
    DeletedResponse, DrinkResponse, DrinksResponse, ShortDrinksResponse, UpdateDrinkRequest,
};
use crate::auth::Claims;
use crate::errors::{ApiError, ErrorBody};
use crate::models::NewDrink;
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::Extension;
use log::info;

fn caller(claims: &Claims) -> &str {
    claims.sub.as_deref().unwrap_or("unknown")
}

fn drink_id(id: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    id.map(|Path(id)| id).map_err(|_| ApiError::not_found())
}

/// List all drinks without ingredient names
#[utoipa::path(
    get,
    path = "/drinks",
    tag = DRINKS_TAG,
    responses(
        (status = 200, description = "Drinks in short form", body = ShortDrinksResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub(crate) async fn list_short(
    State(state): State<AppState>,
) -> Result<Json<ShortDrinksResponse>, ApiError> {
    let drinks = state.store.all().await?;
    Ok(Json(ShortDrinksResponse {
        success: true,
        drinks: drinks.iter().map(|drink| drink.short()).collect(),
    }))
}

/// List all drinks with full recipes
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = DRINKS_TAG,
    security(("bearer_auth" = ["get:drinks-detail"])),
    responses(
        (status = 200, description = "Drinks in long form", body = DrinksResponse),
        (status = 400, description = "Malformed credential or missing permissions claim", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Permission denied", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub(crate) async fn list_detail(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let drinks = state.store.all().await?;
    Ok(Json(DrinksResponse {
        success: true,
        drinks,
    }))
}

/// Create a drink
#[utoipa::path(
    post,
    path = "/drinks",
    tag = DRINKS_TAG,
    request_body = NewDrink,
    security(("bearer_auth" = ["post:drinks"])),
    responses(
        (status = 200, description = "Drink created", body = DrinksResponse),
        (status = 400, description = "Invalid body, malformed credential or missing permissions claim", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Permission denied", body = ErrorBody),
        (status = 422, description = "Title already taken", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<NewDrink>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let Json(new_drink) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let drink = state.store.insert(new_drink).await?;
    info!("'{}' created drink {}", caller(&claims), drink.id);

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Update a drink's recipe and optionally its title
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    params(("id" = u64, Path, description = "Drink id")),
    request_body = UpdateDrinkRequest,
    security(("bearer_auth" = ["patch:drinks"])),
    responses(
        (status = 200, description = "Drink updated", body = DrinkResponse),
        (status = 400, description = "Invalid body, malformed credential or missing permissions claim", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Permission denied", body = ErrorBody),
        (status = 404, description = "Drink not found", body = ErrorBody),
        (status = 422, description = "Title already taken", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkResponse>, ApiError> {
    let id = drink_id(id)?;
    let mut drink = state.store.get(id).await?.ok_or_else(ApiError::not_found)?;
    let Json(changes) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    if let Some(title) = changes.title {
        drink.title = title;
    }
    drink.recipe = changes.recipe;
    state.store.update(&drink).await?;
    info!("'{}' updated drink {}", caller(&claims), id);

    Ok(Json(DrinkResponse {
        success: true,
        drinks: drink,
    }))
}

/// Delete a drink
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    params(("id" = u64, Path, description = "Drink id")),
    security(("bearer_auth" = ["delete:drinks"])),
    responses(
        (status = 200, description = "Drink deleted", body = DeletedResponse),
        (status = 400, description = "Malformed credential or missing permissions claim", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Permission denied", body = ErrorBody),
        (status = 404, description = "Drink not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = drink_id(id)?;
    state.store.delete(id).await?;
    info!("'{}' deleted drink {}", caller(&claims), id);

    Ok(Json(DeletedResponse { success: true, id }))
}
