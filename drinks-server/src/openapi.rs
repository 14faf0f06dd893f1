use crate::api::drinks::{handlers, models as api_models};
use crate::api::health;
use crate::errors::ErrorBody;
use crate::models::{Drink, Ingredient, NewDrink, ShortDrink, ShortIngredient};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const DRINKS_TAG: &str = "Drinks API";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::ready_check,
        handlers::list_short,
        handlers::list_detail,
        handlers::create,
        handlers::update,
        handlers::delete,
    ),
    components(schemas(
        Ingredient,
        ShortIngredient,
        Drink,
        ShortDrink,
        NewDrink,
        api_models::ShortDrinksResponse,
        api_models::DrinksResponse,
        api_models::DrinkResponse,
        api_models::DeletedResponse,
        api_models::UpdateDrinkRequest,
        health::Health,
        ErrorBody,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = DRINKS_TAG, description = "Drink menu endpoints"),
    ),
    info(
        title = "Drinks API",
        description = "Drink menu resource server guarded by bearer tokens",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the protected operations
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates a router serving the generated OpenAPI document
pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}
