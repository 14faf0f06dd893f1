pub mod handlers;
pub mod models;

use crate::auth::permissions::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};
use crate::auth::{require_permission, Permission};
use crate::state::AppState;
use axum::handler::Handler;
use axum::middleware;
use axum::routing::{get, patch};
use axum::Router;

/// Drink routes; every mutating operation is guarded by its own permission
pub(super) fn router(state: &AppState) -> Router<AppState> {
    let requires = |permission: Permission| {
        middleware::from_fn_with_state(state.guard(permission), require_permission)
    };

    Router::new()
        .route(
            "/drinks",
            get(handlers::list_short).post(handlers::create.layer(requires(POST_DRINKS))),
        )
        .route(
            "/drinks-detail",
            get(handlers::list_detail.layer(requires(GET_DRINKS_DETAIL))),
        )
        .route(
            "/drinks/{id}",
            patch(handlers::update.layer(requires(PATCH_DRINKS)))
                .delete(handlers::delete.layer(requires(DELETE_DRINKS))),
        )
}
