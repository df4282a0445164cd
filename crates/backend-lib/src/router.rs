// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router for the auth endpoints.
use crate::handlers::users;
use crate::middleware::{require_access_token, require_valid_session};
use crate::storage::Storage;
use crate::AppState;
use axum::{
    http::{header, HeaderName, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use taskmanager_common::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER, USER_ID_HEADER};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router
pub fn create_router<S: Storage + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    let session_routes = Router::new()
        .route("/users/me/access-token", get(users::refresh_access_token::<S>))
        .route_layer(from_fn_with_state(
            state.clone(),
            require_valid_session::<S>,
        ));

    Router::new()
        .route("/users", post(users::signup::<S>))
        .route("/users/login", post(users::login::<S>))
        .merge(session_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Put `routes` behind the access guard.
///
/// Handlers inside can read the caller from `Extension<AuthenticatedUser>`.
/// `routes` must already contain at least one route.
pub fn protect<S: Storage + Clone + 'static>(
    routes: Router<Arc<AppState<S>>>,
    state: Arc<AppState<S>>,
) -> Router<Arc<AppState<S>>> {
    routes.route_layer(from_fn_with_state(state, require_access_token::<S>))
}

fn cors_layer() -> CorsLayer {
    let access = HeaderName::from_static(ACCESS_TOKEN_HEADER);
    let refresh = HeaderName::from_static(REFRESH_TOKEN_HEADER);

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
            Method::DELETE,
            Method::PATCH,
            Method::HEAD,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            access.clone(),
            refresh.clone(),
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .expose_headers([access, refresh])
}
