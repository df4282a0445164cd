// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! `/users` endpoints: signup, login and access-token refresh.
use crate::auth::{AuthOutcome, SessionContext};
use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use taskmanager_common::{AccessTokenBody, Credentials, ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};

fn parse_body(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, AppError> {
    payload
        .map(|Json(credentials)| credentials)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

fn log_failure(err: &AppError) {
    if err.status_code().is_server_error() {
        tracing::error!(error = %err, "auth request failed");
    } else {
        tracing::debug!(reason = %err, "auth request rejected");
    }
}

/// Both token headers plus the client view of the user
fn session_response(outcome: AuthOutcome) -> impl IntoResponse {
    (
        [
            (REFRESH_TOKEN_HEADER, outcome.tokens.refresh_token),
            (ACCESS_TOKEN_HEADER, outcome.tokens.access_token),
        ],
        Json(outcome.user.serialize_for_client()),
    )
}

/// `POST /users`
#[tracing::instrument(skip(state, payload))]
pub async fn signup<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = parse_body(payload)?;
    let outcome = state
        .auth
        .signup(credentials)
        .await
        .inspect_err(log_failure)?;

    tracing::info!(user_id = %outcome.user.id, "user signed up");
    Ok(session_response(outcome))
}

/// `POST /users/login`
#[tracing::instrument(skip(state, payload))]
pub async fn login<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let credentials = parse_body(payload)?;
    let outcome = state
        .auth
        .login(credentials)
        .await
        .inspect_err(log_failure)?;

    tracing::info!(user_id = %outcome.user.id, "user logged in");
    Ok(session_response(outcome))
}

/// `GET /users/me/access-token`, behind the refresh-session guard.
///
/// The session was already matched and checked for expiry by the guard;
/// this only mints a fresh access token for its owner.
#[tracing::instrument(skip_all)]
pub async fn refresh_access_token<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(context): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let access_token = state
        .auth
        .issue_access_token(&context.user.id)
        .inspect_err(log_failure)?;

    tracing::debug!(user_id = %context.user.id, "access token refreshed");
    Ok((
        [(ACCESS_TOKEN_HEADER, access_token.clone())],
        Json(AccessTokenBody { access_token }),
    ))
}
