//! The two auth guards.
//!
//! Each guard either attaches an identity to the request extensions and runs
//! the rest of the stack, or rejects with 401. Nothing is attached on failure.
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::metrics::GUARD_REJECTED;
use crate::storage::Storage;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use ::metrics::counter;
use std::sync::Arc;
use taskmanager_common::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER, USER_ID_HEADER};

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// Access guard: verifies `x-access-token` and attaches [`AuthenticatedUser`].
///
/// Signature and expiry only; this path never touches storage.
pub async fn require_access_token<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let verified = header(request.headers(), ACCESS_TOKEN_HEADER)
        .ok_or(AppError::InvalidToken)
        .and_then(|token| state.auth.verify_access_token(token));

    let user_id = match verified {
        Ok(user_id) => user_id,
        Err(err) => {
            counter!(GUARD_REJECTED, "guard" => "access").increment(1);
            tracing::warn!(reason = %err, "access token rejected");
            return Err(err);
        },
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}

/// Refresh-session guard: checks `x-refresh-token` against the sessions of
/// the user named by `_id` and attaches the matched [`SessionContext`].
///
/// [`SessionContext`]: crate::auth::SessionContext
pub async fn require_valid_session<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let refresh_token = header(request.headers(), REFRESH_TOKEN_HEADER).map(str::to_owned);
    let user_id = header(request.headers(), USER_ID_HEADER).map(str::to_owned);

    let validated = match (user_id, refresh_token) {
        (Some(user_id), Some(refresh_token)) => {
            state.auth.validate_session(&user_id, &refresh_token).await
        },
        _ => Err(AppError::SessionNotFound),
    };

    let context = match validated {
        Ok(context) => context,
        Err(err) => {
            counter!(GUARD_REJECTED, "guard" => "session").increment(1);
            return Err(match err {
                AppError::SessionNotFound | AppError::SessionExpired => {
                    tracing::warn!(reason = %err, "refresh session rejected");
                    err
                },
                other => {
                    tracing::error!(error = %other, "refresh session lookup failed");
                    AppError::SessionNotFound
                },
            });
        },
    };

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
