//! Bearer-token authentication middleware.
//!
//! Token issuance (login, JWT signing) is the identity collaborator's
//! concern; this middleware only resolves the presented token through the
//! injected `IdentityProvider` and stores the resulting `AuthUser` in the
//! request extensions for the handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    domain::AuthError,
    infrastructure::dto::http::ErrorBody,
    ui::state::AppState,
};

fn unauthorized(error: AuthError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            message: error.to_string(),
        }),
    )
        .into_response()
}

/// Resolve `Authorization: Bearer <token>` to an `AuthUser`, or reject with
/// 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized(AuthError::MissingToken);
    };

    match state.identities.resolve(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(error) => {
            tracing::warn!("Rejected request with unresolvable token: {}", error);
            unauthorized(error)
        }
    }
}
