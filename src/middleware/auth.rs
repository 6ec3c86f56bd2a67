use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{verify_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated subject extracted from the bearer token.
/// Handlers read it with `Extension<AuthUser>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.id }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Any failure ends the request with 401 before the handler runs.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_jwt_from_headers(request.headers()) {
        Ok(token) => token,
        Err(reason) => {
            tracing::debug!("Rejecting request to {}: {}", request.uri().path(), reason);
            return ApiError::unauthorized().into_response();
        }
    };

    let claims = match verify_jwt(&token, &state.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Rejecting request to {}: {}", request.uri().path(), e);
            return ApiError::unauthorized().into_response();
        }
    };

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated subject {}", auth_user.user_id);
    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// Extract the credential from the Authorization header.
///
/// The header is split on whitespace and the second segment is the token;
/// the scheme word itself is not checked.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Authorization header is not visible ASCII")?;

    auth_str
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or("Authorization header has no token segment")
}
