use crate::auth::jwt::JwtValidator;
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Reject requests without a valid bearer token; otherwise attach [`AuthUser`].
pub async fn auth_middleware(
    State(validator): State<Arc<JwtValidator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match validator.validate_request(request.headers()) {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::debug!(
                path = %request.uri().path(),
                error = %err,
                "Authentication failed"
            );
            return HttpAppError(err).into_response();
        }
    };

    request.extensions_mut().insert(AuthUser { user_id });
    next.run(request).await
}
