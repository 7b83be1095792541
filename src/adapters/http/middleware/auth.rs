//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` - validates Bearer tokens and injects `IdentityContext`
//! - `RequireAuth` - extractor that requires an identity
//!
//! ```text
//! Request → auth_middleware → injects IdentityContext into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The middleware uses the `SessionValidator` port, so the HS256 validator and
//! the test mock plug in the same way.
//!
//! # Example
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/api/whoami", get(whoami))
//!     .route_layer(middleware::from_fn_with_state(validator.clone(), auth_middleware));
//!
//! async fn whoami(RequireAuth(identity): RequireAuth) -> String {
//!     identity.subject_id.to_string()
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::ErrorResponse;
use crate::domain::foundation::{AuthError, IdentityContext};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Extracts `<token>` from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Reads the Bearer token from the `Authorization` header
/// 2. Validates it through the `SessionValidator` port
/// 3. On success, injects `IdentityContext` into request extensions
/// 4. On a missing token, continues without injecting; `RequireAuth` decides
/// 5. On an invalid token, answers 401
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(code = e.code(), "bearer token rejected");
            unauthorized(&e)
        }
    }
}

fn unauthorized(error: &AuthError) -> Response {
    let message = match error {
        AuthError::MissingCredentials => "Authentication required",
        AuthError::TokenExpired => "Token expired",
        AuthError::InvalidToken => "Invalid token",
    };
    ErrorResponse::new(error.code(), message).with_status(StatusCode::UNAUTHORIZED)
}

/// Extractor that requires authentication.
///
/// Returns 401 when `auth_middleware` did not inject an identity.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub IdentityContext);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => unauthorized(&AuthError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn protected(RequireAuth(identity): RequireAuth) -> String {
        identity.subject_id.to_string()
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/protected", get(protected))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_token_parses_standard_header() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_empty() {
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_reaches_handler_with_identity() {
        let response = app(MockSessionValidator::new().with_test_user("good", "user-1"))
            .oneshot(
                HttpRequest::get("/protected")
                    .header("Authorization", "Bearer good")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"user-1");
    }

    #[tokio::test]
    async fn missing_token_is_401_from_extractor() {
        let response = app(MockSessionValidator::new())
            .oneshot(HttpRequest::get("/protected").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["code"], "MISSING_TOKEN");
    }

    #[tokio::test]
    async fn invalid_token_is_401() {
        let response = app(MockSessionValidator::new())
            .oneshot(
                HttpRequest::get("/protected")
                    .header("Authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_TOKEN");
        assert_eq!(body["error"], "Invalid token");
    }

    #[tokio::test]
    async fn expired_token_reports_expiry_code() {
        let validator = MockSessionValidator::new().with_error(AuthError::TokenExpired);
        let response = app(validator)
            .oneshot(
                HttpRequest::get("/protected")
                    .header("Authorization", "Bearer anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "TOKEN_EXPIRED");
    }
}
