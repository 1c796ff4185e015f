use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity established from a verified bearer token.
///
/// Inserted into request extensions by [`authenticate`]; handlers behind the
/// gate receive it as an extractor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that validates bearer tokens and attaches the caller's identity.
///
/// Every token failure produces the same 401 body; the specific cause only
/// goes to the log.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Bearer token rejected");
        ApiError::Unauthorized("Invalid token".to_string())
    })?;

    let identity = AuthenticatedUser {
        user_id: UserId(claims.subject_id),
        username: claims.subject_name,
    };
    tracing::debug!(user_id = %identity.user_id, "Request authenticated");

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// The `Bearer ` prefix is optional, but when present it must match exactly.
fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header required".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                ApiError::Unauthorized("Authorization header required".to_string()).into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::Authenticator;
    use auth::TokenService;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use chrono::Duration;
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::service::UserService;
    use crate::outbound::repositories::InMemoryUserRepository;

    const SECRET: &[u8] = b"middleware-test-secret";

    fn state() -> AppState {
        let authenticator = Arc::new(Authenticator::new(TokenService::new(SECRET)));
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));
        AppState {
            user_service,
            authenticator,
        }
    }

    async fn whoami(identity: AuthenticatedUser) -> String {
        format!("{}:{}", identity.user_id, identity.username)
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    fn request(authorization: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let response = app(state()).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response)
            .await
            .contains("Authorization header required"));
    }

    #[tokio::test]
    async fn test_empty_header_is_rejected() {
        let response = app(state()).oneshot(request(Some(""))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_bearer_token_attaches_identity() {
        let state = state();
        let token = state.authenticator.issue_token(42, "alice").unwrap();

        let response = app(state)
            .oneshot(request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "42:alice");
    }

    #[tokio::test]
    async fn test_raw_token_without_prefix_is_accepted() {
        let state = state();
        let token = state.authenticator.issue_token(7, "bob").unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "7:bob");
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let response = app(state())
            .oneshot(request(Some("Bearer garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Invalid token"));
    }

    #[tokio::test]
    async fn test_lowercase_scheme_is_not_stripped() {
        let state = state();
        let token = state.authenticator.issue_token(42, "alice").unwrap();

        let response = app(state)
            .oneshot(request(Some(&format!("bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_failure_kinds_share_one_response() {
        let state = state();
        let expired = TokenService::new(SECRET)
            .issue_at(42, "alice", Utc::now() - Duration::hours(25))
            .unwrap();
        let foreign = TokenService::new(b"some-other-secret")
            .issue(42, "alice")
            .unwrap();

        let mut bodies = Vec::new();
        for token in [expired.as_str(), foreign.as_str(), "not.a.token"] {
            let response = app(state.clone())
                .oneshot(request(Some(&format!("Bearer {}", token))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_text(response).await);
        }

        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_extractor_without_gate_is_unauthorized() {
        let state = state();
        let app = Router::new()
            .route("/whoami", get(whoami))
            .with_state(state);

        let response = app.oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
