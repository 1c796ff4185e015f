use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

const MISSING_FIELDS_MESSAGE: &str = "Username and password are required";

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command()?;

    let session = state.user_service.login(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData {
            message: "Login successful".to_string(),
            token: session.token,
            user: (&session.user).into(),
        },
    ))
}

/// HTTP request body for logging in (raw JSON)
///
/// Missing fields deserialize as empty. An incomplete request is a 400; only
/// a complete one can fail as invalid credentials.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        if self.password.is_empty() {
            return Err(ApiError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
        }
        let username = Username::new(self.username)
            .map_err(|_| ApiError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()))?;

        Ok(LoginCommand {
            username,
            password: self.password,
        })
    }
}
