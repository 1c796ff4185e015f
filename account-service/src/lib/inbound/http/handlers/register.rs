use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::domain::user::profile::ProfileUpdate;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = payload?;

    let session = state
        .user_service
        .register(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData {
            message: "User created successfully".to_string(),
            token: session.token,
            user: (&session.user).into(),
        },
    ))
}

/// HTTP request body for registering an account (raw JSON).
///
/// Missing fields deserialize as empty and fail validation with a
/// field-level message instead of a generic body rejection.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    preferred_accent: Option<String>,
    study_level: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, UserError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let preferences = ProfileUpdate {
            preferred_accent: self.preferred_accent,
            study_level: self.study_level,
        }
        .validate()?;

        Ok(RegisterCommand {
            username,
            email,
            password,
            preferred_accent: preferences.preferred_accent.unwrap_or_default(),
            study_level: preferences.study_level.unwrap_or_default(),
        })
    }
}
