use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::domain::user::profile::ProfileUpdate;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Partial profile update. Absent fields keep their stored value; present
/// fields must be members of their allowed set or nothing is written.
pub async fn update_profile(
    State(state): State<AppState>,
    identity: AuthenticatedUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<ApiSuccess<UpdateProfileResponseData>, ApiError> {
    let Json(body) = payload?;
    let patch = ProfileUpdate::from(body)
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state
        .user_service
        .update_profile(&identity.user_id, patch)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateProfileResponseData {
            message: "Profile updated successfully".to_string(),
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for a profile update (raw JSON)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    preferred_accent: Option<String>,
    study_level: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(body: UpdateProfileRequest) -> Self {
        Self {
            preferred_accent: body.preferred_accent,
            study_level: body.study_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponseData {
    pub message: String,
    pub user: ProfileData,
}
