use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    identity: AuthenticatedUser,
) -> Result<ApiSuccess<GetProfileResponseData>, ApiError> {
    state
        .user_service
        .get_profile(&identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                GetProfileResponseData { user: user.into() },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProfileResponseData {
    pub user: ProfileData,
}
