//! `/profile` endpoints for the signed-in user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::commands::{CommandHandler, UpdateStreakCommand, UpdateStreakResult};
use crate::application::dtos::{StreakDto, UpdateStreakResponse};
use crate::presentation::auth::AuthenticatedUser;
use crate::presentation::error::ApiError;
use crate::presentation::state::SharedState;

/// `PUT /profile/update-streak`
///
/// `201` with the new streak when today's session counted, `204` when it
/// had already been counted.
pub async fn update_streak_handler(
    State(state): State<SharedState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Response, ApiError> {
    let result = state
        .command_handlers
        .update_streak
        .handle(UpdateStreakCommand { user_id })
        .await?;

    let response = match result {
        UpdateStreakResult::Unchanged => StatusCode::NO_CONTENT.into_response(),
        UpdateStreakResult::Updated { streak, transition } => (
            StatusCode::CREATED,
            Json(UpdateStreakResponse {
                message: "Streak updated".to_string(),
                transition: transition.as_str().to_string(),
                streak,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

/// `GET /profile/streak`
pub async fn get_streak_handler(
    State(state): State<SharedState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<StreakDto>, ApiError> {
    let dto = state.queries.streak.get_streak(&user_id).await?;
    Ok(Json(dto))
}
