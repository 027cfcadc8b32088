/*
 * Responsibility
 * - Endpoints that expose the acting user
 * - /me runs behind require_user, /whoami behind optional_user
 */
use axum::Json;

use crate::api::v1::{
    dto::users::{UserResponse, WhoAmIResponse},
    extractors::{CurrentUser, MaybeUserId},
};

pub async fn me(CurrentUser(ctx): CurrentUser) -> Json<UserResponse> {
    Json(ctx.user.into())
}

pub async fn whoami(MaybeUserId(user_id): MaybeUserId) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse { user_id })
}
