//! 操作员登录 API 处理器

use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use crate::{
    dto::{ApiResponse, StaffLoginBody},
    error::RewardsError,
    models::Staff,
    state::AppState,
};

/// 操作员 PIN 登录
///
/// POST /api/staff/login
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<StaffLoginBody>,
) -> Result<Json<ApiResponse<Staff>>, RewardsError> {
    body.validate()?;
    let staff = state.query.staff_login(&body.pin).await?;
    Ok(Json(ApiResponse::success_with_message(staff, "登录成功")))
}
