//! 投递录入 API 处理器

use axum::{Json, extract::State};
use chrono::NaiveDate;
use tracing::instrument;
use validator::Validate;

use crate::{
    dto::{ApiResponse, RecordDropoffBody},
    error::RewardsError,
    service::dto::{DropoffOutcome, RecordDropoffRequest},
    state::AppState,
};

/// 登记一次投递
///
/// POST /api/dropoffs
#[instrument(skip(state, body))]
pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<RecordDropoffBody>,
) -> Result<Json<ApiResponse<DropoffOutcome>>, RewardsError> {
    body.validate()?;

    let date = NaiveDate::parse_from_str(&body.date, "%Y-%m-%d").map_err(|_| {
        RewardsError::Validation(format!("投递日期格式无效: {} (应为 YYYY-MM-DD)", body.date))
    })?;

    let outcome = state
        .ledger
        .record_dropoff(RecordDropoffRequest {
            customer_id: body.customer_id,
            quantity: body.quantity,
            date,
            staff_id: body.staff_id,
        })
        .await?;

    Ok(Json(ApiResponse::success_with_message(outcome, "投递已登记")))
}
