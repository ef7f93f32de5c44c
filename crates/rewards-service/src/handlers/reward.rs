//! 奖励兑换与层级礼品 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::{
    dto::{ApiResponse, RedeemBody, TierClaimBody},
    error::RewardsError,
    models::{Customer, RewardTier},
    state::AppState,
};

/// 兑换一次奖励
///
/// POST /api/rewards/redeem
#[instrument(skip(state))]
pub async fn redeem(
    State(state): State<AppState>,
    Json(body): Json<RedeemBody>,
) -> Result<Json<ApiResponse<Customer>>, RewardsError> {
    let customer = state.ledger.redeem_reward(body.customer_id).await?;
    Ok(Json(ApiResponse::success_with_message(customer, "兑换成功")))
}

/// 标记/取消层级礼品领取
///
/// PATCH /api/customers/{id}/tiers/{tier}
#[instrument(skip(state))]
pub async fn set_tier_claimed(
    State(state): State<AppState>,
    Path((id, tier)): Path<(i64, String)>,
    Json(body): Json<TierClaimBody>,
) -> Result<Json<ApiResponse<Customer>>, RewardsError> {
    let tier = RewardTier::parse(&tier)?;
    let customer = state.ledger.set_tier_claimed(id, tier, body.claimed).await?;
    Ok(Json(ApiResponse::success(customer)))
}
