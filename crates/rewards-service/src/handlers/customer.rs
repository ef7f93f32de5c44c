//! 客户管理 API 处理器
//!
//! 注册、搜索、列表、档案详情、手机号维护与删除

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use validator::Validate;

use crate::{
    dto::{ApiResponse, ListParams, RegisterBody, SearchParams, UpdatePhoneBody},
    error::RewardsError,
    models::{Customer, CustomerOrder},
    service::dto::{CustomerWithHistory, RegisterOutcome, RegisterRequest},
    state::AppState,
};

/// 客户注册（解析去重后创建或返回已有档案）
///
/// POST /api/customers/register
#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<ApiResponse<RegisterOutcome>>, RewardsError> {
    body.validate()?;

    let outcome = state
        .identity
        .resolve_or_create(RegisterRequest {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            referred_by: body.referred_by,
        })
        .await?;

    // 新老客户用不同的欢迎语，前台据此展示
    let message = if outcome.is_new {
        "注册成功！"
    } else {
        "欢迎回来！"
    };

    Ok(Json(ApiResponse::success_with_message(outcome, message)))
}

/// 客户搜索
///
/// GET /api/customers/search?query=
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<Customer>>>, RewardsError> {
    let query = params
        .query
        .ok_or_else(|| RewardsError::Validation("缺少查询参数 query".to_string()))?;

    let customers = state.query.search(&query).await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// 客户列表
///
/// GET /api/customers?orderBy=name|createdAt
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<Customer>>>, RewardsError> {
    let order = CustomerOrder::parse(params.order_by.as_deref())?;
    let customers = state.query.list(order).await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// 按手机号查找客户
///
/// GET /api/customers/phone/{phone}
#[instrument(skip(state))]
pub async fn find_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<ApiResponse<Customer>>, RewardsError> {
    let customer = state.query.find_by_phone(&phone).await?;
    Ok(Json(ApiResponse::success(customer)))
}

/// 客户档案详情（含投递历史）
///
/// GET /api/customers/{id}
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CustomerWithHistory>>, RewardsError> {
    let detail = state.query.get_with_history(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// 修改客户手机号
///
/// PATCH /api/customers/{id}/phone
#[instrument(skip(state, body))]
pub async fn update_phone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePhoneBody>,
) -> Result<Json<ApiResponse<Customer>>, RewardsError> {
    body.validate()?;
    let customer = state.identity.update_phone(id, &body.phone).await?;
    Ok(Json(ApiResponse::success(customer)))
}

/// 删除客户（投递历史级联删除）
///
/// DELETE /api/customers/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Customer>>, RewardsError> {
    let deleted = state.query.delete_customer(id).await?;
    Ok(Json(ApiResponse::success_with_message(deleted, "客户已删除")))
}
