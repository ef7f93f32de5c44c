//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::{handlers, state::AppState};

/// 构建客户相关的路由
///
/// 注意 /customers/search 与 /customers/phone/{phone} 必须
/// 先于 /customers/{id} 注册，避免被参数段吞掉
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/register", post(handlers::customer::register))
        .route("/customers/search", get(handlers::customer::search))
        .route("/customers", get(handlers::customer::list))
        .route(
            "/customers/phone/{phone}",
            get(handlers::customer::find_by_phone),
        )
        .route("/customers/{id}", get(handlers::customer::get))
        .route("/customers/{id}", delete(handlers::customer::delete))
        .route(
            "/customers/{id}/phone",
            patch(handlers::customer::update_phone),
        )
        .route(
            "/customers/{id}/tiers/{tier}",
            patch(handlers::reward::set_tier_claimed),
        )
}

/// 构建台账相关的路由（投递录入与奖励兑换）
fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/dropoffs", post(handlers::dropoff::record))
        .route("/rewards/redeem", post(handlers::reward::redeem))
}

/// 构建操作员与统计路由
fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/staff/login", post(handlers::staff::login))
        .route("/stats", get(handlers::stats::overview))
}

/// 汇总所有 API 路由（挂载到 /api 前缀下）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(customer_routes())
        .merge(ledger_routes())
        .merge(ops_routes())
}
