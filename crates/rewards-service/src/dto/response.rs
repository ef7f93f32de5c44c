//! REST API 响应 DTO 定义

use serde::Serialize;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 运营统计总览
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    /// 客户总数
    pub total_customers: i64,
    /// 本月（asOfMonth）新注册客户数
    pub new_customers_this_month: i64,
    /// 本月投递件数（按投递日期聚合）
    pub dropoffs_this_month: i64,
    /// 历史累计投递件数
    pub total_dropoffs_all_time: i64,
    /// 历史累计兑换次数
    pub total_rewards_redeemed_all_time: i64,
}
