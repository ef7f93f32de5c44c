//! 服务错误类型定义
//!
//! 覆盖参数校验、资源缺失、业务冲突与系统错误，
//! 并提供到 HTTP 响应的统一映射。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 奖励服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum RewardsError {
    // 参数校验
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 资源不存在
    #[error("客户不存在: {0}")]
    CustomerNotFound(i64),

    #[error("客户不存在: phone={0}")]
    CustomerNotFoundByPhone(String),

    // 认证
    #[error("PIN 无效")]
    InvalidPin,

    // 业务冲突
    #[error("手机号已绑定其他客户: phone={phone}, customer_id={owner_id}")]
    PhoneConflict { phone: String, owner_id: i64 },

    #[error("暂无可兑换的奖励: customer_id={0}")]
    NoRewardAvailable(i64),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, RewardsError>;

impl RewardsError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CustomerNotFound(_) | Self::CustomerNotFoundByPhone(_) => StatusCode::NOT_FOUND,
            Self::InvalidPin => StatusCode::UNAUTHORIZED,
            // 请求合法但与当前状态冲突
            Self::PhoneConflict { .. } | Self::NoRewardAvailable(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CustomerNotFound(_) | Self::CustomerNotFoundByPhone(_) => "CUSTOMER_NOT_FOUND",
            Self::InvalidPin => "INVALID_PIN",
            Self::PhoneConflict { .. } => "PHONE_CONFLICT",
            Self::NoRewardAvailable(_) => "NO_REWARD_AVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for RewardsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for RewardsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
