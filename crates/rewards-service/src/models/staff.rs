//! 员工实体定义

use serde::{Deserialize, Serialize};

/// 员工
///
/// 静态参考数据，由迁移脚本预置。PIN 是共享口令而非安全边界，
/// 按原始业务约定以明文存储并在登录响应中原样返回。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: i64,
    pub pin: String,
    pub name: String,
}
