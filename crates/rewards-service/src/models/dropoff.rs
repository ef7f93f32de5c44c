//! 投递记录实体定义

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 投递记录
///
/// 不可变事实：创建后不允许修改，仅随所属客户的删除而级联删除
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Dropoff {
    pub id: i64,
    pub customer_id: i64,
    /// 投递件数，必须为正
    pub quantity: i32,
    /// 投递日期（仅日历日，无时间部分）
    pub date: NaiveDate,
    /// 录入员工的展示名，无法识别时为 "Unknown"
    pub added_by: String,
    pub created_at: DateTime<Utc>,
}

/// 新建投递记录的输入
#[derive(Debug, Clone)]
pub struct NewDropoff {
    pub customer_id: i64,
    pub quantity: i32,
    pub date: NaiveDate,
    pub added_by: String,
}
