//! 服务层数据传输对象

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Customer, Dropoff};

/// 注册请求（已完成 HTTP 层的形状校验，字段语义校验在服务层进行）
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub referred_by: Option<String>,
}

/// 注册结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutcome {
    pub customer: Customer,
    /// true 表示本次注册创建了新客户记录
    pub is_new: bool,
}

/// 投递录入请求
#[derive(Debug, Clone)]
pub struct RecordDropoffRequest {
    pub customer_id: i64,
    pub quantity: i32,
    pub date: NaiveDate,
    /// 录入员工 ID，缺省或无法识别时 added_by 记为 "Unknown"
    pub staff_id: Option<i64>,
}

/// 投递录入结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropoffOutcome {
    pub customer: Customer,
    pub dropoff: Dropoff,
    /// 录入后可兑换的旧版奖励数量
    pub eligible_rewards: i64,
}

/// 客户详情（含投递历史，按日期倒序）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerWithHistory {
    pub customer: Customer,
    pub dropoffs: Vec<Dropoff>,
}
