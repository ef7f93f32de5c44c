//! REST API 请求 DTO 定义
//!
//! 字段形状与长度在这里校验，手机号位数、去重等
//! 业务语义校验在服务层进行

use serde::Deserialize;
use validator::Validate;

/// 客户注册请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    #[validate(length(min = 1, max = 100, message = "名字长度必须在1-100个字符之间"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "姓氏长度必须在1-100个字符之间"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 255, message = "邮箱长度必须在1-255个字符之间"))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "手机号长度必须在1-30个字符之间"))]
    pub phone: String,
    pub referred_by: Option<String>,
}

/// 修改手机号请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhoneBody {
    #[validate(length(min = 1, max = 30, message = "手机号长度必须在1-30个字符之间"))]
    pub phone: String,
}

/// 投递录入请求
///
/// date 取 "YYYY-MM-DD" 字符串，由 handler 解析
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordDropoffBody {
    pub customer_id: i64,
    #[validate(range(min = 1, message = "投递数量必须大于等于1"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "投递日期不能为空"))]
    pub date: String,
    pub staff_id: Option<i64>,
}

/// 奖励兑换请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemBody {
    pub customer_id: i64,
}

/// 层级礼品领取标记请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierClaimBody {
    pub claimed: bool,
}

/// 操作员登录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffLoginBody {
    #[validate(length(min = 1, max = 20, message = "PIN 不能为空"))]
    pub pin: String,
}

/// 搜索参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
}

/// 列表排序参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// "name"（默认）或 "createdAt"
    pub order_by: Option<String>,
}

/// 统计查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    /// "YYYY-MM"，缺省为当前月（UTC）
    pub as_of_month: Option<String>,
}
