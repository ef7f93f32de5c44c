//! 枚举类型定义

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewardsError};

/// 奖励等级
///
/// 每个等级在客户记录上各有一个独立的领取标记，等级之间无先后约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Bronze,
    Silver,
    Gold,
}

impl RewardTier {
    /// 解析等级名称（小写），无法识别时返回参数验证错误
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            other => Err(RewardsError::Validation(format!(
                "未知的奖励等级: {}（可选值: bronze/silver/gold）",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }
}

/// 客户列表排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerOrder {
    /// 按姓名排序（姓在前，名在后，忽略大小写）
    #[default]
    Name,
    /// 按注册时间倒序
    CreatedAt,
}

impl CustomerOrder {
    /// 解析 orderBy 查询参数，缺省为按姓名排序
    pub fn parse(s: Option<&str>) -> Result<Self> {
        match s {
            None | Some("name") => Ok(Self::Name),
            Some("createdAt") => Ok(Self::CreatedAt),
            Some(other) => Err(RewardsError::Validation(format!(
                "未知的排序方式: {}（可选值: name/createdAt）",
                other
            ))),
        }
    }
}
