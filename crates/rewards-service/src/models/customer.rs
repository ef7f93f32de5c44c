//! 客户实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::RewardTier;

/// 客户
///
/// 身份信息 + 累计投递量 + 两套并存的奖励状态：
/// 每满 10 件解锁一次的旧版计数奖励（rewards_redeemed），
/// 以及三个相互独立的等级领取标记（bronze/silver/gold）。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 归一化后的 10 位手机号（老客户可能缺失）
    #[sqlx(default)]
    pub phone: Option<String>,
    /// 推荐人（自由文本，注册时由客户填写）
    #[sqlx(default)]
    pub referred_by: Option<String>,
    /// 累计投递件数，只增不减
    pub total_dropoffs: i64,
    /// 已兑换的旧版奖励次数，只增不减
    pub rewards_redeemed: i64,
    pub bronze_claimed: bool,
    pub silver_claimed: bool,
    pub gold_claimed: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// 当前可兑换的旧版奖励数量
    ///
    /// 每累计 10 件解锁一次，减去已兑换次数
    pub fn eligible_rewards(&self) -> i64 {
        self.total_dropoffs / 10 - self.rewards_redeemed
    }

    /// 展示用全名（名在前）
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 查询某个等级的领取标记
    pub fn tier_claimed(&self, tier: RewardTier) -> bool {
        match tier {
            RewardTier::Bronze => self.bronze_claimed,
            RewardTier::Silver => self.silver_claimed,
            RewardTier::Gold => self.gold_claimed,
        }
    }
}

/// 新建客户的输入
///
/// 计数器与等级标记由存储层以零值初始化
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub referred_by: Option<String>,
}
