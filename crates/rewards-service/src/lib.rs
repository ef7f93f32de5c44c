//! 回收站客户奖励服务
//!
//! 为线下回收站点提供客户档案、投递台账与奖励兑换能力：
//! - 身份解析：手机号优先去重，老档案按姓名邮箱合并并回填手机号
//! - 奖励台账：投递事实 + 计数器同事务写入，兑换余额派生计算
//! - 前台目录：搜索、列表、档案详情、操作员 PIN 登录与运营统计

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{Result, RewardsError};
pub use models::{Customer, CustomerOrder, Dropoff, NewCustomer, NewDropoff, RewardTier, Staff};
pub use service::{CustomerQueryService, IdentityService, RewardLedgerService, normalize_phone};
pub use state::AppState;
