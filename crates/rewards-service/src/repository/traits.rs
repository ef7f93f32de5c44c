//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Customer, CustomerOrder, Dropoff, NewCustomer, RewardTier, Staff};

/// 客户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepositoryTrait: Send + Sync {
    // 查询
    async fn get(&self, id: i64) -> Result<Option<Customer>>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>>;
    async fn find_by_identity(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Option<Customer>>;
    async fn search(&self, query: &str) -> Result<Vec<Customer>>;
    async fn list(&self, order: CustomerOrder) -> Result<Vec<Customer>>;

    // 写入
    async fn create(&self, new: &NewCustomer) -> Result<Customer>;
    async fn update_phone(&self, id: i64, phone: &str) -> Result<Option<Customer>>;
    async fn set_tier_claimed(
        &self,
        id: i64,
        tier: RewardTier,
        claimed: bool,
    ) -> Result<Option<Customer>>;
    /// 条件兑换：仅当有可兑换奖励时递增已兑换次数，否则返回 None
    async fn try_redeem_reward(&self, id: i64) -> Result<Option<Customer>>;
    async fn delete(&self, id: i64) -> Result<Option<Customer>>;
}

/// 投递记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DropoffRepositoryTrait: Send + Sync {
    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Dropoff>>;
}

/// 员工仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffRepositoryTrait: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<Staff>>;
    async fn find_by_pin(&self, pin: &str) -> Result<Option<Staff>>;
}
