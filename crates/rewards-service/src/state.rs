//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::{CustomerRepository, DropoffRepository, StaffRepository};
use crate::service::{CustomerQueryService, IdentityService, RewardLedgerService};

/// 绑定到具体仓储实现的服务类型别名
pub type Identity = IdentityService<CustomerRepository>;
pub type Ledger = RewardLedgerService<CustomerRepository, StaffRepository>;
pub type Query = CustomerQueryService<CustomerRepository, DropoffRepository, StaffRepository>;

/// Axum 应用共享状态
///
/// 三个服务通过 Arc 在 handler 间共享，连接池单独保留给
/// 统计等直接聚合查询使用
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    pub identity: Arc<Identity>,
    pub ledger: Arc<Ledger>,
    pub query: Arc<Query>,
}

impl AppState {
    /// 基于连接池装配仓储与服务
    pub fn new(pool: PgPool) -> Self {
        let customers = Arc::new(CustomerRepository::new(pool.clone()));
        let dropoffs = Arc::new(DropoffRepository::new(pool.clone()));
        let staff = Arc::new(StaffRepository::new(pool.clone()));

        Self {
            identity: Arc::new(IdentityService::new(customers.clone())),
            ledger: Arc::new(RewardLedgerService::new(
                pool.clone(),
                customers.clone(),
                staff.clone(),
            )),
            query: Arc::new(CustomerQueryService::new(customers, dropoffs, staff)),
            pool,
        }
    }
}
