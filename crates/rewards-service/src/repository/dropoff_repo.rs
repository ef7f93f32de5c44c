//! 投递记录仓储
//!
//! 投递记录是不可变事实：只提供插入与查询，不提供更新

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::DropoffRepositoryTrait;
use crate::error::Result;
use crate::models::{Dropoff, NewDropoff};

/// 投递记录仓储
pub struct DropoffRepository {
    pool: PgPool,
}

impl DropoffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出某客户的全部投递记录，按投递日期倒序
    pub async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Dropoff>> {
        let dropoffs = sqlx::query_as::<_, Dropoff>(
            r#"
            SELECT id, customer_id, quantity, date, added_by, created_at
            FROM dropoffs
            WHERE customer_id = $1
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(dropoffs)
    }

    // ==================== 事务操作 ====================

    /// 在事务中插入投递记录
    ///
    /// 与客户累计计数的增量更新同属一个事务，二者要么同时生效要么同时回滚
    pub async fn create_in_tx(tx: &mut PgConnection, new: &NewDropoff) -> Result<Dropoff> {
        let dropoff = sqlx::query_as::<_, Dropoff>(
            r#"
            INSERT INTO dropoffs (customer_id, quantity, date, added_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, quantity, date, added_by, created_at
            "#,
        )
        .bind(new.customer_id)
        .bind(new.quantity)
        .bind(new.date)
        .bind(&new.added_by)
        .fetch_one(tx)
        .await?;

        Ok(dropoff)
    }
}

#[async_trait]
impl DropoffRepositoryTrait for DropoffRepository {
    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Dropoff>> {
        self.list_by_customer(customer_id).await
    }
}
