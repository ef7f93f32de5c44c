//! 员工仓储
//!
//! 员工表是迁移脚本预置的静态参考数据，仅提供查询

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::StaffRepositoryTrait;
use crate::error::Result;
use crate::models::Staff;

/// 员工仓储
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 根据 ID 获取员工
    pub async fn get(&self, id: i64) -> Result<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT id, pin, name
            FROM staff
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    /// 根据 PIN 查找员工（登录用，精确字符串匹配）
    pub async fn find_by_pin(&self, pin: &str) -> Result<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT id, pin, name
            FROM staff
            WHERE pin = $1
            "#,
        )
        .bind(pin)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }
}

#[async_trait]
impl StaffRepositoryTrait for StaffRepository {
    async fn get(&self, id: i64) -> Result<Option<Staff>> {
        self.get(id).await
    }

    async fn find_by_pin(&self, pin: &str) -> Result<Option<Staff>> {
        self.find_by_pin(pin).await
    }
}
