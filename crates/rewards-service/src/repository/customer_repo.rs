//! 客户仓储
//!
//! 提供客户记录的数据访问，计数器更新一律使用 SQL 侧增量，
//! 避免应用内存中的读-改-写在并发下丢失更新

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::CustomerRepositoryTrait;
use crate::error::Result;
use crate::models::{Customer, CustomerOrder, NewCustomer, RewardTier};

/// 转义 LIKE/ILIKE 的元字符，关键词按字面子串匹配
///
/// 不转义的话 "100%" 会匹配所有客户而不是字面的 "100%"
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// 客户仓储
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 获取客户
    pub async fn get(&self, id: i64) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, email, phone, referred_by,
                   total_dropoffs, rewards_redeemed,
                   bronze_claimed, silver_claimed, gold_claimed, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 根据归一化手机号精确查找客户
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, email, phone, referred_by,
                   total_dropoffs, rewards_redeemed,
                   bronze_claimed, silver_claimed, gold_claimed, created_at
            FROM customers
            WHERE phone = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 按（名、姓、邮箱）三元组忽略大小写精确匹配
    ///
    /// 邮箱不唯一，同一三元组理论上可能命中多条，取 ID 最小的一条保证确定性
    pub async fn find_by_identity(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, email, phone, referred_by,
                   total_dropoffs, rewards_redeemed,
                   bronze_claimed, silver_claimed, gold_claimed, created_at
            FROM customers
            WHERE LOWER(first_name) = LOWER($1)
              AND LOWER(last_name) = LOWER($2)
              AND LOWER(email) = LOWER($3)
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 子串搜索：匹配名、姓、邮箱以及 "名 姓" 拼接，忽略大小写
    ///
    /// 结果按姓、名排序
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>> {
        let pattern = format!("%{}%", escape_like(query));

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, email, phone, referred_by,
                   total_dropoffs, rewards_redeemed,
                   bronze_claimed, silver_claimed, gold_claimed, created_at
            FROM customers
            WHERE first_name ILIKE $1
               OR last_name ILIKE $1
               OR email ILIKE $1
               OR (first_name || ' ' || last_name) ILIKE $1
            ORDER BY LOWER(last_name) ASC, LOWER(first_name) ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// 列出全部客户
    pub async fn list(&self, order: CustomerOrder) -> Result<Vec<Customer>> {
        let sql = match order {
            CustomerOrder::Name => {
                r#"
                SELECT id, first_name, last_name, email, phone, referred_by,
                       total_dropoffs, rewards_redeemed,
                       bronze_claimed, silver_claimed, gold_claimed, created_at
                FROM customers
                ORDER BY LOWER(last_name) ASC, LOWER(first_name) ASC
                "#
            }
            CustomerOrder::CreatedAt => {
                r#"
                SELECT id, first_name, last_name, email, phone, referred_by,
                       total_dropoffs, rewards_redeemed,
                       bronze_claimed, silver_claimed, gold_claimed, created_at
                FROM customers
                ORDER BY created_at DESC, id DESC
                "#
            }
        };

        let customers = sqlx::query_as::<_, Customer>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    // ==================== 写入操作 ====================

    /// 创建客户，计数器与等级标记以零值初始化
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, email, phone, referred_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, phone, referred_by,
                      total_dropoffs, rewards_redeemed,
                      bronze_claimed, silver_claimed, gold_claimed, created_at
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.referred_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 更新客户手机号（注册时回填或员工修正）
    pub async fn update_phone(&self, id: i64, phone: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET phone = $2
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, referred_by,
                      total_dropoffs, rewards_redeemed,
                      bronze_claimed, silver_claimed, gold_claimed, created_at
            "#,
        )
        .bind(id)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 设置某个等级的领取标记
    ///
    /// 三个标记彼此独立，也不与旧版兑换计数联动
    pub async fn set_tier_claimed(
        &self,
        id: i64,
        tier: RewardTier,
        claimed: bool,
    ) -> Result<Option<Customer>> {
        // 列名来自固定枚举，不拼接外部输入
        let sql = match tier {
            RewardTier::Bronze => {
                r#"
                UPDATE customers SET bronze_claimed = $2
                WHERE id = $1
                RETURNING id, first_name, last_name, email, phone, referred_by,
                          total_dropoffs, rewards_redeemed,
                          bronze_claimed, silver_claimed, gold_claimed, created_at
                "#
            }
            RewardTier::Silver => {
                r#"
                UPDATE customers SET silver_claimed = $2
                WHERE id = $1
                RETURNING id, first_name, last_name, email, phone, referred_by,
                          total_dropoffs, rewards_redeemed,
                          bronze_claimed, silver_claimed, gold_claimed, created_at
                "#
            }
            RewardTier::Gold => {
                r#"
                UPDATE customers SET gold_claimed = $2
                WHERE id = $1
                RETURNING id, first_name, last_name, email, phone, referred_by,
                          total_dropoffs, rewards_redeemed,
                          bronze_claimed, silver_claimed, gold_claimed, created_at
                "#
            }
        };

        let customer = sqlx::query_as::<_, Customer>(sql)
            .bind(id)
            .bind(claimed)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// 条件兑换一次奖励
    ///
    /// 单条语句完成余额判断与递增，并发下不会重复兑换：
    /// 无可兑换奖励或客户不存在时不更新任何行，返回 None
    pub async fn try_redeem_reward(&self, id: i64) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET rewards_redeemed = rewards_redeemed + 1
            WHERE id = $1
              AND total_dropoffs / 10 - rewards_redeemed > 0
            RETURNING id, first_name, last_name, email, phone, referred_by,
                      total_dropoffs, rewards_redeemed,
                      bronze_claimed, silver_claimed, gold_claimed, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 删除客户并返回删除前快照
    ///
    /// 投递历史由外键 ON DELETE CASCADE 一并删除
    pub async fn delete(&self, id: i64) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            DELETE FROM customers
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, referred_by,
                      total_dropoffs, rewards_redeemed,
                      bronze_claimed, silver_claimed, gold_claimed, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    // ==================== 事务操作 ====================

    /// 在事务中增量更新累计投递件数
    ///
    /// 使用增量更新而非覆盖，并发提交按行锁串行化，不会丢失更新
    pub async fn increment_dropoffs_in_tx(
        tx: &mut PgConnection,
        id: i64,
        quantity: i32,
    ) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET total_dropoffs = total_dropoffs + $2
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, referred_by,
                      total_dropoffs, rewards_redeemed,
                      bronze_claimed, silver_claimed, gold_claimed, created_at
            "#,
        )
        .bind(id)
        .bind(quantity as i64)
        .fetch_optional(tx)
        .await?;

        Ok(customer)
    }
}

#[async_trait]
impl CustomerRepositoryTrait for CustomerRepository {
    async fn get(&self, id: i64) -> Result<Option<Customer>> {
        self.get(id).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>> {
        self.find_by_phone(phone).await
    }

    async fn find_by_identity(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Option<Customer>> {
        self.find_by_identity(first_name, last_name, email).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>> {
        self.search(query).await
    }

    async fn list(&self, order: CustomerOrder) -> Result<Vec<Customer>> {
        self.list(order).await
    }

    async fn create(&self, new: &NewCustomer) -> Result<Customer> {
        self.create(new).await
    }

    async fn update_phone(&self, id: i64, phone: &str) -> Result<Option<Customer>> {
        self.update_phone(id, phone).await
    }

    async fn set_tier_claimed(
        &self,
        id: i64,
        tier: RewardTier,
        claimed: bool,
    ) -> Result<Option<Customer>> {
        self.set_tier_claimed(id, tier, claimed).await
    }

    async fn try_redeem_reward(&self, id: i64) -> Result<Option<Customer>> {
        self.try_redeem_reward(id).await
    }

    async fn delete(&self, id: i64) -> Result<Option<Customer>> {
        self.delete(id).await
    }
}
