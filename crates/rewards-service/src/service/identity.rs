//! 身份解析服务
//!
//! 注册入口的去重与合并逻辑：
//! 1. 手机号精确匹配（主去重键，数字串比较）
//! 2. （名、姓、邮箱）三元组忽略大小写匹配，命中且无手机号时回填
//! 3. 都未命中则创建新客户
//!
//! 手机号比电子邮箱更稳定，作为第一去重键；三元组回退分支服务于
//! 手机号成为必填项之前注册的老客户。邮箱刻意不做唯一约束：
//! 同一邮箱允许对应不同姓名的多条客户记录。

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{Result, RewardsError};
use crate::models::{Customer, NewCustomer};
use crate::repository::CustomerRepositoryTrait;
use crate::service::dto::{RegisterOutcome, RegisterRequest};

/// 手机号归一化：剔除所有非数字字符
///
/// 归一化后必须恰好 10 位，否则视为参数错误。
/// "(555) 123-4567" 与 "5551234567" 归一化后相等。
pub fn normalize_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return Err(RewardsError::Validation(format!(
            "手机号无效: 归一化后需要 10 位数字，实际 {} 位",
            digits.len()
        )));
    }
    Ok(digits)
}

/// 身份解析服务
pub struct IdentityService<CR>
where
    CR: CustomerRepositoryTrait,
{
    customers: Arc<CR>,
}

impl<CR> IdentityService<CR>
where
    CR: CustomerRepositoryTrait,
{
    pub fn new(customers: Arc<CR>) -> Self {
        Self { customers }
    }

    /// 解析注册请求：返回已有客户或新建客户
    ///
    /// 同一手机号重复注册幂等：第二次返回同一客户且 is_new=false
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn resolve_or_create(&self, request: RegisterRequest) -> Result<RegisterOutcome> {
        validate_required(&request)?;
        let phone = normalize_phone(&request.phone)?;

        // 1. 手机号精确匹配，命中即返回，不做任何改动
        if let Some(existing) = self.customers.find_by_phone(&phone).await? {
            info!(customer_id = existing.id, "Returning customer matched by phone");
            return Ok(RegisterOutcome {
                customer: existing,
                is_new: false,
            });
        }

        // 2. 三元组匹配，命中且档案缺手机号时回填
        if let Some(existing) = self
            .customers
            .find_by_identity(&request.first_name, &request.last_name, &request.email)
            .await?
        {
            let customer = if existing.phone.is_none() {
                info!(customer_id = existing.id, "Backfilling phone on existing customer");
                self.customers
                    .update_phone(existing.id, &phone)
                    .await?
                    .ok_or(RewardsError::CustomerNotFound(existing.id))?
            } else {
                // 档案上已有其他手机号，保持原样
                existing
            };
            return Ok(RegisterOutcome {
                customer,
                is_new: false,
            });
        }

        // 3. 新客户
        let created = match self
            .customers
            .create(&NewCustomer {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                phone: Some(phone.clone()),
                referred_by: request.referred_by,
            })
            .await
        {
            Ok(created) => created,
            // 并发的同号首次注册：对方先插入，撞上手机号唯一索引。
            // 重查一次按老客户返回，保持注册幂等
            Err(RewardsError::Database(sqlx::Error::Database(db_err)))
                if db_err.is_unique_violation() =>
            {
                info!("Concurrent registration hit phone index, re-resolving");
                let existing = self
                    .customers
                    .find_by_phone(&phone)
                    .await?
                    .ok_or_else(|| {
                        RewardsError::Internal(format!(
                            "手机号唯一索引冲突后未能重查到客户: phone={phone}"
                        ))
                    })?;
                return Ok(RegisterOutcome {
                    customer: existing,
                    is_new: false,
                });
            }
            Err(e) => return Err(e),
        };

        info!(customer_id = created.id, "New customer registered");

        Ok(RegisterOutcome {
            customer: created,
            is_new: true,
        })
    }

    /// 修改客户手机号
    ///
    /// 归一化后的号码已属于其他客户时拒绝，避免破坏手机号去重键
    #[instrument(skip(self))]
    pub async fn update_phone(&self, customer_id: i64, raw_phone: &str) -> Result<Customer> {
        let phone = normalize_phone(raw_phone)?;

        if let Some(owner) = self.customers.find_by_phone(&phone).await?
            && owner.id != customer_id
        {
            return Err(RewardsError::PhoneConflict {
                phone,
                owner_id: owner.id,
            });
        }

        self.customers
            .update_phone(customer_id, &phone)
            .await?
            .ok_or(RewardsError::CustomerNotFound(customer_id))
    }
}

/// 注册必填字段校验：名、姓、邮箱、手机号均不可为空
fn validate_required(request: &RegisterRequest) -> Result<()> {
    let missing = [
        ("firstName", &request.first_name),
        ("lastName", &request.last_name),
        ("email", &request.email),
        ("phone", &request.phone),
    ]
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| *name)
    .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RewardsError::Validation(format!(
            "缺少必填字段: {}",
            missing.join(", ")
        )))
    }
}
