//! 客户查询服务
//!
//! 前台目录页的只读查询与管理维护操作：搜索、列表、
//! 档案详情、手机号查找、删除以及操作员 PIN 登录。

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{Result, RewardsError};
use crate::models::{Customer, CustomerOrder, Staff};
use crate::repository::{CustomerRepositoryTrait, DropoffRepositoryTrait, StaffRepositoryTrait};
use crate::service::dto::CustomerWithHistory;
use crate::service::identity::normalize_phone;

/// 客户查询服务
pub struct CustomerQueryService<CR, DR, SR>
where
    CR: CustomerRepositoryTrait,
    DR: DropoffRepositoryTrait,
    SR: StaffRepositoryTrait,
{
    customers: Arc<CR>,
    dropoffs: Arc<DR>,
    staff: Arc<SR>,
}

impl<CR, DR, SR> CustomerQueryService<CR, DR, SR>
where
    CR: CustomerRepositoryTrait,
    DR: DropoffRepositoryTrait,
    SR: StaffRepositoryTrait,
{
    pub fn new(customers: Arc<CR>, dropoffs: Arc<DR>, staff: Arc<SR>) -> Self {
        Self {
            customers,
            dropoffs,
            staff,
        }
    }

    /// 按名、姓、邮箱及 "名 姓" 全名做忽略大小写的子串搜索
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RewardsError::Validation("搜索关键词不能为空".to_string()));
        }
        self.customers.search(query).await
    }

    /// 客户列表，支持按姓名或注册时间排序
    #[instrument(skip(self))]
    pub async fn list(&self, order: CustomerOrder) -> Result<Vec<Customer>> {
        self.customers.list(order).await
    }

    /// 客户档案 + 投递历史（按日期倒序）
    #[instrument(skip(self))]
    pub async fn get_with_history(&self, customer_id: i64) -> Result<CustomerWithHistory> {
        let customer = self
            .customers
            .get(customer_id)
            .await?
            .ok_or(RewardsError::CustomerNotFound(customer_id))?;
        let dropoffs = self.dropoffs.list_by_customer(customer_id).await?;

        Ok(CustomerWithHistory { customer, dropoffs })
    }

    /// 按手机号查找客户（先归一化再比较）
    #[instrument(skip(self))]
    pub async fn find_by_phone(&self, raw_phone: &str) -> Result<Customer> {
        let phone = normalize_phone(raw_phone)?;
        self.customers
            .find_by_phone(&phone)
            .await?
            .ok_or(RewardsError::CustomerNotFoundByPhone(phone))
    }

    /// 删除客户，返回删除前的档案快照
    ///
    /// 投递历史由外键级联一并删除
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: i64) -> Result<Customer> {
        let deleted = self
            .customers
            .delete(customer_id)
            .await?
            .ok_or(RewardsError::CustomerNotFound(customer_id))?;

        info!(customer_id, "Customer deleted");
        Ok(deleted)
    }

    /// 操作员 PIN 登录
    #[instrument(skip(self, pin))]
    pub async fn staff_login(&self, pin: &str) -> Result<Staff> {
        match self.staff.find_by_pin(pin).await? {
            Some(staff) => {
                info!(staff_id = staff.id, "Staff login succeeded");
                Ok(staff)
            }
            None => {
                warn!("Staff login failed: PIN 不匹配");
                Err(RewardsError::InvalidPin)
            }
        }
    }
}
