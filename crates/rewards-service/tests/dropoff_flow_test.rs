//! 奖励台账集成测试
//!
//! 使用真实 PostgreSQL 验证注册、投递、兑换全流程，
//! 以及并发投递计数、层级标记与级联删除这些
//! 无法用 mock 覆盖的数据库语义。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test dropoff_flow_test -- --ignored
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use sqlx::PgPool;

use rewards_service::error::RewardsError;
use rewards_service::models::RewardTier;
use rewards_service::repository::{CustomerRepository, DropoffRepository, StaffRepository};
use rewards_service::service::dto::{RecordDropoffRequest, RegisterRequest};
use rewards_service::service::{CustomerQueryService, IdentityService, RewardLedgerService};

// ==================== 辅助函数 ====================

/// 从环境变量读取数据库 URL，未设置则 panic
fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

/// 连接数据库并对齐 schema
async fn connect_pool() -> PgPool {
    let pool = PgPool::connect(&database_url())
        .await
        .expect("数据库连接失败");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("迁移执行失败");
    pool
}

struct Services {
    identity: IdentityService<CustomerRepository>,
    ledger: RewardLedgerService<CustomerRepository, StaffRepository>,
    query: CustomerQueryService<CustomerRepository, DropoffRepository, StaffRepository>,
}

fn setup_services(pool: &PgPool) -> Services {
    let customers = Arc::new(CustomerRepository::new(pool.clone()));
    let dropoffs = Arc::new(DropoffRepository::new(pool.clone()));
    let staff = Arc::new(StaffRepository::new(pool.clone()));

    Services {
        identity: IdentityService::new(customers.clone()),
        ledger: RewardLedgerService::new(pool.clone(), customers.clone(), staff.clone()),
        query: CustomerQueryService::new(customers, dropoffs, staff),
    }
}

/// 清理指定手机号的测试客户（投递历史级联删除）
async fn cleanup_by_phone(pool: &PgPool, phone: &str) {
    sqlx::query("DELETE FROM customers WHERE phone = $1")
        .bind(phone)
        .execute(pool)
        .await
        .expect("清理测试数据失败");
}

fn register_request(first: &str, last: &str, email: &str, phone: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        referred_by: None,
    }
}

/// 随机姓名邮箱注册请求（手机号仍由用例固定，保证可清理）
fn random_register_request(phone: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: SafeEmail().fake(),
        phone: phone.to_string(),
        referred_by: None,
    }
}

fn dropoff_request(customer_id: i64, quantity: i32) -> RecordDropoffRequest {
    RecordDropoffRequest {
        customer_id,
        quantity,
        date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        staff_id: None,
    }
}

// ==================== 全流程 ====================

/// 注册 → 投 7 件（不可兑换）→ 累计 12 件（可兑换 1 次）→ 兑换
/// → 余额归零，再次兑换被拒绝
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_register_dropoff_redeem_flow() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101001").await;
    let svc = setup_services(&pool);

    let outcome = svc
        .identity
        .resolve_or_create(register_request(
            "Ann",
            "Lee",
            "ann.lee@example.com",
            "5550101001",
        ))
        .await
        .expect("注册失败");
    assert!(outcome.is_new);
    let id = outcome.customer.id;

    // 7 件：floor(7/10) = 0，无可兑换奖励
    let after_seven = svc
        .ledger
        .record_dropoff(dropoff_request(id, 7))
        .await
        .expect("投递登记失败");
    assert_eq!(after_seven.customer.total_dropoffs, 7);
    assert_eq!(after_seven.eligible_rewards, 0);

    let err = svc.ledger.redeem_reward(id).await.unwrap_err();
    assert!(matches!(err, RewardsError::NoRewardAvailable(_)));

    // 再投 5 件到 12：floor(12/10) = 1
    let after_twelve = svc
        .ledger
        .record_dropoff(dropoff_request(id, 5))
        .await
        .expect("投递登记失败");
    assert_eq!(after_twelve.customer.total_dropoffs, 12);
    assert_eq!(after_twelve.eligible_rewards, 1);

    let redeemed = svc.ledger.redeem_reward(id).await.expect("兑换失败");
    assert_eq!(redeemed.rewards_redeemed, 1);
    assert_eq!(redeemed.eligible_rewards(), 0);

    // 余额已用完
    let err = svc.ledger.redeem_reward(id).await.unwrap_err();
    assert!(matches!(err, RewardsError::NoRewardAvailable(_)));

    // 历史有两条事实，未指定员工时记为 Unknown
    let detail = svc.query.get_with_history(id).await.expect("查询失败");
    assert_eq!(detail.dropoffs.len(), 2);
    assert!(detail.dropoffs.iter().all(|d| d.added_by == "Unknown"));

    cleanup_by_phone(&pool, "5550101001").await;
}

/// 大额投递一次登记：1001 件合法入账，解锁 100 次奖励
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_large_quantity_single_dropoff() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101007").await;
    let svc = setup_services(&pool);

    let id = svc
        .identity
        .resolve_or_create(random_register_request("5550101007"))
        .await
        .expect("注册失败")
        .customer
        .id;

    let outcome = svc
        .ledger
        .record_dropoff(dropoff_request(id, 1001))
        .await
        .expect("大额投递应当被接受");
    assert_eq!(outcome.customer.total_dropoffs, 1001);
    assert_eq!(outcome.eligible_rewards, 100);

    cleanup_by_phone(&pool, "5550101007").await;
}

// ==================== 身份解析 ====================

/// 同一手机号不同书写格式的重复注册幂等
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_registration_idempotent_across_phone_formats() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101002").await;
    let svc = setup_services(&pool);

    let first = svc
        .identity
        .resolve_or_create(register_request(
            "Bob",
            "Wu",
            "bob.wu@example.com",
            "555-010-1002",
        ))
        .await
        .expect("注册失败");
    assert!(first.is_new);

    // 改了姓名大小写和手机号书写格式，仍应命中同一档案
    let second = svc
        .identity
        .resolve_or_create(register_request(
            "BOB",
            "wu",
            "other@example.com",
            "(555) 010-1002",
        ))
        .await
        .expect("注册失败");
    assert!(!second.is_new);
    assert_eq!(second.customer.id, first.customer.id);

    cleanup_by_phone(&pool, "5550101002").await;
}

/// 老档案（无手机号）按三元组命中并回填手机号
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_identity_match_backfills_phone() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101003").await;
    sqlx::query("DELETE FROM customers WHERE email = 'legacy@example.com' AND phone IS NULL")
        .execute(&pool)
        .await
        .expect("清理测试数据失败");
    let svc = setup_services(&pool);

    // 直接插入一条无手机号的老档案
    let legacy_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO customers (first_name, last_name, email)
        VALUES ('Carol', 'Ng', 'legacy@example.com')
        RETURNING id
        "#,
    )
    .fetch_one(&pool)
    .await
    .expect("插入老档案失败");

    let outcome = svc
        .identity
        .resolve_or_create(register_request(
            "carol",
            "NG",
            "Legacy@Example.com",
            "5550101003",
        ))
        .await
        .expect("注册失败");

    assert!(!outcome.is_new);
    assert_eq!(outcome.customer.id, legacy_id);
    assert_eq!(outcome.customer.phone.as_deref(), Some("5550101003"));

    cleanup_by_phone(&pool, "5550101003").await;
}

// ==================== 并发 ====================

/// 并发投递不丢计数：10 个任务各投 3 件，总数恰为 30
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_concurrent_dropoffs_sum_exactly() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101004").await;
    let svc = setup_services(&pool);

    let id = svc
        .identity
        .resolve_or_create(random_register_request("5550101004"))
        .await
        .expect("注册失败")
        .customer
        .id;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let task_pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let svc = setup_services(&task_pool);
            svc.ledger
                .record_dropoff(dropoff_request(id, 3))
                .await
                .expect("并发投递失败");
        }));
    }
    for handle in handles {
        handle.await.expect("任务 join 失败");
    }

    let detail = setup_services(&pool)
        .query
        .get_with_history(id)
        .await
        .expect("查询失败");
    assert_eq!(detail.customer.total_dropoffs, 30);
    assert_eq!(detail.dropoffs.len(), 10);
    assert_eq!(detail.customer.eligible_rewards(), 3);

    cleanup_by_phone(&pool, "5550101004").await;
}

// ==================== 层级与删除 ====================

/// 三个层级标记互不影响，且可以逆序领取
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_tier_flags_independent() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101005").await;
    let svc = setup_services(&pool);

    let id = svc
        .identity
        .resolve_or_create(random_register_request("5550101005"))
        .await
        .expect("注册失败")
        .customer
        .id;

    // 先领 gold，bronze/silver 不受影响
    let after_gold = svc
        .ledger
        .set_tier_claimed(id, RewardTier::Gold, true)
        .await
        .expect("层级标记失败");
    assert!(after_gold.gold_claimed);
    assert!(!after_gold.bronze_claimed);
    assert!(!after_gold.silver_claimed);

    // 取消 gold，再领 bronze
    let after_unset = svc
        .ledger
        .set_tier_claimed(id, RewardTier::Gold, false)
        .await
        .expect("层级标记失败");
    assert!(!after_unset.gold_claimed);

    let after_bronze = svc
        .ledger
        .set_tier_claimed(id, RewardTier::Bronze, true)
        .await
        .expect("层级标记失败");
    assert!(after_bronze.bronze_claimed);
    assert!(!after_bronze.gold_claimed);

    cleanup_by_phone(&pool, "5550101005").await;
}

/// 删除客户后投递历史级联清空
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_delete_cascades_dropoff_history() {
    let pool = connect_pool().await;
    cleanup_by_phone(&pool, "5550101006").await;
    let svc = setup_services(&pool);

    let id = svc
        .identity
        .resolve_or_create(random_register_request("5550101006"))
        .await
        .expect("注册失败")
        .customer
        .id;

    svc.ledger
        .record_dropoff(dropoff_request(id, 4))
        .await
        .expect("投递登记失败");

    let deleted = svc.query.delete_customer(id).await.expect("删除失败");
    assert_eq!(deleted.id, id);

    let orphan_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM dropoffs WHERE customer_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .expect("统计失败");
    assert_eq!(orphan_count, 0);

    let err = svc.query.get_with_history(id).await.unwrap_err();
    assert!(matches!(err, RewardsError::CustomerNotFound(_)));
}

// ==================== 操作员 ====================

/// 预置 PIN 可登录，错误 PIN 返回 InvalidPin
#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_staff_login_with_seeded_pins() {
    let pool = connect_pool().await;
    let svc = setup_services(&pool);

    let staff = svc.query.staff_login("1157").await.expect("登录失败");
    assert_eq!(staff.name, "Staff Member 1");

    let err = svc.query.staff_login("9999").await.unwrap_err();
    assert!(matches!(err, RewardsError::InvalidPin));
}
