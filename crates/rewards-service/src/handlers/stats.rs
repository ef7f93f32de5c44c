//! 运营统计 API 处理器
//!
//! 基于 customers 和 dropoffs 表直接聚合计算，
//! 月度口径：注册数按 created_at，投递件数按投递日期 date。

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Months, NaiveDate, Utc};
use tracing::instrument;

use crate::{
    dto::{ApiResponse, StatsOverview, StatsParams},
    error::RewardsError,
    state::AppState,
};

/// 统计总览
///
/// GET /api/stats?asOfMonth=YYYY-MM
#[instrument(skip(state))]
pub async fn overview(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<ApiResponse<StatsOverview>>, RewardsError> {
    let (month_start, month_end) = resolve_month(params.as_of_month.as_deref())?;

    let customer_totals: (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COALESCE(SUM(total_dropoffs), 0)::BIGINT,
            COALESCE(SUM(rewards_redeemed), 0)::BIGINT
        FROM customers
        "#,
    )
    .fetch_one(&state.pool)
    .await?;

    let (new_this_month,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM customers
        WHERE DATE(created_at) >= $1 AND DATE(created_at) < $2
        "#,
    )
    .bind(month_start)
    .bind(month_end)
    .fetch_one(&state.pool)
    .await?;

    let (dropoffs_this_month,): (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(quantity), 0)::BIGINT
        FROM dropoffs
        WHERE date >= $1 AND date < $2
        "#,
    )
    .bind(month_start)
    .bind(month_end)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(StatsOverview {
        total_customers: customer_totals.0,
        new_customers_this_month: new_this_month,
        dropoffs_this_month,
        total_dropoffs_all_time: customer_totals.1,
        total_rewards_redeemed_all_time: customer_totals.2,
    })))
}

/// 解析 "YYYY-MM" 为当月起止日期（左闭右开），缺省取当前月（UTC）
fn resolve_month(as_of_month: Option<&str>) -> Result<(NaiveDate, NaiveDate), RewardsError> {
    let start = match as_of_month {
        Some(raw) => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").map_err(|_| {
            RewardsError::Validation(format!("统计月份格式无效: {raw} (应为 YYYY-MM)"))
        })?,
        None => {
            let today = Utc::now().date_naive();
            today.with_day(1).unwrap_or(today)
        }
    };
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| RewardsError::Validation("统计月份超出范围".to_string()))?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_month_explicit() {
        let (start, end) = resolve_month(Some("2026-02")).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_resolve_month_year_boundary() {
        let (start, end) = resolve_month(Some("2025-12")).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_resolve_month_rejects_garbage() {
        assert!(resolve_month(Some("2026/02")).is_err());
        assert!(resolve_month(Some("2026-13")).is_err());
        assert!(resolve_month(Some("last-month")).is_err());
    }

    #[test]
    fn test_resolve_month_defaults_to_current() {
        let (start, end) = resolve_month(None).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(start.day0(), 0);
        assert!(start <= today && today < end);
    }
}
