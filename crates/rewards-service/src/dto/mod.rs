//! REST API 请求 / 响应 DTO

mod request;
mod response;

pub use request::{
    ListParams, RecordDropoffBody, RedeemBody, RegisterBody, SearchParams, StaffLoginBody,
    StatsParams, TierClaimBody, UpdatePhoneBody,
};
pub use response::{ApiResponse, StatsOverview};
