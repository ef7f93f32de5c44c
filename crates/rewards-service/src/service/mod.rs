//! 业务服务层

pub mod dto;
mod identity;
mod ledger;
mod query;

pub use identity::{IdentityService, normalize_phone};
pub use ledger::RewardLedgerService;
pub use query::CustomerQueryService;
