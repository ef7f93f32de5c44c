//! 领域模型定义

mod customer;
mod dropoff;
mod enums;
mod staff;

pub use customer::{Customer, NewCustomer};
pub use dropoff::{Dropoff, NewDropoff};
pub use enums::{CustomerOrder, RewardTier};
pub use staff::Staff;
