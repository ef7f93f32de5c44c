//! REST API 处理器

pub mod customer;
pub mod dropoff;
pub mod reward;
pub mod staff;
pub mod stats;
