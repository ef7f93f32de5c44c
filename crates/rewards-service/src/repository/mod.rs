//! 数据库仓储层

mod customer_repo;
mod dropoff_repo;
mod staff_repo;
pub mod traits;

pub use customer_repo::CustomerRepository;
pub use dropoff_repo::DropoffRepository;
pub use staff_repo::StaffRepository;
pub use traits::{CustomerRepositoryTrait, DropoffRepositoryTrait, StaffRepositoryTrait};
