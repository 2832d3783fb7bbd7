//! Business logic layer

pub mod catalog;
pub mod order;
pub mod password;
pub mod product;
pub mod statistics;
pub mod user;

pub use catalog::CatalogService;
pub use order::OrderService;
pub use product::ProductService;
pub use statistics::StatisticsService;
pub use user::UserService;
