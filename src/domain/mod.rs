//! Domain models for Bookstore Core

pub mod catalog;
pub mod order;
pub mod product;
pub mod statistics;
pub mod user;

pub use catalog::*;
pub use order::*;
pub use product::*;
pub use statistics::*;
pub use user::*;
