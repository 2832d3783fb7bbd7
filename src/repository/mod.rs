//! Data access layer (Repository pattern)

pub mod author;
pub mod category;
pub mod discount;
pub mod language;
pub mod order;
pub mod product;
pub mod user;

pub use author::AuthorRepository;
pub use category::CategoryRepository;
pub use discount::DiscountRepository;
pub use language::LanguageRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use sqlx::MySqlPool;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    pool: MySqlPool,
}

impl DbPool {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial query; used by the readiness probe
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::ops::Deref for DbPool {
    type Target = MySqlPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}
