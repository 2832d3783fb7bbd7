//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`], so the production `AppState`
//! and in-memory test states drive the same router.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    AuthorRepository, CategoryRepository, DiscountRepository, LanguageRepository,
    OrderRepository, ProductRepository, UserRepository,
};
use crate::service::{
    CatalogService, OrderService, ProductService, StatisticsService, UserService,
};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    type AuthorRepo: AuthorRepository;
    type CategoryRepo: CategoryRepository;
    type LanguageRepo: LanguageRepository;
    type DiscountRepo: DiscountRepository;
    type ProductRepo: ProductRepository;
    type OrderRepo: OrderRepository;
    type UserRepo: UserRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Authors, categories, languages and discounts
    fn catalog_service(
        &self,
    ) -> &CatalogService<Self::AuthorRepo, Self::CategoryRepo, Self::LanguageRepo, Self::DiscountRepo>;

    fn product_service(
        &self,
    ) -> &ProductService<
        Self::ProductRepo,
        Self::AuthorRepo,
        Self::CategoryRepo,
        Self::LanguageRepo,
        Self::DiscountRepo,
    >;

    fn order_service(&self) -> &OrderService<Self::OrderRepo, Self::ProductRepo>;

    fn user_service(&self) -> &UserService<Self::UserRepo>;

    fn statistics_service(&self) -> &StatisticsService<Self::OrderRepo>;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    /// Check if the database is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
