//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::domain::Role;
use crate::jwt::JwtManager;
use crate::middleware::{normalize_error_response, require_role, RoleGate, SanitizedMakeSpan};
use crate::openapi::ApiDoc;
use crate::repository::{
    author::AuthorRepositoryImpl, category::CategoryRepositoryImpl,
    discount::DiscountRepositoryImpl, language::LanguageRepositoryImpl,
    order::OrderRepositoryImpl, product::ProductRepositoryImpl, user::UserRepositoryImpl, DbPool,
};
use crate::service::{
    CatalogService, OrderService, ProductService, StatisticsService, UserService,
};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

type Catalog = CatalogService<
    AuthorRepositoryImpl,
    CategoryRepositoryImpl,
    LanguageRepositoryImpl,
    DiscountRepositoryImpl,
>;

type Products = ProductService<
    ProductRepositoryImpl,
    AuthorRepositoryImpl,
    CategoryRepositoryImpl,
    LanguageRepositoryImpl,
    DiscountRepositoryImpl,
>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: DbPool,
    pub catalog_service: Arc<Catalog>,
    pub product_service: Arc<Products>,
    pub order_service: Arc<OrderService<OrderRepositoryImpl, ProductRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub statistics_service: Arc<StatisticsService<OrderRepositoryImpl>>,
    pub jwt_manager: JwtManager,
}

/// Implement HasServices trait for production AppState
impl HasServices for AppState {
    type AuthorRepo = AuthorRepositoryImpl;
    type CategoryRepo = CategoryRepositoryImpl;
    type LanguageRepo = LanguageRepositoryImpl;
    type DiscountRepo = DiscountRepositoryImpl;
    type ProductRepo = ProductRepositoryImpl;
    type OrderRepo = OrderRepositoryImpl;
    type UserRepo = UserRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn catalog_service(&self) -> &Catalog {
        &self.catalog_service
    }

    fn product_service(&self) -> &Products {
        &self.product_service
    }

    fn order_service(&self) -> &OrderService<OrderRepositoryImpl, ProductRepositoryImpl> {
        &self.order_service
    }

    fn user_service(&self) -> &UserService<UserRepositoryImpl> {
        &self.user_service
    }

    fn statistics_service(&self) -> &StatisticsService<OrderRepositoryImpl> {
        &self.statistics_service
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    async fn check_ready(&self) -> bool {
        self.db_pool.ping().await
    }
}

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    // Create database connection pool
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    // Create repositories
    let author_repo = Arc::new(AuthorRepositoryImpl::new(pool.clone()));
    let category_repo = Arc::new(CategoryRepositoryImpl::new(pool.clone()));
    let language_repo = Arc::new(LanguageRepositoryImpl::new(pool.clone()));
    let discount_repo = Arc::new(DiscountRepositoryImpl::new(pool.clone()));
    let product_repo = Arc::new(ProductRepositoryImpl::new(pool.clone()));
    let order_repo = Arc::new(OrderRepositoryImpl::new(pool.clone()));
    let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));

    let jwt_manager = JwtManager::new(config.jwt.clone());

    // Create services
    let catalog_service = Arc::new(CatalogService::new(
        author_repo.clone(),
        category_repo.clone(),
        language_repo.clone(),
        discount_repo.clone(),
    ));
    let product_service = Arc::new(ProductService::new(
        product_repo.clone(),
        author_repo,
        category_repo,
        language_repo,
        discount_repo,
    ));
    let order_service = Arc::new(OrderService::new(order_repo.clone(), product_repo));
    let user_service = Arc::new(UserService::new(user_repo, jwt_manager.clone()));
    let statistics_service = Arc::new(StatisticsService::new(order_repo));

    let http_addr = config.http_addr();
    let state = AppState {
        config: Arc::new(config),
        db_pool: DbPool::new(pool),
        catalog_service,
        product_service,
        order_service,
        user_service,
        statistics_service,
        jwt_manager,
    };

    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Wrap a route group in a role gate admitting only `allowed`
fn gated<S: HasServices>(router: Router<S>, state: &S, allowed: &'static [Role]) -> Router<S> {
    router.route_layer(middleware::from_fn_with_state(
        RoleGate::new(state.clone(), allowed),
        require_role::<S>,
    ))
}

/// Build the HTTP router
///
/// Routes are split into four groups by the roles they admit. Groups that
/// share a path register different methods on it, so merging is unambiguous.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = cors_layer(state.config());

    let public = Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::build()) }))
        // Auth
        .route("/api/login", post(api::auth::login::<S>))
        .route("/api/register", post(api::auth::register::<S>))
        // Catalog reads
        .route("/api/bookauthor", get(api::author::list::<S>))
        .route("/api/bookauthor/{id}", get(api::author::get::<S>))
        .route("/api/category", get(api::category::list::<S>))
        .route("/api/category/{id}", get(api::category::get::<S>))
        .route("/api/language", get(api::language::list::<S>))
        .route("/api/language/{id}", get(api::language::get::<S>))
        .route("/api/discount", get(api::discount::list::<S>))
        .route("/api/productdescription", get(api::product::list::<S>))
        .route("/api/productdescription/{id}", get(api::product::get::<S>))
        .route(
            "/api/productdescription/search",
            post(api::product::search::<S>),
        )
        .route(
            "/api/productdescription/filter",
            post(api::product::filter::<S>),
        )
        // Ordering works without an account
        .route("/api/order/create", post(api::order::create::<S>));

    let authenticated = Router::new()
        .route("/api/renewToken", post(api::auth::renew_token::<S>))
        .route("/api/order", get(api::order::list_own::<S>))
        .route("/api/order/{id}", get(api::order::get::<S>))
        .route(
            "/api/user",
            get(api::user::get_own::<S>).put(api::user::update_own::<S>),
        )
        .route(
            "/api/user/password",
            put(api::user::change_own_password::<S>),
        )
        .route("/api/user/address", get(api::user::own_address::<S>));

    let staff = Router::new()
        .route(
            "/api/productdescription/{id}/evidences",
            get(api::product::evidences::<S>),
        )
        .route(
            "/api/productdescription/{id}/{amount}",
            put(api::product::set_quantity::<S>),
        )
        .route("/api/order/all", get(api::order::list_all::<S>))
        .route("/api/order/byEmail/{email}", get(api::order::by_email::<S>))
        .route("/api/order/update", put(api::order::update::<S>));

    let admin = Router::new()
        // Catalog writes
        .route(
            "/api/bookauthor",
            post(api::author::create::<S>).delete(api::author::delete_by_name::<S>),
        )
        .route(
            "/api/bookauthor/{id}",
            put(api::author::update::<S>).delete(api::author::delete::<S>),
        )
        .route(
            "/api/category",
            post(api::category::create::<S>).delete(api::category::delete_by_name::<S>),
        )
        .route(
            "/api/category/{id}",
            put(api::category::update::<S>).delete(api::category::delete::<S>),
        )
        .route(
            "/api/language",
            post(api::language::create::<S>).delete(api::language::delete_by_name::<S>),
        )
        .route(
            "/api/language/{id}",
            put(api::language::update::<S>).delete(api::language::delete::<S>),
        )
        .route(
            "/api/discount",
            post(api::discount::create::<S>).delete(api::discount::delete::<S>),
        )
        .route(
            "/api/discount/{value}",
            delete(api::discount::delete_by_value::<S>),
        )
        .route("/api/productdescription", post(api::product::create::<S>))
        .route(
            "/api/productdescription/{id}",
            put(api::product::update::<S>).delete(api::product::delete::<S>),
        )
        .route(
            "/api/productdescription/{id}/discount/{value}",
            put(api::product::set_discount::<S>),
        )
        // Orders
        .route(
            "/api/order/{id}",
            delete(api::order::delete::<S>),
        )
        // Users
        .route("/api/setRole/{role}", post(api::user::set_role::<S>))
        .route("/api/users/getEmployees", get(api::user::employees::<S>))
        .route(
            "/api/users/getEmployeesByName/{name}",
            get(api::user::employees_by_name::<S>),
        )
        .route(
            "/api/users/getUsersByName/{name}",
            get(api::user::users_by_name::<S>),
        )
        .route(
            "/api/users/getEmployeesByEmail/{email}",
            get(api::user::employees_by_email::<S>),
        )
        .route(
            "/api/users/getUsersByEmail/{email}",
            get(api::user::users_by_email::<S>),
        )
        .route(
            "/api/user/{id}",
            get(api::user::get::<S>).put(api::user::update::<S>),
        )
        .route(
            "/api/user/password/{id}",
            put(api::user::set_password::<S>),
        )
        .route(
            "/api/user/address/{email}",
            get(api::user::address_by_email::<S>),
        )
        // Statistics
        .route(
            "/api/statistics/allSalesInTime",
            post(api::statistics::sales_in_time::<S>),
        )
        .route(
            "/api/statistics/incomePerTime",
            post(api::statistics::income_in_time::<S>),
        )
        .route(
            "/api/statistics/mostSoldCategories",
            post(api::statistics::most_sold_categories::<S>),
        )
        .route(
            "/api/statistics/mostSoldItems",
            post(api::statistics::most_sold_items::<S>),
        );

    Router::new()
        .merge(public)
        .merge(gated(authenticated, &state, Role::ALL))
        .merge(gated(staff, &state, Role::STAFF))
        .merge(gated(admin, &state, Role::ADMIN))
        .layer(middleware::from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(cors)
        .with_state(state)
}
