//! OpenAPI 3.0 documentation assembly
//!
//! Aggregates all handler path annotations and domain schemas into a single
//! OpenAPI document, served as JSON at `/api/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore Core API",
        version = "0.9.0",
        description = "Online bookstore backend: catalog, orders, users and statistics",
        contact(name = "Bookstore Team")
    ),
    tags(
        (name = "System", description = "Health checks"),
        (name = "Auth", description = "Login, registration and token renewal"),
        (name = "Catalog", description = "Authors, categories, languages and discounts"),
        (name = "Products", description = "Catalog items, search, filtering and audit trail"),
        (name = "Orders", description = "Order placement and fulfilment"),
        (name = "Users", description = "Profiles, passwords, roles and user listings"),
        (name = "Statistics", description = "Sales reports for administrators"),
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::health::HealthResponse,
            // ── Catalog ────────────────────────────────────────────────
            crate::domain::BookAuthor,
            crate::domain::AuthorInput,
            crate::domain::Category,
            crate::domain::CategoryInput,
            crate::domain::CategoryNameInput,
            crate::domain::Language,
            crate::domain::LanguageInput,
            crate::domain::Discount,
            crate::domain::DiscountInput,
            // ── Products ───────────────────────────────────────────────
            crate::domain::ProductDetail,
            crate::domain::ProductInput,
            crate::domain::ProductFilter,
            crate::domain::SearchQuery,
            crate::domain::ProductEvidence,
            // ── Orders ─────────────────────────────────────────────────
            crate::domain::OrderStatus,
            crate::domain::Address,
            crate::domain::OrderUserInfo,
            crate::domain::OrderUserInfoInput,
            crate::domain::Order,
            crate::domain::OrderItem,
            crate::domain::Modification,
            crate::domain::OrderDetail,
            crate::domain::OrderPreview,
            crate::domain::CreateOrderItemInput,
            crate::domain::CreateOrderInput,
            crate::domain::CreatedOrder,
            crate::domain::UpdateOrderStatusInput,
            // ── Users ──────────────────────────────────────────────────
            crate::domain::Role,
            crate::domain::UserOverview,
            crate::domain::UserProfile,
            crate::domain::RegisterInput,
            crate::domain::LoginInput,
            crate::domain::TokenResponse,
            crate::domain::UpdateProfileInput,
            crate::domain::ChangePasswordInput,
            crate::domain::SetPasswordInput,
            crate::domain::RoleRequest,
            // ── Statistics ─────────────────────────────────────────────
            crate::domain::StatisticsRequest,
            crate::domain::DailyCount,
            crate::domain::DailyIncome,
            crate::domain::NamedCount,
            crate::domain::SalesStatistics,
            crate::domain::IncomeStatistics,
            crate::domain::RankingStatistics,
        ),
    ),
    paths(
        // ── System ─────────────────────────────────────────────────
        crate::api::health::health,
        crate::api::health::ready,
        // ── Auth ───────────────────────────────────────────────────
        crate::api::auth::login,
        crate::api::auth::register,
        crate::api::auth::renew_token,
        // ── Catalog ────────────────────────────────────────────────
        crate::api::author::list,
        crate::api::author::get,
        crate::api::author::create,
        crate::api::author::update,
        crate::api::author::delete,
        crate::api::author::delete_by_name,
        crate::api::category::list,
        crate::api::category::get,
        crate::api::category::create,
        crate::api::category::update,
        crate::api::category::delete,
        crate::api::category::delete_by_name,
        crate::api::language::list,
        crate::api::language::get,
        crate::api::language::create,
        crate::api::language::update,
        crate::api::language::delete,
        crate::api::language::delete_by_name,
        crate::api::discount::list,
        crate::api::discount::create,
        crate::api::discount::delete_by_value,
        crate::api::discount::delete,
        // ── Products ───────────────────────────────────────────────
        crate::api::product::list,
        crate::api::product::get,
        crate::api::product::evidences,
        crate::api::product::search,
        crate::api::product::filter,
        crate::api::product::create,
        crate::api::product::update,
        crate::api::product::set_discount,
        crate::api::product::set_quantity,
        crate::api::product::delete,
        // ── Orders ─────────────────────────────────────────────────
        crate::api::order::list_all,
        crate::api::order::by_email,
        crate::api::order::list_own,
        crate::api::order::get,
        crate::api::order::create,
        crate::api::order::update,
        crate::api::order::delete,
        // ── Users ──────────────────────────────────────────────────
        crate::api::user::set_role,
        crate::api::user::employees,
        crate::api::user::employees_by_name,
        crate::api::user::users_by_name,
        crate::api::user::employees_by_email,
        crate::api::user::users_by_email,
        crate::api::user::get_own,
        crate::api::user::update_own,
        crate::api::user::get,
        crate::api::user::update,
        crate::api::user::change_own_password,
        crate::api::user::set_password,
        crate::api::user::own_address,
        crate::api::user::address_by_email,
        // ── Statistics ─────────────────────────────────────────────
        crate::api::statistics::sales_in_time,
        crate::api::statistics::income_in_time,
        crate::api::statistics::most_sold_categories,
        crate::api::statistics::most_sold_items,
    ),
)]
pub struct ApiDoc;

/// Security scheme definition added via modify
impl ApiDoc {
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        // Add Bearer JWT security scheme
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer_jwt".to_string(),
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
        doc
    }
}
