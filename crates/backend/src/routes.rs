use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES
        // ========================================
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route(
            "/api/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // ACTORS
        // ========================================
        .route("/api/admins/register", post(handlers::a002_admin::register))
        .route(
            "/api/admins",
            get(handlers::a002_admin::list_all)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/subadmins",
            get(handlers::a003_subadmin::list_all)
                .post(handlers::a003_subadmin::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/subadmins/:id",
            get(handlers::a003_subadmin::get_by_id)
                .put(handlers::a003_subadmin::update)
                .delete(handlers::a003_subadmin::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route("/api/users/sync", post(handlers::a001_user::sync))
        .route(
            "/api/users",
            get(handlers::a001_user::list_all)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route("/api/users/:id", get(handlers::a001_user::get_by_id))
        .route("/api/users/by-uid/:uid", get(handlers::a001_user::get_by_uid))
        .route(
            "/api/users/:uid/basic-details",
            put(handlers::a001_user::update_basic_details),
        )
        .route(
            "/api/users/:uid/additional-details",
            put(handlers::a001_user::update_additional_details),
        )
        .route("/api/users/:uid/verify", post(handlers::a001_user::verify))
        .route(
            "/api/users/:uid/profile-image",
            post(handlers::a001_user::update_profile_image),
        )
        .route(
            "/api/users/:id/block",
            post(handlers::a001_user::block)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/users/:id/unblock",
            post(handlers::a001_user::unblock)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // ========================================
        // CATALOG
        // ========================================
        .route(
            "/api/categories",
            get(handlers::a004_category::list_all).post(handlers::a004_category::create),
        )
        .route(
            "/api/categories/:id",
            get(handlers::a004_category::get_by_id)
                .put(handlers::a004_category::update)
                .delete(handlers::a004_category::delete),
        )
        .route(
            "/api/subcategories",
            get(handlers::a005_subcategory::list_all).post(handlers::a005_subcategory::create),
        )
        .route(
            "/api/subcategories/by-category/:category_id",
            get(handlers::a005_subcategory::list_by_category),
        )
        .route(
            "/api/subcategories/:id",
            get(handlers::a005_subcategory::get_by_id)
                .put(handlers::a005_subcategory::update)
                .delete(handlers::a005_subcategory::delete),
        )
        .route(
            "/api/products",
            get(handlers::a006_product::list_all).post(handlers::a006_product::create),
        )
        .route(
            "/api/products/by-subcategory/:subcategory_id",
            get(handlers::a006_product::list_by_subcategory),
        )
        .route(
            "/api/products/:id",
            get(handlers::a006_product::get_by_id)
                .put(handlers::a006_product::update)
                .delete(handlers::a006_product::delete),
        )
        // ========================================
        // LAND HOLDINGS
        // ========================================
        .route("/api/lands", post(handlers::a007_land::create))
        .route(
            "/api/lands/by-user/:user_id",
            get(handlers::a007_land::list_by_user),
        )
        .route(
            "/api/lands/:id",
            get(handlers::a007_land::get_by_id)
                .put(handlers::a007_land::update)
                .delete(handlers::a007_land::delete),
        )
        .route("/api/land-products", post(handlers::a008_land_product::create))
        .route(
            "/api/land-products/by-land/:user_id/:land_id",
            get(handlers::a008_land_product::list_by_land),
        )
        .route(
            "/api/land-products/by-user/:user_id",
            get(handlers::a008_land_product::list_by_user),
        )
        .route(
            "/api/land-products/:id",
            get(handlers::a008_land_product::get_by_id)
                .put(handlers::a008_land_product::update)
                .delete(handlers::a008_land_product::delete),
        )
        .route("/api/crop-plans", post(handlers::a009_crop_plan::create))
        .route(
            "/api/crop-plans/by-user/:user_id",
            get(handlers::a009_crop_plan::list_by_user),
        )
        .route(
            "/api/crop-plans/:id",
            get(handlers::a009_crop_plan::get_by_id)
                .put(handlers::a009_crop_plan::update)
                .delete(handlers::a009_crop_plan::delete),
        )
        .route(
            "/api/crop-calendars",
            get(handlers::a010_crop_calendar::list_all).post(handlers::a010_crop_calendar::create),
        )
        .route(
            "/api/crop-calendars/by-product/:product_id",
            get(handlers::a010_crop_calendar::list_by_product),
        )
        .route(
            "/api/crop-calendars/:id",
            get(handlers::a010_crop_calendar::get_by_id)
                .put(handlers::a010_crop_calendar::update)
                .delete(handlers::a010_crop_calendar::delete),
        )
        // ========================================
        // ADS
        // ========================================
        .route(
            "/api/ads",
            get(handlers::a011_ad::list_all).post(handlers::a011_ad::create),
        )
        .route("/api/ads/filter", get(handlers::a011_ad::filter))
        .route("/api/ads/recent", get(handlers::a011_ad::recent_by_district))
        .route("/api/ads/browse", get(handlers::a011_ad::browse))
        .route(
            "/api/ads/sweep/run",
            post(handlers::a011_ad::run_sweep)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/ads/:id",
            get(handlers::a011_ad::get_by_id)
                .put(handlers::a011_ad::update)
                .delete(handlers::a011_ad::delete),
        )
        .route("/api/ad-logs", get(handlers::a011_ad::list_logs))
        // ========================================
        // NEWS
        // ========================================
        .route(
            "/api/news",
            get(handlers::a012_news::list_all).post(handlers::a012_news::create),
        )
        .route(
            "/api/news/:id",
            get(handlers::a012_news::get_by_id)
                .put(handlers::a012_news::update)
                .delete(handlers::a012_news::delete),
        )
        .route("/api/news-logs", get(handlers::a012_news::list_logs))
        // ========================================
        // NOTIFICATIONS
        // ========================================
        .route(
            "/api/notifications/token",
            post(handlers::a013_notification::save_token),
        )
        .route(
            "/api/notifications/send-to-all",
            post(handlers::a013_notification::send_to_all)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/notifications/send-targeted",
            post(handlers::a013_notification::send_targeted)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/notifications/logs",
            get(handlers::a013_notification::list_logs),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d400/overview",
            get(handlers::d400_overview::get_overview)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        // ========================================
        // UTILITIES
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
