// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

/// Monta todas as rotas da API sobre o estado já construído.
pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Tudo daqui para baixo exige o token
    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route(
            "/inventory",
            get(handlers::inventory::get_all_items).post(handlers::inventory::create_item),
        )
        .route(
            "/inventory/{id}",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        )
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/deceased",
            get(handlers::deceased::list_deceased).post(handlers::deceased::create_deceased),
        )
        .route(
            "/deceased/{id}",
            get(handlers::deceased::get_deceased)
                .put(handlers::deceased::update_deceased)
                .delete(handlers::deceased::delete_deceased),
        )
        .route(
            "/expenses",
            get(handlers::finance::list_expenses).post(handlers::finance::add_expense),
        )
        .route("/expenses/{id}", delete(handlers::finance::delete_expense))
        .route(
            "/cash-movements",
            get(handlers::finance::list_movements).post(handlers::finance::add_movement),
        )
        .route("/cash-movements/summary", get(handlers::finance::get_summary))
        .route("/cart/items", post(handlers::sales::add_cart_item))
        .route(
            "/sales",
            get(handlers::sales::list_sales).post(handlers::sales::register_sale),
        )
        .route(
            "/sales/{id}",
            get(handlers::sales::get_sale).delete(handlers::sales::delete_sale),
        )
        .route("/sales/{id}/payments", post(handlers::sales::apply_payment))
        .route("/sales/{id}/status", put(handlers::sales::update_sale_status))
        .route("/dashboard", get(handlers::dashboard::get_summary))
        .route("/reports/sales", get(handlers::reports::sales_report))
        .route("/reports/clients", get(handlers::reports::client_report))
        .route("/reports/cash", get(handlers::reports::cash_report))
        .route("/reports/daily", get(handlers::reports::daily_activity_report))
        .route("/data/export", get(handlers::data::export_data))
        .route("/data/import", post(handlers::data::import_data))
        .route("/data/clear", post(handlers::data::clear_data))
        .route("/data/backups", get(handlers::data::list_backups))
        .route("/data/backups/{id}/restore", post(handlers::data::restore_backup))
        .route("/system/logs", get(handlers::system::list_logs))
        .route("/system/maintenance", post(handlers::system::run_maintenance))
        .route(
            "/preferences",
            get(handlers::preferences::get_preferences)
                .put(handlers::preferences::update_preferences),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal.
    // O endpoint de ações valida a sessão por conta própria (login é público).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(handlers::system::health))
        .route("/api/actions", post(handlers::actions::dispatch))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
