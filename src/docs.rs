// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Ações (envelope) ---
        handlers::actions::dispatch,

        // --- INVENTORY ---
        handlers::inventory::get_all_items,
        handlers::inventory::get_item,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,

        // --- CLIENTES ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- FALLECIDOS ---
        handlers::deceased::list_deceased,
        handlers::deceased::get_deceased,
        handlers::deceased::create_deceased,
        handlers::deceased::update_deceased,
        handlers::deceased::delete_deceased,

        // --- CAIXA E GASTOS ---
        handlers::finance::list_movements,
        handlers::finance::add_movement,
        handlers::finance::get_summary,
        handlers::finance::list_expenses,
        handlers::finance::add_expense,
        handlers::finance::delete_expense,

        // --- VENDAS ---
        handlers::sales::add_cart_item,
        handlers::sales::register_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::apply_payment,
        handlers::sales::update_sale_status,
        handlers::sales::delete_sale,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Relatórios ---
        handlers::reports::sales_report,
        handlers::reports::client_report,
        handlers::reports::cash_report,
        handlers::reports::daily_activity_report,

        // --- Dados ---
        handlers::data::export_data,
        handlers::data::import_data,
        handlers::data::clear_data,
        handlers::data::list_backups,
        handlers::data::restore_backup,

        // --- Sistema ---
        handlers::system::health,
        handlers::system::list_logs,
        handlers::system::run_maintenance,

        // --- Preferências ---
        handlers::preferences::get_preferences,
        handlers::preferences::update_preferences,
    ),
    components(
        schemas(
            common::response::ActionResponse,

            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Avisos ---
            models::notice::NoticeLevel,
            models::notice::Notice,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::InventoryItemPayload,

            // --- Clientes e falecidos ---
            models::client::Client,
            models::client::ClientPayload,
            models::deceased::DeceasedRecord,
            models::deceased::DeceasedPayload,

            // --- Caixa ---
            models::cash::MovementType,
            models::cash::CashMovement,
            models::cash::CashMovementPayload,
            models::cash::CashSummary,
            models::cash::Expense,
            models::cash::ExpensePayload,

            // --- Vendas ---
            models::sale::SaleStatus,
            models::sale::PaymentStatus,
            models::sale::SaleLine,
            models::sale::Sale,
            models::sale::SaleDraft,
            models::sale::RegisterSalePayload,
            models::sale::PaymentPayload,
            models::sale::PaymentReceipt,
            models::sale::UpdateSaleStatusPayload,
            models::sale::AddCartItemPayload,

            // --- DASHBOARD E RELATÓRIOS ---
            models::dashboard::DashboardSummary,
            models::dashboard::TypeCount,
            models::report::SalesReport,
            models::report::ClientReportRow,
            models::report::DailyCashRow,
            models::report::CashReport,
            models::report::ActivityKind,
            models::report::ActivityEntry,
            models::report::ActivityDay,
            models::report::ActivitySummary,
            models::report::DailyActivityReport,

            // --- Dados e sistema ---
            models::backup::Snapshot,
            models::backup::SnapshotMetadata,
            models::backup::BackupKind,
            models::backup::BackupSummary,
            models::backup::ClearPayload,
            models::backup::ImportSummary,
            models::system_log::SystemLog,
            models::system_log::MaintenanceReport,

            // --- Settings ---
            models::settings::UserPreferences,
            models::settings::UpdatePreferencesRequest,
        )
    ),
    tags(
        (name = "Auth", description = "Login e sessão"),
        (name = "Acciones", description = "Endpoint único com envelope {success, data, message}"),
        (name = "Inventario", description = "Itens do inventário"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Fallecidos", description = "Registros de falecidos"),
        (name = "Cuadre", description = "Movimentos e saldo de caixa"),
        (name = "Gastos", description = "Despesas"),
        (name = "Ventas", description = "Carrinho, vendas e pagamentos"),
        (name = "Dashboard", description = "Resumo do dia"),
        (name = "Reportes", description = "Relatórios por período"),
        (name = "Datos", description = "Exportação, importação e backups"),
        (name = "Sistema", description = "Log do sistema e manutenção"),
        (name = "Preferencias", description = "Preferências do usuário")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
