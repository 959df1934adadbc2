//src/main.rs

use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use funeraria::{
    config::{AppState, Config},
    routes::build_router,
    services::maintenance_service::SYSTEM_ACTOR,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG, padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(config.clone()).await?;

    // Manutenção diária em segundo plano (0 desativa)
    if config.maintenance_interval_hours > 0 {
        let maintenance = app_state.maintenance_service.clone();
        let period = Duration::from_secs(config.maintenance_interval_hours * 3600);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                // O erro já foi registrado no log do sistema
                let _ = maintenance.run_daily(SYSTEM_ACTOR).await;
            }
        });
        tracing::info!("🔧 Manutenção agendada a cada {} h", config.maintenance_interval_hours);
    }

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Documentação em http://{}/swagger-ui", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
