use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;

use pa_api::{create_app, ApiStrategy, AppState, PhonePrincipalResolver};
use pa_core::services::StrategyConfig;
use pa_infra::{create_phone_formatter, create_session_store, create_verification_provider};
use pa_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    let default_filter = Environment::from_env().default_log_filter();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    info!("Starting phone authentication API server");

    let config = pa_infra::load_config().context("invalid configuration")?;

    let provider = create_verification_provider(&config.verification)
        .context("failed to create verification provider")?;
    let sessions = create_session_store(&config.session, &config.cache)
        .await
        .context("failed to create session store")?;
    let formatter =
        create_phone_formatter(&config.auth).context("failed to create phone formatter")?;

    let strategy: Arc<ApiStrategy> = Arc::new(ApiStrategy::with_formatter(
        provider,
        sessions,
        formatter,
        StrategyConfig::from(&config.auth),
    ));
    let state = web::Data::new(AppState::new(strategy, Arc::new(PhonePrincipalResolver)));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
