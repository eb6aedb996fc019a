use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sp_api::{app::create_app, config::Config, middleware::cors::create_cors, state::build_state};
use sp_shared::{LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment is used as-is
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("invalid configuration")?;
    init_tracing(&config.logging);

    info!(
        environment = ?config.environment,
        bind = %config.server.bind_address(),
        "Starting Spendly API server"
    );

    let state = web::Data::new(build_state(&config).await?);

    let cors_config = config.cors.clone();
    let environment = config.environment;
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(
            state.clone(),
            create_cors(&cors_config, environment),
            max_payload_size,
        )
    });
    // 0 keeps actix's default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await
        .context("server terminated unexpectedly")?;

    info!("Spendly API server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
