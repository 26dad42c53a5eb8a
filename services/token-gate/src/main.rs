mod app;
mod app_config;
mod environment_config;

use self::{app::create_router, app_config::AppConfig};
use anyhow::Error as AnyError;
use std::{net::SocketAddr, sync::Arc};
use stm_core::pool::TokenPool;
use tokio::{net::TcpListener, runtime::Runtime, signal};
use tracing::level_filters::LevelFilter;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
        log::warn!("Received ctrl-c, shutting down the server...")
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        log::warn!("Received SIGTERM, shutting down the server...")
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_logging() -> Result<(), AnyError> {
    LogTracer::init()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).compact().finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn start_service() -> Result<(), AnyError> {
    init_logging()?;

    let config = AppConfig::load(AppConfig::config_file())?;
    log::info!("Configuration: {config:#?}");

    let pool = TokenPool::from_config(&config.pool)?;
    log::info!("{pool:?}");
    let router = create_router(&config, Arc::new(pool))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("Starting service on http://{addr:?} ...");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn main() {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("[ERROR] Failed to create runtime: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = rt.block_on(start_service()) {
        eprintln!("[ERROR] {err}");
        let mut causes = err.chain().skip(1).enumerate().peekable();
        if causes.peek().is_some() {
            eprintln!();
            eprintln!("Caused by:");
        }
        for (i, cause) in causes {
            eprintln!("   {i}: {cause}");
        }
        std::process::exit(1);
    }
}
