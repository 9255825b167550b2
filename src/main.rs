//! Task Tree service entry point

use std::sync::Arc;

use task_tree::{
    auth::TokenService, config::AppConfig, db, handlers::health, middleware::AppState, routes,
    services::{AuthService, TaskService}, telemetry,
};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("task-tree {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // .env files are a development convenience; production sets real
    // environment variables.
    dotenv::dotenv().ok();

    health::set_start_time();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Task Tree starting...");

    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    let token_service = Arc::new(TokenService::from_config(&config)?);

    let app_state = Arc::new(AppState {
        db: db_pool.clone(),
        auth_service: Arc::new(AuthService::new(
            db_pool.clone(),
            token_service.clone(),
            &config,
        )),
        task_service: Arc::new(TaskService::new(db_pool.clone())),
        token_service,
    });

    let app = routes::create_router(app_state);

    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handling.
///
/// Resolves as soon as a signal arrives so the server starts draining
/// immediately; a watchdog races the drain and forces exit if open
/// connections outlive the configured timeout.
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

fn print_help() {
    println!("task-tree {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: task-tree [options]");
    println!();
    println!("Options:");
    println!("  --version     Print version information and exit");
    println!("  --help        Print this help and exit");
    println!();
    println!("Environment variables:");
    println!("  DATABASE_URL    PostgreSQL connection URL");
    println!("  SECRET_KEY      Session token signing secret (min 32 chars)");
    println!("  TG_TOKEN        Telegram login shared secret (the bot token)");
    println!("  TOKEN_PERIOD    Session token validity in seconds");
    println!("  TASKTREE_*      Nested overrides, e.g. TASKTREE_SERVER__ADDR");
}
