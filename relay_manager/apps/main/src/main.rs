use std::net::SocketAddr;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use global_utils::config_path::ConfigPath;
use global_utils::config_variant::ConfigVariant;
use global_utils::env_parser::lookup_ip_addr;
use global_utils::logger::init_logger;
use relay_manager_config_parser::config::ServerConfig;
use relay_manager_core::access::OperatorSet;
use relay_manager_core::caller_auth::CallerAuthenticator;
use relay_manager_core::manager::RelayManager;
use relay_manager_core::recovery::{EthereumRecovery, SignerRecovery};
use relay_manager_core::token::InMemoryToken;
use relay_manager_processor::init::create_relay_processor;
use relay_manager_server::create_app;
use tokio::net::TcpListener;
use tokio_util::task::TaskTracker;
use tracing::instrument;

#[instrument(level = "trace", ret)]
#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let _logger_guard = init_logger();

    // Create Config
    let config_variant = match ConfigPath::from_env_optional() {
        Some(config_path) => ConfigVariant::OnlyOneFilepath(config_path.path),
        None => ConfigVariant::init(),
    };
    let server_config = ServerConfig::init_config(config_variant).wrap_err("Failed to load configuration")?;
    tracing::debug!("App config: {:?}", server_config);

    // Create Relay Manager
    let init_params = server_config
        .relay_manager
        .init_params()
        .wrap_err("Invalid relay manager configuration")?;
    let operators = server_config
        .relay_manager
        .operator_addresses()
        .wrap_err("Invalid operator list")?;
    if operators.is_empty() {
        tracing::warn!("No operators configured, every privileged setter will be rejected");
    }
    let token = Arc::new(InMemoryToken::with_balances(
        server_config
            .token
            .balances()
            .wrap_err("Invalid initial token balances")?,
    ));
    let recovery: Arc<dyn SignerRecovery> = Arc::new(EthereumRecovery);
    let manager = RelayManager::new(
        init_params,
        token,
        Arc::new(OperatorSet::new(operators)),
        recovery.clone(),
    )
    .wrap_err("Failed to initialize relay manager")?;

    // Create Relay Processor
    let (mut relay_processor, relay_sender) =
        create_relay_processor(manager, server_config.processor.channel_capacity);
    let task_tracker = TaskTracker::new();
    task_tracker.spawn(async move {
        relay_processor.run().await;
    });
    task_tracker.close();

    // Run App
    let app = create_app(relay_sender.clone(), Arc::new(CallerAuthenticator::new(recovery))).await;
    let ip = lookup_ip_addr(&server_config.server.ip).wrap_err("Failed to resolve http server ip")?;
    let addr_to_listen = SocketAddr::new(ip, server_config.server.port);
    let listener = TcpListener::bind(addr_to_listen)
        .await
        .wrap_err_with(|| format!("Failed to bind listener on {addr_to_listen}"))?;
    tracing::info!("Listening on {:?}", addr_to_listen);

    let shutdown_sender = relay_sender.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received shutdown signal");
            shutdown_sender.shutdown().await;
        })
        .await
        .wrap_err("Failed to serve app")?;

    relay_sender.shutdown().await;
    task_tracker.wait().await;
    Ok(())
}
