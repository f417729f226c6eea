use rc_server::{build_router, logger};

use rc_auth::{AclGateway, HandshakeAuthorizer, HandshakePolicy, RedisSessionStore, SessionStore};
use rc_router::{ActivityRouter, WorkerHandle, WorkerId, WorkerPool};
use rc_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator, WorkerDispatcher,
};

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Frames queued per worker inbox before the router starts dropping
const WORKER_INBOX_CAPACITY: usize = 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = rc_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = rc_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(&config.logging, log_file_path)?;

    info!("Starting rc-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // The session store connection is fail-fast: without it no
    // connection could ever be admitted.
    let store: Arc<dyn SessionStore> =
        Arc::new(RedisSessionStore::connect(&config.session_store.url()).await?);

    let policy = HandshakePolicy::new(
        config.server.host.clone(),
        config.server.port,
        &config.session_store,
    );
    let authorizer = Arc::new(HandshakeAuthorizer::new(store, policy));
    let acl = Arc::new(AclGateway::from_base_url(config.acl.base_url()));

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    // Spawn the worker pool: each worker owns one registry shard and
    // drains its own inbox.
    let worker_count = config.server.worker_count();
    let per_shard_limit = config.server.max_connections.div_ceil(worker_count);
    info!("Spawning {worker_count} workers, {per_shard_limit} connections per shard");

    let pool = WorkerPool::new();
    let mut shards = Vec::with_capacity(worker_count);
    for worker_id in 0..worker_count {
        let registry = ConnectionRegistry::new(ConnectionLimits {
            max_total: per_shard_limit,
        });
        shards.push(registry.clone());

        let (inbox_tx, inbox_rx) = mpsc::channel(WORKER_INBOX_CAPACITY);
        pool.register(WorkerHandle::new(WorkerId::new(worker_id), inbox_tx))
            .await;

        let dispatcher = WorkerDispatcher::new(
            worker_id,
            registry,
            config.pubsub.channel.clone(),
            metrics.clone(),
        );
        let guard = shutdown.subscribe_guard();
        let pool_on_exit = pool.clone();
        tokio::spawn(async move {
            dispatcher.run(inbox_rx, guard).await;
            pool_on_exit.remove(WorkerId::new(worker_id)).await;
        });
    }

    // Coordinator: the single process-wide pub/sub subscription
    let router = ActivityRouter::new(pool.clone());
    let pubsub_config = config.pubsub.clone();
    let guard = shutdown.subscribe_guard();
    tokio::spawn(async move {
        if let Err(e) = rc_router::run_subscriber(&pubsub_config, router, guard).await {
            error!("Coordinator subscription failed: {e}");
        }
    });

    // Build application state and router
    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
    };
    let app_state = AppState::new(
        authorizer,
        acl,
        shards,
        metrics,
        shutdown.clone(),
        connection_config,
    );
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {actual_addr}");

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {e}");
            }
        }
    });

    let mut shutdown_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
