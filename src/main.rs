use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod config;
mod fallback;
mod handler;
mod http;
mod locale;
mod logger;
mod page;
mod server;
mod service;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Size the runtime from `server.workers`, defaulting to one thread per core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // The store pool is created lazily and needs a runtime context
    let state = Arc::new(config::AppState::new(&cfg)?);
    let listener = server::create_reusable_listener(addr)?;
    let connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::new(server::ShutdownSignal::new());

    server::start_signal_handler(Arc::clone(&shutdown));
    logger::log_server_start(&addr, &cfg);
    if !state.store.is_configured() {
        logger::log_info("Slides and events are served from bundled data");
    }

    let grace = Duration::from_secs(std::cmp::max(
        cfg.performance.read_timeout,
        cfg.performance.write_timeout,
    ));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            server::run_server_loop(
                listener,
                Arc::clone(&state),
                Arc::clone(&connections),
                shutdown,
            )
            .await;
            server::drain_connections(&connections, grace).await;
        })
        .await;

    state.store.close().await;
    logger::log_shutdown_complete();
    Ok(())
}
