use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod api;
mod config;
mod downloads;
mod handler;
mod http;
mod logger;
mod providers;
mod server;
mod translator;

use downloads::{CounterPersistence, DownloadStore, FilePersistence, NoopPersistence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Tokio runtime, thread count from `server.workers`
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let provider = providers::from_config(&cfg)?;
    let translator = translator::Translator::new(provider);

    let persistence: Box<dyn CounterPersistence> = if cfg.downloads_persistent() {
        Box::new(FilePersistence::new(&cfg.downloads.file))
    } else {
        logger::log_info("[Downloads] Persistence disabled; counters live in memory only");
        Box::new(NoopPersistence)
    };
    let downloads = Arc::new(DownloadStore::open(persistence).await);

    let state = Arc::new(config::AppState::new(&cfg, translator, downloads));
    logger::log_server_start(&addr, &cfg, state.translator.provider_name());

    let shutdown = Arc::new(tokio::sync::Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            shutdown,
        ))
        .await
}
