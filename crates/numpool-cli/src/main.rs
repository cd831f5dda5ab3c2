#![doc = include_str!("../README.md")]

mod app;

use app::config::{AppConfig, CliArgs};
use app::report::{render_json, render_text};
use app::telemetry::init_telemetry;
use clap::Parser;
use numpool::{Engine, MemorySink};
use std::sync::Arc;
use tokio::signal;

// Using mimalloc for better performance under contention on the pool lock.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let engine = Arc::new(Engine::new(config.engine.clone())?);
    let interrupt = tokio::spawn(stop_on_signal(Arc::clone(&engine)));

    let summary = engine.start().await?;
    interrupt.abort();

    let saved = if config.save {
        let mut sink = MemorySink::new();
        Some(engine.save(&mut sink).await?)
    } else {
        None
    };

    if config.json {
        println!("{}", render_json(&summary, saved)?);
    } else {
        print!("{}", render_text(&summary, saved));
    }

    Ok(())
}

fn log_startup_info(config: &AppConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting numpool with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting numpool with a cap of {} entries",
            config.engine.max_entries
        );
    }
}

/// Stops the run on the first Ctrl+C or SIGTERM. The engine then drains and
/// sorts whatever was produced so far.
async fn stop_on_signal(engine: Arc<Engine>) {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }

    engine.stop();
}
