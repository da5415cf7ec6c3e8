// Framework bootstrap for the simulation runtime.

use crate::domain::tuning::session::SessionConfig;
use crate::frameworks::config;
use crate::interface_adapters::physics::ArcadePhysics;
use crate::interface_adapters::stdio::{AdapterError, input_reader, output_writer};
use crate::use_cases::{Session, WorldSettings, world_task};

use std::{io::Result, sync::Arc};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::sync::{Notify, broadcast, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout carries the protocol, so logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn adapter_error(e: AdapterError) -> std::io::Error {
    match e {
        AdapterError::Io(e) => e,
        other => std::io::Error::other(other.to_string()),
    }
}

/// Runs one session, reading host input from `reader` and writing JSON lines
/// to `writer` until the session ends.
pub async fn run<R, W>(
    reader: R,
    writer: W,
    session_config: SessionConfig,
    settings: WorldSettings,
    shutdown: Arc<Notify>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let session = Session::new(&session_config, settings.tick_interval)
        .map_err(|e| std::io::Error::other(format!("failed to build session: {e}")))?;

    let (input_tx, input_rx) = mpsc::channel(config::INPUT_CHANNEL_CAPACITY);
    let (world_tx, world_rx) = broadcast::channel(config::WORLD_BROADCAST_CAPACITY);
    let (state_tx, state_rx) = watch::channel(settings.initial_state());

    // The world task owns the session; the adapters only see channels.
    let world = tokio::spawn(world_task(
        input_rx,
        world_tx,
        state_tx,
        session,
        ArcadePhysics::new(),
        settings,
        shutdown,
    ));

    let reading = input_reader(BufReader::new(reader), input_tx);
    let writing = output_writer(world_rx, state_rx, writer);
    tokio::pin!(reading);
    tokio::pin!(writing);

    tokio::select! {
        read = &mut reading => {
            match read {
                Ok(()) => {}
                // The world task ended on its own; the writer still drains.
                Err(AdapterError::InputClosed) => {
                    tracing::debug!("session stopped accepting input");
                }
                Err(e) => {
                    tracing::error!(error = %e, "input stream failed");
                    return Err(adapter_error(e));
                }
            }
            writing.await.map_err(adapter_error)?;
        }
        written = &mut writing => {
            // Session over; stop waiting for more host input.
            written.map_err(adapter_error)?;
        }
    }

    world
        .await
        .map_err(|e| std::io::Error::other(format!("world task failed: {e}")))
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let path = config::session_config_path();
    let session_config = config::load_session_config(path.as_deref()).inspect_err(|e| {
        tracing::error!(error = %e, "failed to load session config");
    });
    let session_config = session_config.map_err(|e| std::io::Error::other(e.to_string()))?;

    let settings = WorldSettings {
        tick_interval: config::tick_interval(),
        start_countdown: config::start_countdown(),
        time_limit: config::session_time_limit(),
    };
    tracing::info!(
        config = ?path,
        tick_ms = settings.tick_interval.as_millis() as u64,
        time_limit_secs = settings.time_limit.as_secs(),
        "starting session"
    );

    // Ctrl-C ends the session cleanly so the final state line is still written.
    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.notify_one();
        }
    });

    run(
        tokio::io::stdin(),
        tokio::io::stdout(),
        session_config,
        settings,
        shutdown,
    )
    .await
}
