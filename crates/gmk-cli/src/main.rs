//! gmk entry point.
//!
//! This file is intentionally thin: it parses arguments, sets up tracing,
//! and wires a session against either the configured Firebase Realtime
//! Database or the in-process simulator. All reconciliation behavior
//! lives in the library crates.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gmk_coord::{parse_wire, GeoPoint};
use gmk_session::{
    spawn_session, AppliedMutation, Notice, RecordingSurface, SessionConfig, SessionHandle,
};
use gmk_sources::{
    FirebaseRestSource, LocationSource, RemotePayload, RemoteTargetSource,
    SimulatedLocationSource, SimulatedRemoteSource,
};
use tracing::info;

/// Demo device fix used when `GMK_FIX` is not set.
const DEFAULT_FIX: &str = "-23.55052,-46.633308";

/// Demo target payload used when `GMK_TARGET` is not set (simulator mode).
const DEFAULT_TARGET: &str = "-23.561414,-46.655881";

#[derive(Parser)]
#[command(name = "gmk")]
#[command(about = "GeoMark tracker CLI", long_about = None)]
struct Cli {
    /// Path to a JSON session config; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger one refresh and print applied mutations plus status
    Refresh {
        /// Seconds to wait for source callbacks before printing
        #[arg(long, default_value_t = 2)]
        wait_secs: u64,
    },

    /// Refresh repeatedly until Ctrl-C
    Watch {
        #[arg(long, default_value_t = 10)]
        interval_secs: u64,
    },

    /// Print the canonical config digest
    ConfigDigest,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev convenience; silent when the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Commands::Refresh { wait_secs } => cmd_refresh(cfg, wait_secs).await,
        Commands::Watch { interval_secs } => cmd_watch(cfg, interval_secs).await,
        Commands::ConfigDigest => {
            println!("{}", cfg.digest());
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn load_config(path: Option<&str>) -> Result<SessionConfig> {
    match path {
        Some(p) => SessionConfig::from_json_file(p),
        None => Ok(SessionConfig::default()),
    }
}

/// Stand-in for a real device provider: the fix comes from `GMK_FIX`.
fn device_fix_from_env() -> Result<GeoPoint> {
    let raw = std::env::var("GMK_FIX").unwrap_or_else(|_| DEFAULT_FIX.to_string());
    parse_wire(&raw).with_context(|| format!("parsing GMK_FIX {raw:?}"))
}

fn build_session(
    cfg: &SessionConfig,
) -> Result<(SessionHandle, Arc<Mutex<Vec<AppliedMutation>>>)> {
    let surface = RecordingSurface::new();
    let log = surface.mutation_log();

    let location: Arc<dyn LocationSource> =
        Arc::new(SimulatedLocationSource::steady(device_fix_from_env()?));

    let remote: Arc<dyn RemoteTargetSource> = match &cfg.database_url {
        Some(url) => {
            info!(url = %url, path = %cfg.remote_path, "using firebase realtime database source");
            Arc::new(FirebaseRestSource::new(url.clone()))
        }
        None => {
            let target =
                std::env::var("GMK_TARGET").unwrap_or_else(|_| DEFAULT_TARGET.to_string());
            info!(target = %target, "no database_url configured; using simulated target");
            Arc::new(SimulatedRemoteSource::steady(RemotePayload::Present(target)))
        }
    };

    let session = spawn_session(cfg.clone(), Box::new(surface), location, remote);
    Ok((session, log))
}

async fn cmd_refresh(cfg: SessionConfig, wait_secs: u64) -> Result<()> {
    let (session, log) = build_session(&cfg)?;
    let mut notices = session.subscribe_notices();

    session.refresh().await?;
    tokio::time::sleep(Duration::from_secs(wait_secs)).await;

    print_pass(&log, &mut notices);

    let status = session.status().await;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

async fn cmd_watch(cfg: SessionConfig, interval_secs: u64) -> Result<()> {
    let (session, log) = build_session(&cfg)?;
    let mut notices = session.subscribe_notices();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.refresh().await?;
                // Give both source callbacks a moment to land.
                tokio::time::sleep(Duration::from_millis(500)).await;
                print_pass(&log, &mut notices);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted; stopping watch loop");
                break;
            }
        }
    }

    let status = session.status().await;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn print_pass(
    log: &Arc<Mutex<Vec<AppliedMutation>>>,
    notices: &mut tokio::sync::broadcast::Receiver<Notice>,
) {
    for m in log.lock().unwrap().drain(..) {
        match m {
            AppliedMutation::Upserted {
                role,
                point,
                label,
                handle,
            } => println!(
                "upsert {} [{label}] at {} -> handle {}",
                role.as_str(),
                point.to_wire(),
                handle.0
            ),
            AppliedMutation::Removed { handle } => println!("remove handle {}", handle.0),
        }
    }
    while let Ok(n) = notices.try_recv() {
        println!("notice: {}", serde_json::to_string(&n).unwrap_or_default());
    }
}
