//! table-replay: run recorded server events through a headless table.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use table_client::config::ClientConfig;
use table_client::engine::{TableEngine, TableSummary};
use table_client::headless::{TracingBackend, TracingUi};
use table_client::protocol::{InboundEvent, OutboundAction};
use table_client::replay::{load_events, replay};
use table_client::store::{TableState, TableStore};
use table_client::telemetry::init_tracing;
use table_client::transport::ChannelTransport;
use tracing::info;

#[derive(Parser)]
#[command(name = "table-replay")]
#[command(about = "Replay recorded table events through a headless client")]
struct Args {
    /// JSON-lines file with one {"event", "payload"} per line
    events: PathBuf,

    /// JSON config file (defaults plus TABLE_*/DEAL_* env vars otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame interval override in milliseconds
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Virtual time between consecutive events in milliseconds
    #[arg(long, default_value = "0")]
    gap_ms: u64,

    /// Local display name submitted before the first event
    #[arg(long, default_value = "Player")]
    name: String,

    /// Local identity, for recordings without a connect event
    #[arg(long)]
    identity: Option<String>,
}

#[derive(Serialize)]
struct ReplayOutput {
    table: TableSummary,
    emitted: Vec<OutboundAction>,
    store: TableState,
    elapsed_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_json_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(frame_ms) = args.frame_ms {
        config.frame_ms = frame_ms.max(1);
    }
    init_tracing(&config.log_filter);

    let events = load_events(&args.events)?;
    info!(
        events = events.len(),
        path = %args.events.display(),
        "[REPLAY] loaded"
    );

    let (transport, mut outbound) = ChannelTransport::new();
    let store = TableStore::shared();
    let frame = config.frame_interval();
    let mut engine = TableEngine::new(
        config,
        Box::new(TracingUi::default()),
        Box::new(TracingBackend::default()),
        Box::new(transport),
        store.clone(),
    );

    if args.identity.is_some() {
        engine.handle_event(InboundEvent::Connected {
            identity: args.identity.clone(),
        });
    }
    engine.submit_name(&args.name)?;
    let elapsed = replay(&mut engine, &events, frame, Duration::from_millis(args.gap_ms));

    let mut emitted = Vec::new();
    while let Ok(action) = outbound.try_recv() {
        emitted.push(action);
    }
    let output = ReplayOutput {
        table: engine.summary(),
        emitted,
        store: store.borrow().state().clone(),
        elapsed_ms: elapsed.as_millis() as u64,
    };
    engine.dispose();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
