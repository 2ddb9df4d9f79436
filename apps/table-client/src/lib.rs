#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Client-side table engine for a four-seat trick-taking card game.

pub mod animation;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod headless;
pub mod player_name;
pub mod protocol;
pub mod render;
pub mod replay;
pub mod runtime;
pub mod store;
pub mod telemetry;
pub mod transport;
pub mod ui;

// Re-exports for public API
pub use config::{ClientConfig, DealTiming};
pub use engine::{TableEngine, TableSummary};
pub use error::ClientError;
pub use player_name::PlayerName;
pub use protocol::{InboundEvent, OutboundAction, WireEvent};
pub use render::{CardLayer, Point, RenderBackend, RenderableCard, SeatLabel, TableLayout};
pub use runtime::run_table;
pub use store::{SharedStore, StoreAction, SubscriptionId, TableState, TableStore};
pub use transport::{ChannelTransport, Transport, TransportError};
pub use ui::TableUi;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    table_test_support::test_logging::init();
}
