use std::time::Duration;

use serde_json::{json, Value};
use table_client::domain::{hand_keys, CardKey};
use table_client::{ClientConfig, SharedStore, TableEngine, TableStore, WireEvent};

use super::fakes::{RecordingBackend, RecordingTransport, RecordingUi};

/// Roster payload: `{id, name}` per identity, name upper-cased.
pub fn players(ids: &[&str]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| json!({"id": id, "name": id.to_uppercase()}))
            .collect(),
    )
}

/// A compact-code hand as JSON.
pub fn codes(cards: &[&str]) -> Value {
    json!(cards)
}

pub struct Harness {
    pub engine: TableEngine,
    pub ui: RecordingUi,
    pub backend: RecordingBackend,
    pub transport: RecordingTransport,
    pub store: SharedStore,
    pub config: ClientConfig,
    pub now: Duration,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let ui = RecordingUi::default();
        let backend = RecordingBackend::default();
        let transport = RecordingTransport::default();
        let store = TableStore::shared();
        let engine = TableEngine::new(
            config.clone(),
            Box::new(ui.clone()),
            Box::new(backend.clone()),
            Box::new(transport.clone()),
            store.clone(),
        );
        Self {
            engine,
            ui,
            backend,
            transport,
            store,
            config,
            now: Duration::ZERO,
        }
    }

    pub fn event(&mut self, name: &str, payload: Value) {
        self.engine
            .handle_wire_event(&WireEvent::new(name, payload));
    }

    /// Connect as `local` and submit a name.
    pub fn join(&mut self, local: &str) {
        self.event("connect", json!({"id": local}));
        self.engine.submit_name("Me").unwrap();
    }

    /// Join as `local` and fill the room with `ids`.
    pub fn ready(&mut self, local: &str, ids: &[&str]) {
        self.join(local);
        self.event("roomUpdated", json!({"players": players(ids)}));
    }

    pub fn snapshot(&mut self, phase: &str, ids: &[&str], hand: &[&str]) {
        self.event(
            "stateSnapshot",
            json!({"phase": phase, "game": {"players": players(ids)}, "hand": codes(hand)}),
        );
    }

    /// Advance the frame clock by `by` in frame-sized steps.
    pub fn run_for(&mut self, by: Duration) {
        let frame = self.config.frame_interval();
        let until = self.now + by;
        while self.now < until {
            self.now += frame;
            self.engine.tick(self.now);
        }
    }

    /// Tick until no animation is queued.
    pub fn settle(&mut self) {
        let frame = self.config.frame_interval();
        let mut guard = 0;
        while self.engine.is_animating() && guard < 10_000 {
            self.now += frame;
            self.engine.tick(self.now);
            guard += 1;
        }
    }

    pub fn local_keys(&self) -> Vec<CardKey> {
        hand_keys(self.engine.local_hand())
    }
}
