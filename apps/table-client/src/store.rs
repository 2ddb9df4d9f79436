//! Read-only mirror of server state for the rest of the app.
//!
//! The engine writes into it through `StoreAction`s; anything else observes
//! it through subscriber callbacks. Subscriptions are owned by the store and
//! must be removed explicitly.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::domain::{Card, RosterEntry, Snapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSlice {
    pub room_id: Option<String>,
    pub players: Vec<RosterEntry>,
    pub current_turn: Option<String>,
    pub phase: String,
    /// Game object as last received.
    #[serde(skip)]
    pub raw: Value,
}

impl Default for GameSlice {
    fn default() -> Self {
        Self {
            room_id: None,
            players: Vec::new(),
            current_turn: None,
            phase: "waiting".to_string(),
            raw: Value::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSlice {
    pub id: Option<String>,
    pub name: String,
    pub seat_index: Option<usize>,
    pub hand: Vec<Card>,
    pub connected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSlice {
    /// Name submitted, table not ready yet.
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableState {
    pub game: GameSlice,
    pub player: PlayerSlice,
    pub ui: UiSlice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Replace the game slice from a snapshot. A snapshot without a phase
    /// keeps the stored one.
    SetGameState(Snapshot),
    SetPhase(String),
    ResetGame,
    SetPlayer {
        id: Option<String>,
        name: String,
        seat_index: Option<usize>,
    },
    SetHand(Vec<Card>),
    SetConnectionStatus(bool),
    SetLoading(bool),
    SetError(Option<String>),
    ResetUi,
}

impl StoreAction {
    fn name(&self) -> &'static str {
        match self {
            StoreAction::SetGameState(_) => "game/setGameState",
            StoreAction::SetPhase(_) => "game/setPhase",
            StoreAction::ResetGame => "game/resetGame",
            StoreAction::SetPlayer { .. } => "player/setPlayer",
            StoreAction::SetHand(_) => "player/setHand",
            StoreAction::SetConnectionStatus(_) => "player/setConnectionStatus",
            StoreAction::SetLoading(_) => "ui/setLoading",
            StoreAction::SetError(_) => "ui/setError",
            StoreAction::ResetUi => "ui/resetUI",
        }
    }
}

pub fn reduce(state: &mut TableState, action: StoreAction) {
    match action {
        StoreAction::SetGameState(snapshot) => {
            let phase = snapshot
                .phase
                .unwrap_or_else(|| state.game.phase.clone());
            state.game = GameSlice {
                room_id: snapshot.room_id,
                players: snapshot.players,
                current_turn: snapshot.current_turn,
                phase,
                raw: snapshot.game,
            };
        }
        StoreAction::SetPhase(phase) => state.game.phase = phase,
        StoreAction::ResetGame => state.game = GameSlice::default(),
        StoreAction::SetPlayer {
            id,
            name,
            seat_index,
        } => {
            state.player.id = id;
            state.player.name = name;
            state.player.seat_index = seat_index;
        }
        StoreAction::SetHand(hand) => state.player.hand = hand,
        StoreAction::SetConnectionStatus(connected) => state.player.connected = connected,
        StoreAction::SetLoading(loading) => state.ui.loading = loading,
        StoreAction::SetError(error) => state.ui.error = error,
        StoreAction::ResetUi => state.ui = UiSlice::default(),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TableState)>;

#[derive(Default)]
pub struct TableStore {
    state: TableState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

pub type SharedStore = Rc<RefCell<TableStore>>;

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Apply `action`, then notify subscribers in registration order.
    pub fn dispatch(&mut self, action: StoreAction) {
        trace!(action = action.name(), "[STORE] dispatch");
        reduce(&mut self.state, action);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TableState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        before != self.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}
