//! Reconciliation loop.
//!
//! `TableEngine` is the only component that touches all others. It owns the
//! seats, the local hand and the selection; rendering and animation only
//! ever read position targets computed when a render is scheduled.
//!
//! Every snapshot is last-write-wins: rendering always starts by clearing
//! the card layer, which cancels whatever the previous render left queued.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::animation::{render_instant, schedule_deal, FrameScheduler};
use crate::config::ClientConfig;
use crate::domain::roster::same_membership;
use crate::domain::seats::apply_hands;
use crate::domain::{
    assign_seats, normalize_snapshot, Card, CardKey, Phase, PhaseController, PhaseTransition,
    RosterEntry, Seat, SeatAnchor, SelectionError, SelectionManager, ToggleOutcome, SEAT_COUNT,
};
use crate::error::ClientError;
use crate::player_name::PlayerName;
use crate::protocol::{decode, InboundEvent, OutboundAction, WireEvent};
use crate::render::{CardLayer, RenderBackend, SeatLabel};
use crate::store::{SharedStore, StoreAction, SubscriptionId, TableState};
use crate::transport::Transport;
use crate::ui::{TableUi, WAITING_FOR_PASS};

pub struct TableEngine {
    config: ClientConfig,
    ui: Box<dyn TableUi>,
    backend: Box<dyn RenderBackend>,
    transport: Box<dyn Transport>,
    store: SharedStore,
    subscription: Option<SubscriptionId>,

    phase: PhaseController,
    selection: SelectionManager,
    roster: Vec<RosterEntry>,
    /// Roster the current seats were built from.
    seated_roster: Vec<RosterEntry>,
    seats: Option<[Seat; SEAT_COUNT]>,
    local_identity: Option<String>,
    local_name: Option<PlayerName>,
    local_hand: Vec<Card>,

    layer: CardLayer,
    frames: FrameScheduler,
    /// One-shot: the next hand render animates the deal.
    deal_armed: bool,
    deal_token: Option<CancellationToken>,
    disposed: bool,
}

/// Debug trace of turn changes, registered for the engine's lifetime.
fn turn_tracer() -> impl FnMut(&TableState) + 'static {
    let mut last_turn: Option<String> = None;
    move |state| {
        if state.game.current_turn != last_turn {
            last_turn = state.game.current_turn.clone();
            debug!(
                current_turn = last_turn.as_deref().unwrap_or("<none>"),
                "[STORE] current turn changed"
            );
        }
    }
}

impl TableEngine {
    pub fn new(
        config: ClientConfig,
        ui: Box<dyn TableUi>,
        backend: Box<dyn RenderBackend>,
        transport: Box<dyn Transport>,
        store: SharedStore,
    ) -> Self {
        let subscription = store.borrow_mut().subscribe(turn_tracer());
        Self {
            config,
            ui,
            backend,
            transport,
            store,
            subscription: Some(subscription),
            phase: PhaseController::new(),
            selection: SelectionManager::new(),
            roster: Vec::new(),
            seated_roster: Vec::new(),
            seats: None,
            local_identity: None,
            local_name: None,
            local_hand: Vec::new(),
            layer: CardLayer::new(),
            frames: FrameScheduler::new(),
            deal_armed: false,
            deal_token: None,
            disposed: false,
        }
    }

    pub fn phase(&self) -> &Phase {
        self.phase.phase()
    }

    pub fn seats(&self) -> Option<&[Seat; SEAT_COUNT]> {
        self.seats.as_ref()
    }

    pub fn local_identity(&self) -> Option<&str> {
        self.local_identity.as_deref()
    }

    pub fn local_hand(&self) -> &[Card] {
        &self.local_hand
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn card_layer(&self) -> &CardLayer {
        &self.layer
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Any animation task still queued and live.
    pub fn is_animating(&self) -> bool {
        !self.frames.is_idle()
    }

    /// The initial deal is scheduled and has not been cancelled.
    pub fn deal_in_flight(&self) -> bool {
        self.deal_token
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
            && self.is_animating()
    }

    fn dispatch(&self, action: StoreAction) {
        self.store.borrow_mut().dispatch(action);
    }

    // ----- local intents -----

    /// Register the local display name. Only the first call is sent.
    pub fn submit_name(&mut self, raw: &str) -> Result<(), ClientError> {
        if self.local_name.is_some() {
            debug!("[RECONCILE] name already submitted, ignoring");
            return Ok(());
        }
        let name = PlayerName::parse(raw)?;
        self.transport.emit(OutboundAction::StartGame {
            name: name.to_string(),
        })?;
        info!(name = %name, "[RECONCILE] name submitted");

        self.dispatch(StoreAction::SetPlayer {
            id: self.local_identity.clone(),
            name: name.to_string(),
            seat_index: None,
        });
        self.dispatch(StoreAction::SetLoading(true));
        self.local_name = Some(name);
        self.phase.enter_lobby();
        self.refresh_roster();
        Ok(())
    }

    /// Flip a local card in or out of the pass selection. Rejections are
    /// logged and otherwise ignored.
    pub fn toggle_card(&mut self, key: CardKey) -> Option<ToggleOutcome> {
        if self.disposed {
            return None;
        }
        let result = if key.matches(&self.local_hand) {
            self.selection.toggle(key, self.phase.phase())
        } else {
            Err(SelectionError::UnknownCard(key))
        };
        match result {
            Ok(outcome) => {
                self.ui.highlight_selection(self.selection.selected());
                self.ui
                    .set_pass_button_enabled(self.selection.can_submit(self.phase.phase()));
                debug!(
                    key = %key,
                    outcome = ?outcome,
                    selected = self.selection.len(),
                    "[SELECTION] toggled"
                );
                Some(outcome)
            }
            Err(err) => {
                debug!(key = %key, error = %err, "[SELECTION] toggle ignored");
                None
            }
        }
    }

    /// Send the three selected cards. `Ok(false)` when the selection does not
    /// allow a submission right now.
    pub fn submit_pass(&mut self) -> Result<bool, ClientError> {
        if self.disposed {
            return Ok(false);
        }
        let cards = match self.selection.submit(self.phase.phase()) {
            Ok(cards) => cards,
            Err(err) => {
                debug!(error = %err, "[PASS] submit ignored");
                return Ok(false);
            }
        };
        if let Err(err) = self.transport.emit(OutboundAction::PassCards { cards }) {
            self.selection.abort_submit();
            return Err(err.into());
        }
        info!(cards = ?cards.map(|c| c.code()), "[PASS] submitted");

        if let Some(transition) = self.phase.begin_pass_ack() {
            self.on_transition(&transition);
        }
        self.ui.highlight_selection(self.selection.selected());
        self.ui.set_pass_button_enabled(false);
        self.ui.show_waiting_overlay(WAITING_FOR_PASS);
        Ok(true)
    }

    /// Relay a card play. Legality is the server's business.
    pub fn play_card(&mut self, key: CardKey) -> Result<bool, ClientError> {
        if self.disposed || *self.phase.phase() != Phase::Playing {
            debug!(phase = %self.phase.phase(), "[PLAY] ignored outside playing");
            return Ok(false);
        }
        if !key.matches(&self.local_hand) {
            debug!(key = %key, "[PLAY] card not in hand");
            return Ok(false);
        }
        self.transport
            .emit(OutboundAction::PlayCard { card: key.card() })?;
        info!(card = %key.card(), "[PLAY] relayed");
        Ok(true)
    }

    // ----- inbound -----

    pub fn handle_wire_event(&mut self, wire: &WireEvent) {
        for event in decode(wire) {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: InboundEvent) {
        if self.disposed {
            debug!("[RECONCILE] disposed, dropping event");
            return;
        }
        match event {
            InboundEvent::Connected { identity } => self.on_connected(identity),
            InboundEvent::Disconnected => {
                info!("[RECONCILE] disconnected");
                self.dispatch(StoreAction::SetConnectionStatus(false));
            }
            InboundEvent::RoomUpdated {
                players,
                local_identity,
                game,
            } => self.on_room_updated(players, local_identity, &game),
            InboundEvent::StateSnapshot(payload) => self.on_state_snapshot(&payload),
            InboundEvent::PassingComplete { phase, hand } => self.on_passing_complete(phase, hand),
            InboundEvent::ServerError(message) => {
                warn!(message = %message, "[RECONCILE] server error");
                self.ui.show_error(&message);
                self.dispatch(StoreAction::SetError(Some(message)));
            }
            InboundEvent::GameReset => self.reset(),
        }
    }

    fn on_connected(&mut self, identity: Option<String>) {
        if identity.is_some() {
            self.local_identity = identity;
        }
        info!(
            identity = self.local_identity.as_deref().unwrap_or("<unknown>"),
            "[RECONCILE] connected"
        );
        self.dispatch(StoreAction::SetConnectionStatus(true));
        if let Some(name) = &self.local_name {
            self.dispatch(StoreAction::SetPlayer {
                id: self.local_identity.clone(),
                name: name.to_string(),
                seat_index: self.seats.as_ref().map(|_| 0),
            });
        }
    }

    fn on_room_updated(
        &mut self,
        players: Vec<RosterEntry>,
        local_identity: Option<String>,
        game: &Value,
    ) {
        if local_identity.is_some() {
            self.local_identity = local_identity;
        }
        self.dispatch(StoreAction::SetGameState(normalize_snapshot(
            game,
            self.local_identity.as_deref(),
        )));
        self.roster = players;
        debug!(players = self.roster.len(), "[RECONCILE] room updated");
        self.refresh_roster();
    }

    fn on_state_snapshot(&mut self, payload: &Value) {
        let snapshot = normalize_snapshot(payload, self.local_identity.as_deref());
        self.dispatch(StoreAction::SetGameState(snapshot.clone()));
        self.dispatch(StoreAction::SetHand(snapshot.local_hand.clone()));

        if !snapshot.players.is_empty() {
            self.roster = snapshot.players.clone();
        }
        self.local_hand = snapshot.local_hand;

        if !self.phase.is_ready() {
            // Stored until the table is ready, then applied by become_ready.
            self.phase.apply_server_phase(snapshot.phase.as_deref());
            self.refresh_roster();
            if !self.phase.is_ready() {
                debug!(
                    players = self.roster.len(),
                    phase = %self.phase.phase(),
                    "[RECONCILE] snapshot before ready"
                );
                return;
            }
        } else {
            self.refresh_roster();
        }

        if let Some(seats) = self.seats.as_mut() {
            apply_hands(
                seats,
                &self.local_hand,
                &snapshot.players,
                self.config.full_hand,
            );
        }
        self.selection.retain_matching(&self.local_hand);

        if let Some(transition) = self.phase.apply_server_phase(snapshot.phase.as_deref()) {
            self.on_transition(&transition);
        }
        self.render_hands();
        self.ui.highlight_selection(self.selection.selected());
    }

    fn on_passing_complete(&mut self, phase: Option<String>, hand: Vec<Card>) {
        self.dispatch(StoreAction::SetHand(hand.clone()));
        if let Some(phase) = &phase {
            self.dispatch(StoreAction::SetPhase(phase.clone()));
        }

        let transition = self.phase.complete_pass(phase.as_deref());
        self.local_hand = hand;
        if !self.phase.is_ready() {
            return;
        }

        self.selection.reset();
        self.ui.hide_waiting_overlay();
        self.ui.highlight_selection(&[]);
        if let Some(transition) = transition {
            self.on_transition(&transition);
        }
        info!(
            hand = self.local_hand.len(),
            phase = %self.phase.phase(),
            "[PASS] complete"
        );

        if let Some(seats) = self.seats.as_mut() {
            seats[0].hand = self.local_hand.clone();
        }
        self.deal_armed = false;
        self.render_hands();
    }

    // ----- lifecycle -----

    /// Advance animations to frame time `now`.
    pub fn tick(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        self.frames.advance(now, &mut self.layer);
    }

    /// Server reset: empty hands, drop selection, clear the surface and
    /// re-arm the deal. Seats are kept.
    pub fn reset(&mut self) {
        info!("[RECONCILE] game reset");
        if let Some(seats) = self.seats.as_mut() {
            seats.iter_mut().for_each(Seat::reset);
        }
        self.local_hand.clear();
        self.selection.reset();
        self.layer.clear(self.backend.as_mut());
        self.frames.cancel_all();
        self.deal_token = None;
        self.deal_armed = true;

        self.ui.hide_waiting_overlay();
        self.ui.hide_pass_button();
        self.ui.highlight_selection(&[]);
        if let Some(transition) = self.phase.reset() {
            self.on_transition(&transition);
        }
        self.dispatch(StoreAction::ResetGame);
        self.dispatch(StoreAction::SetHand(Vec::new()));
        self.dispatch(StoreAction::ResetUi);
    }

    /// Tear down: cancel animations, drop the store subscription and clear
    /// the stage. Later events are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.layer.clear(self.backend.as_mut());
        self.frames.cancel_all();
        self.deal_token = None;
        if let Some(id) = self.subscription.take() {
            self.store.borrow_mut().unsubscribe(id);
        }
        self.ui.hide_waiting_overlay();
        self.ui.hide_lobby();
        self.ui.hide_controls();
        self.backend.clear_stage();
        info!("[RECONCILE] disposed");
    }

    // ----- internals -----

    fn refresh_roster(&mut self) {
        if self.local_name.is_none() {
            return;
        }
        if !self.phase.is_ready() {
            if self.roster.len() < SEAT_COUNT {
                let names: Vec<String> = self
                    .roster
                    .iter()
                    .map(|entry| entry.display_name.clone())
                    .collect();
                self.ui.show_lobby(&names, SEAT_COUNT);
                debug!(players = self.roster.len(), "[RECONCILE] waiting in lobby");
                return;
            }
            self.become_ready();
            return;
        }

        if same_membership(&self.seated_roster, &self.roster) {
            return;
        }
        if self.roster.len() < SEAT_COUNT {
            warn!(
                players = self.roster.len(),
                "[SEATS] roster shrank after ready, keeping seats"
            );
            return;
        }
        self.reseat();
    }

    fn become_ready(&mut self) {
        let seats = match assign_seats(&self.roster, self.local_identity.as_deref()) {
            Ok(seats) => seats,
            Err(err) => {
                warn!(error = %err, "[SEATS] cannot seat roster");
                return;
            }
        };
        let Some(transition) = self.phase.mark_ready() else {
            return;
        };
        self.seats = Some(seats);
        self.seated_roster = self.roster.clone();
        self.deal_armed = true;
        self.dispatch(StoreAction::SetLoading(false));

        self.ui.hide_lobby();
        self.ui.show_controls();
        self.backend.draw_table(&self.config.layout);
        self.draw_labels();
        info!(
            local_identity = self.local_identity.as_deref().unwrap_or("<unknown>"),
            "[RECONCILE] table ready"
        );
        self.on_transition(&transition);

        let stored = self.phase.server_phase().map(str::to_owned);
        if let Some(transition) = self.phase.apply_server_phase(stored.as_deref()) {
            self.on_transition(&transition);
        }
    }

    fn reseat(&mut self) {
        let seats = match assign_seats(&self.roster, self.local_identity.as_deref()) {
            Ok(seats) => seats,
            Err(err) => {
                warn!(error = %err, "[SEATS] cannot reseat roster");
                return;
            }
        };
        info!(players = self.roster.len(), "[SEATS] membership changed, reseating");
        self.seats = Some(seats);
        self.seated_roster = self.roster.clone();
        self.draw_labels();

        if let Some(seats) = self.seats.as_mut() {
            apply_hands(seats, &self.local_hand, &self.roster, self.config.full_hand);
        }
        if !self.deal_armed {
            self.render_hands();
        }
    }

    fn draw_labels(&mut self) {
        let Some(seats) = self.seats.as_ref() else {
            return;
        };
        let labels: Vec<SeatLabel> = seats
            .iter()
            .map(|seat| SeatLabel {
                seat_index: seat.index,
                text: seat.label(self.local_identity.as_deref()),
                at: self.config.layout.label_point(seat.anchor),
            })
            .collect();
        self.backend.draw_seat_labels(&labels);
    }

    /// Clear the surface, then either run the one-shot deal or draw every
    /// hand in place.
    fn render_hands(&mut self) {
        let Some(seats) = self.seats.as_ref() else {
            return;
        };
        self.layer.clear(self.backend.as_mut());
        if self.deal_armed {
            self.deal_armed = false;
            let token = schedule_deal(
                seats,
                &self.config.layout,
                &self.config.deal,
                &mut self.layer,
                self.backend.as_mut(),
                &mut self.frames,
            );
            self.deal_token = Some(token);
        } else {
            render_instant(
                seats,
                &self.config.layout,
                &mut self.layer,
                self.backend.as_mut(),
            );
        }
    }

    fn on_transition(&mut self, transition: &PhaseTransition) {
        self.ui.update_phase(&transition.to);
        if transition.left_passing() {
            self.selection.reset();
            self.ui.highlight_selection(&[]);
            self.ui.hide_waiting_overlay();
            self.ui.hide_pass_button();
        }
        if transition.entered_passing() {
            self.selection.reset();
            self.ui.show_pass_button();
            self.ui.set_pass_button_enabled(false);
        }
    }

    /// Serializable view of the table, for logs and the replay tool.
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            phase: self.phase.phase().to_string(),
            server_phase: self.phase.server_phase().map(str::to_owned),
            local_identity: self.local_identity.clone(),
            local_hand: self.local_hand.iter().map(Card::code).collect(),
            seats: self
                .seats
                .iter()
                .flatten()
                .map(|seat| SeatSummary {
                    index: seat.index,
                    identity: seat.identity.clone(),
                    name: seat.display_name.clone(),
                    anchor: seat.anchor,
                    cards: seat.hand.len(),
                })
                .collect(),
            selected: self.selection.selected().iter().map(|k| k.to_string()).collect(),
            pass_pending: self.selection.is_pending(),
            layer_generation: self.layer.generation(),
            cards_on_table: self.layer.len(),
            animating: self.is_animating(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatSummary {
    pub index: usize,
    pub identity: String,
    pub name: String,
    pub anchor: SeatAnchor,
    pub cards: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub phase: String,
    pub server_phase: Option<String>,
    pub local_identity: Option<String>,
    pub local_hand: Vec<String>,
    pub seats: Vec<SeatSummary>,
    pub selected: Vec<String>,
    pub pass_pending: bool,
    pub layer_generation: u64,
    pub cards_on_table: usize,
    pub animating: bool,
}
