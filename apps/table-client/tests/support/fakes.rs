//! Recording collaborators. Each fake is a cheap clone over shared state so
//! a test keeps a handle after boxing one into the engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use table_client::domain::{Card, CardKey, Phase};
use table_client::{
    OutboundAction, Point, RenderBackend, RenderableCard, SeatLabel, TableLayout, TableUi,
    Transport, TransportError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    ShowLobby(Vec<String>),
    HideLobby,
    ShowControls,
    HideControls,
    UpdatePhase(Phase),
    ShowPassButton,
    PassButtonEnabled(bool),
    HidePassButton,
    ShowWaiting(String),
    HideWaiting,
    Highlight(Vec<CardKey>),
    Error(String),
}

#[derive(Clone, Default)]
pub struct RecordingUi {
    calls: Rc<RefCell<Vec<UiCall>>>,
}

impl RecordingUi {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, wanted: &UiCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == wanted).count()
    }

    pub fn last_highlight(&self) -> Option<Vec<CardKey>> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            UiCall::Highlight(keys) => Some(keys.clone()),
            _ => None,
        })
    }

    pub fn last_pass_enabled(&self) -> Option<bool> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            UiCall::PassButtonEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    fn push(&self, call: UiCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl TableUi for RecordingUi {
    fn show_lobby(&mut self, names: &[String], _max_players: usize) {
        self.push(UiCall::ShowLobby(names.to_vec()));
    }
    fn hide_lobby(&mut self) {
        self.push(UiCall::HideLobby);
    }
    fn show_controls(&mut self) {
        self.push(UiCall::ShowControls);
    }
    fn hide_controls(&mut self) {
        self.push(UiCall::HideControls);
    }
    fn update_phase(&mut self, phase: &Phase) {
        self.push(UiCall::UpdatePhase(phase.clone()));
    }
    fn show_pass_button(&mut self) {
        self.push(UiCall::ShowPassButton);
    }
    fn set_pass_button_enabled(&mut self, enabled: bool) {
        self.push(UiCall::PassButtonEnabled(enabled));
    }
    fn hide_pass_button(&mut self) {
        self.push(UiCall::HidePassButton);
    }
    fn show_waiting_overlay(&mut self, message: &str) {
        self.push(UiCall::ShowWaiting(message.to_string()));
    }
    fn hide_waiting_overlay(&mut self) {
        self.push(UiCall::HideWaiting);
    }
    fn highlight_selection(&mut self, keys: &[CardKey]) {
        self.push(UiCall::Highlight(keys.to_vec()));
    }
    fn show_error(&mut self, message: &str) {
        self.push(UiCall::Error(message.to_string()));
    }
}

/// Everything a renderable card has been told.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub card: Card,
    pub face_down: bool,
    pub position: Point,
    pub scale: f32,
    pub opacity: f32,
    pub writes: usize,
    pub removed: bool,
}

struct FakeCard {
    state: Rc<RefCell<CardState>>,
}

impl RenderableCard for FakeCard {
    fn set_position(&mut self, at: Point) {
        let mut state = self.state.borrow_mut();
        state.position = at;
        state.writes += 1;
    }
    fn set_scale(&mut self, scale: f32) {
        let mut state = self.state.borrow_mut();
        state.scale = scale;
        state.writes += 1;
    }
    fn set_opacity(&mut self, opacity: f32) {
        let mut state = self.state.borrow_mut();
        state.opacity = opacity;
        state.writes += 1;
    }
    fn flip(&mut self) {
        let mut state = self.state.borrow_mut();
        state.face_down = !state.face_down;
        state.writes += 1;
    }
    fn is_face_down(&self) -> bool {
        self.state.borrow().face_down
    }
    fn remove(&mut self) {
        self.state.borrow_mut().removed = true;
    }
}

#[derive(Default)]
struct BackendLog {
    cards: Vec<Rc<RefCell<CardState>>>,
    clears: usize,
    tables: usize,
    labels: Vec<SeatLabel>,
    stage_cleared: bool,
}

#[derive(Clone, Default)]
pub struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
}

impl RecordingBackend {
    /// Cards created so far, oldest first.
    pub fn created(&self) -> usize {
        self.log.borrow().cards.len()
    }

    pub fn card(&self, index: usize) -> CardState {
        self.log.borrow().cards[index].borrow().clone()
    }

    /// States of cards created in `range`.
    pub fn cards(&self, range: std::ops::Range<usize>) -> Vec<CardState> {
        self.log.borrow().cards[range]
            .iter()
            .map(|c| c.borrow().clone())
            .collect()
    }

    pub fn total_writes(&self, range: std::ops::Range<usize>) -> usize {
        self.cards(range).iter().map(|c| c.writes).sum()
    }

    pub fn clears(&self) -> usize {
        self.log.borrow().clears
    }

    pub fn tables_drawn(&self) -> usize {
        self.log.borrow().tables
    }

    pub fn labels(&self) -> Vec<SeatLabel> {
        self.log.borrow().labels.clone()
    }

    pub fn stage_cleared(&self) -> bool {
        self.log.borrow().stage_cleared
    }
}

impl RenderBackend for RecordingBackend {
    fn create_card(&mut self, card: Card, face_down: bool) -> Box<dyn RenderableCard> {
        let state = Rc::new(RefCell::new(CardState {
            card,
            face_down,
            position: Point::default(),
            scale: 1.0,
            opacity: 1.0,
            writes: 0,
            removed: false,
        }));
        self.log.borrow_mut().cards.push(state.clone());
        Box::new(FakeCard { state })
    }
    fn clear_cards(&mut self) {
        self.log.borrow_mut().clears += 1;
    }
    fn draw_table(&mut self, _layout: &TableLayout) {
        self.log.borrow_mut().tables += 1;
    }
    fn draw_seat_labels(&mut self, labels: &[SeatLabel]) {
        self.log.borrow_mut().labels = labels.to_vec();
    }
    fn clear_stage(&mut self) {
        self.log.borrow_mut().stage_cleared = true;
    }
}

#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Rc<RefCell<Vec<OutboundAction>>>,
    closed: Rc<Cell<bool>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<OutboundAction> {
        self.sent.borrow().clone()
    }

    pub fn set_closed(&self, closed: bool) {
        self.closed.set(closed);
    }
}

impl Transport for RecordingTransport {
    fn emit(&mut self, action: OutboundAction) -> Result<(), TransportError> {
        if self.closed.get() {
            return Err(TransportError::Closed {
                event: action.event_name(),
            });
        }
        self.sent.borrow_mut().push(action);
        Ok(())
    }
}
