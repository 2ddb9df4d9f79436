//! Collaborators that only log, for running the engine without a screen.

use tracing::{debug, info, trace, warn};

use crate::domain::{Card, CardKey, Phase};
use crate::render::{Point, RenderBackend, RenderableCard, SeatLabel, TableLayout};
use crate::ui::{lobby_lines, lobby_status, phase_title, TableUi};

#[derive(Debug, Default)]
pub struct TracingUi {
    pass_enabled: bool,
}

impl TableUi for TracingUi {
    fn show_lobby(&mut self, names: &[String], max_players: usize) {
        info!(
            status = %lobby_status(names.len(), max_players),
            players = ?lobby_lines(names),
            "[UI] lobby"
        );
    }

    fn hide_lobby(&mut self) {
        debug!("[UI] lobby hidden");
    }

    fn show_controls(&mut self) {
        debug!("[UI] controls shown");
    }

    fn hide_controls(&mut self) {
        self.hide_pass_button();
        debug!("[UI] controls hidden");
    }

    fn update_phase(&mut self, phase: &Phase) {
        info!(title = %phase_title(phase), "[UI] phase");
    }

    fn show_pass_button(&mut self) {
        debug!("[UI] pass button shown");
    }

    fn set_pass_button_enabled(&mut self, enabled: bool) {
        if self.pass_enabled != enabled {
            self.pass_enabled = enabled;
            debug!(enabled, "[UI] pass button");
        }
    }

    fn hide_pass_button(&mut self) {
        self.pass_enabled = false;
        debug!("[UI] pass button hidden");
    }

    fn show_waiting_overlay(&mut self, message: &str) {
        info!(message, "[UI] waiting overlay");
    }

    fn hide_waiting_overlay(&mut self) {
        trace!("[UI] waiting overlay hidden");
    }

    fn highlight_selection(&mut self, keys: &[CardKey]) {
        trace!(selected = keys.len(), "[UI] selection");
    }

    fn show_error(&mut self, message: &str) {
        warn!(message, "[UI] server error");
    }
}

#[derive(Debug)]
pub struct TracingCard {
    card: Card,
    face_down: bool,
    position: Point,
    scale: f32,
    opacity: f32,
}

impl RenderableCard for TracingCard {
    fn set_position(&mut self, at: Point) {
        self.position = at;
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn flip(&mut self) {
        self.face_down = !self.face_down;
        trace!(
            card = %self.card,
            face_down = self.face_down,
            x = self.position.x,
            y = self.position.y,
            scale = self.scale,
            opacity = self.opacity,
            "[RENDER] flip"
        );
    }

    fn is_face_down(&self) -> bool {
        self.face_down
    }

    fn remove(&mut self) {
        trace!(card = %self.card, "[RENDER] card removed");
    }
}

#[derive(Debug, Default)]
pub struct TracingBackend {
    created: usize,
}

impl TracingBackend {
    /// Cards created over the backend's lifetime.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl RenderBackend for TracingBackend {
    fn create_card(&mut self, card: Card, face_down: bool) -> Box<dyn RenderableCard> {
        self.created += 1;
        Box::new(TracingCard {
            card,
            face_down,
            position: Point::default(),
            scale: 1.0,
            opacity: 1.0,
        })
    }

    fn clear_cards(&mut self) {
        trace!("[RENDER] cards cleared");
    }

    fn draw_table(&mut self, layout: &TableLayout) {
        debug!(width = layout.width, height = layout.height, "[RENDER] table");
    }

    fn draw_seat_labels(&mut self, labels: &[SeatLabel]) {
        for label in labels {
            debug!(seat = label.seat_index, text = %label.text, "[RENDER] seat label");
        }
    }

    fn clear_stage(&mut self) {
        debug!(created = self.created, "[RENDER] stage cleared");
    }
}
