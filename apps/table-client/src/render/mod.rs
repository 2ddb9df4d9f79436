//! Rendering capability seams.
//!
//! The engine never touches a concrete scene graph. A backend hands out
//! renderable cards and draws the static table pieces; everything animated
//! goes through `RenderableCard`.

pub mod layer;
pub mod layout;

use crate::domain::Card;

pub use layer::{CardLayer, CardRef};
pub use layout::TableLayout;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A drawable card with mutable transform state.
pub trait RenderableCard {
    fn set_position(&mut self, at: Point);
    fn set_scale(&mut self, scale: f32);
    fn set_opacity(&mut self, opacity: f32);
    /// Toggle between face and back.
    fn flip(&mut self);
    fn is_face_down(&self) -> bool;

    /// One-way reveal.
    fn reveal(&mut self) {
        if self.is_face_down() {
            self.flip();
        }
    }

    /// Taken off the surface for good; the card is dropped right after.
    fn remove(&mut self) {}
}

/// Name plate for one seat.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatLabel {
    pub seat_index: usize,
    pub text: String,
    pub at: Point,
}

/// Drawing backend for the table scene.
pub trait RenderBackend {
    /// Add a card to the card surface.
    fn create_card(&mut self, card: Card, face_down: bool) -> Box<dyn RenderableCard>;
    /// Remove every card from the card surface.
    fn clear_cards(&mut self);
    fn draw_table(&mut self, layout: &TableLayout);
    fn draw_seat_labels(&mut self, labels: &[SeatLabel]);
    /// Remove all layers; called on teardown.
    fn clear_stage(&mut self);
}
