//! Screen geometry for the four seats.

use serde::Deserialize;

use super::Point;
use crate::domain::SeatAnchor;

/// Below this width the hand fan is tightened.
const COMPACT_WIDTH: f32 = 768.0;
const COMPACT_SPACING_FACTOR: f32 = 0.72;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub width: f32,
    pub height: f32,
    /// Horizontal distance between neighbouring cards of one hand.
    pub card_offset: f32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            card_offset: 25.0,
        }
    }
}

impl TableLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn is_compact(&self) -> bool {
        self.width < COMPACT_WIDTH
    }

    /// Where every dealt card starts.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Base position of a seat's hand.
    pub fn anchor_point(&self, anchor: SeatAnchor) -> Point {
        let (w, h) = (self.width, self.height);
        match anchor {
            SeatAnchor::Bottom => Point::new(w / 2.0 - 300.0, h - 150.0),
            SeatAnchor::Left => Point::new(80.0, h / 2.0 - 100.0),
            SeatAnchor::Top => Point::new(w / 2.0 - 300.0, 100.0),
            SeatAnchor::Right => Point::new(w - 500.0, h / 2.0 - 100.0),
        }
    }

    pub fn card_spacing(&self) -> f32 {
        if self.is_compact() {
            self.card_offset * COMPACT_SPACING_FACTOR
        } else {
            self.card_offset
        }
    }

    /// Resting position of the `card_index`th card of a seat.
    pub fn card_slot(&self, anchor: SeatAnchor, card_index: usize) -> Point {
        self.anchor_point(anchor)
            .offset(card_index as f32 * self.card_spacing(), 0.0)
    }

    /// Name plate position for a seat.
    pub fn label_point(&self, anchor: SeatAnchor) -> Point {
        self.anchor_point(anchor).offset(120.0, -40.0)
    }

    /// End point of the `i`th of `n` shuffle-burst cards.
    pub fn burst_point(&self, i: usize, n: usize, radius: f32) -> Point {
        let angle = std::f32::consts::TAU * i as f32 / n.max(1) as f32;
        self.center()
            .offset(radius * angle.cos(), radius * angle.sin())
    }
}
