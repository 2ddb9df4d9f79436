//! Deal timeline: a shuffle burst, then a round-robin deal.
//!
//! Card `i` of seat `s` has stagger order `i * SEAT_COUNT + s`, so the deck
//! goes one card to each seat in turn. Every delay is offset by the full
//! burst duration.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::easing::{ease_out_cubic, progress};
use super::scheduler::{FrameScheduler, FrameTask, TaskStatus};
use crate::config::DealTiming;
use crate::domain::{Card, Seat, SEAT_COUNT};
use crate::render::{CardLayer, CardRef, Point, RenderBackend, TableLayout};

/// Scale a burst card shrinks to while fading.
const BURST_END_SCALE: f32 = 0.7;

pub fn stagger_order(card_index: usize, seat_index: usize) -> usize {
    card_index * SEAT_COUNT + seat_index
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCard {
    pub seat_index: usize,
    pub card_index: usize,
    pub card: Card,
    /// Local cards turn face up on landing.
    pub reveal: bool,
    pub order: usize,
    pub delay: Duration,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealPlan {
    pub origin: Point,
    /// End points of the temporary burst cards.
    pub burst: Vec<Point>,
    pub burst_duration: Duration,
    pub card_duration: Duration,
    /// Sorted by stagger order.
    pub cards: Vec<PlannedCard>,
}

impl DealPlan {
    /// Time from scheduling until the last card lands.
    pub fn total_duration(&self) -> Duration {
        self.cards
            .last()
            .map(|c| c.delay + self.card_duration)
            .unwrap_or(self.burst_duration)
    }
}

/// Compute the timeline for the current seat hands.
pub fn plan_deal(
    seats: &[Seat; SEAT_COUNT],
    layout: &TableLayout,
    timing: &DealTiming,
) -> DealPlan {
    let mut cards: Vec<PlannedCard> = seats
        .iter()
        .flat_map(|seat| {
            seat.hand
                .iter()
                .enumerate()
                .map(move |(card_index, card)| (seat, card_index, *card))
        })
        .map(|(seat, card_index, card)| {
            let order = stagger_order(card_index, seat.index);
            PlannedCard {
                seat_index: seat.index,
                card_index,
                card,
                reveal: seat.is_local_seat(),
                order,
                delay: timing.deal_delay(order),
                end: layout.card_slot(seat.anchor, card_index),
            }
        })
        .collect();
    cards.sort_by_key(|c| c.order);

    DealPlan {
        origin: layout.center(),
        burst: (0..timing.burst_cards)
            .map(|i| layout.burst_point(i, timing.burst_cards, timing.burst_radius))
            .collect(),
        burst_duration: timing.burst_duration(),
        card_duration: timing.card_duration(),
        cards,
    }
}

/// Move one card from `start` to `end` with ease-out, growing and fading in
/// on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTask {
    pub target: CardRef,
    pub start: Point,
    pub end: Point,
    pub start_delay: Duration,
    pub duration: Duration,
    pub reveal_on_land: bool,
}

impl FrameTask for AnimationTask {
    fn step(&mut self, elapsed: Duration, layer: &mut CardLayer) -> TaskStatus {
        let Some(card) = layer.get_mut(self.target) else {
            return TaskStatus::Done;
        };
        let t = progress(elapsed, self.duration);
        if t < 1.0 {
            let eased = ease_out_cubic(t);
            card.set_position(self.start.lerp(self.end, eased));
            card.set_scale(eased);
            card.set_opacity(t);
            return TaskStatus::Running;
        }
        card.set_position(self.end);
        card.set_scale(1.0);
        card.set_opacity(1.0);
        if self.reveal_on_land {
            card.reveal();
        }
        TaskStatus::Done
    }
}

/// Temporary deck card flung outwards while fading, then taken off the
/// surface.
struct BurstTask {
    target: CardRef,
    start: Point,
    end: Point,
    duration: Duration,
}

impl FrameTask for BurstTask {
    fn step(&mut self, elapsed: Duration, layer: &mut CardLayer) -> TaskStatus {
        let Some(card) = layer.get_mut(self.target) else {
            return TaskStatus::Done;
        };
        let t = progress(elapsed, self.duration);
        let eased = ease_out_cubic(t);
        card.set_position(self.start.lerp(self.end, eased));
        card.set_opacity(1.0 - t);
        card.set_scale(1.0 - (1.0 - BURST_END_SCALE) * eased);
        if t < 1.0 {
            return TaskStatus::Running;
        }
        layer.retire(self.target);
        TaskStatus::Done
    }
}

/// Put every card on the surface and queue the burst and deal animations.
///
/// The returned token is a child of the layer's generation token; clearing
/// the layer cancels it along with every queued task.
pub fn schedule_deal(
    seats: &[Seat; SEAT_COUNT],
    layout: &TableLayout,
    timing: &DealTiming,
    layer: &mut CardLayer,
    backend: &mut dyn RenderBackend,
    frames: &mut FrameScheduler,
) -> CancellationToken {
    let plan = plan_deal(seats, layout, timing);
    let deal_token = layer.token().child_token();

    for end in &plan.burst {
        let mut card = backend.create_card(Card::default(), true);
        card.set_position(plan.origin);
        let target = layer.push(card);
        let task = BurstTask {
            target,
            start: plan.origin,
            end: *end,
            duration: plan.burst_duration,
        };
        frames.schedule(Box::new(task), Duration::ZERO, &deal_token);
    }

    for planned in &plan.cards {
        let mut card = backend.create_card(planned.card, true);
        card.set_position(plan.origin);
        card.set_scale(0.0);
        card.set_opacity(0.0);
        let target = layer.push(card);
        let task = AnimationTask {
            target,
            start: plan.origin,
            end: planned.end,
            start_delay: planned.delay,
            duration: plan.card_duration,
            reveal_on_land: planned.reveal,
        };
        frames.schedule(Box::new(task), planned.delay, &deal_token);
    }

    info!(
        generation = layer.generation(),
        cards = plan.cards.len(),
        burst = plan.burst.len(),
        total_ms = plan.total_duration().as_millis() as u64,
        "[DEAL] scheduled"
    );
    deal_token
}

/// Draw every hand at its resting position with no animation.
pub fn render_instant(
    seats: &[Seat; SEAT_COUNT],
    layout: &TableLayout,
    layer: &mut CardLayer,
    backend: &mut dyn RenderBackend,
) {
    for seat in seats {
        for (card_index, card) in seat.hand.iter().enumerate() {
            let mut renderable = backend.create_card(*card, !seat.is_local_seat());
            renderable.set_position(layout.card_slot(seat.anchor, card_index));
            layer.push(renderable);
        }
    }
    debug!(
        generation = layer.generation(),
        cards = layer.len(),
        "[DEAL] rendered instantly"
    );
}
