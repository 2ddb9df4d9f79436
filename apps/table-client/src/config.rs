//! Client configuration: defaults, environment overlay and JSON files.

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::FULL_HAND;
use crate::error::ClientError;
use crate::render::TableLayout;

/// Timing of the shuffle burst and the deal that follows it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DealTiming {
    /// Temporary face-down cards thrown out of the deck.
    pub burst_cards: usize,
    pub burst_ms: u64,
    pub burst_radius: f32,
    /// Flight time of one dealt card.
    pub card_ms: u64,
    /// Delay added per stagger step.
    pub stagger_ms: u64,
}

impl Default for DealTiming {
    fn default() -> Self {
        Self {
            burst_cards: 8,
            burst_ms: 450,
            burst_radius: 120.0,
            card_ms: 400,
            stagger_ms: 35,
        }
    }
}

impl DealTiming {
    pub fn burst_duration(&self) -> Duration {
        Duration::from_millis(self.burst_ms)
    }

    pub fn card_duration(&self) -> Duration {
        Duration::from_millis(self.card_ms)
    }

    /// Start delay of the card with stagger order `order`. The whole burst
    /// is always included so no card leaves the deck mid-shuffle.
    pub fn deal_delay(&self, order: usize) -> Duration {
        self.burst_duration() + Duration::from_millis(self.stagger_ms * order as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Opponent hand size assumed when the server sends no count.
    pub full_hand: usize,
    pub frame_ms: u64,
    pub layout: TableLayout,
    pub deal: DealTiming,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            full_hand: FULL_HAND,
            frame_ms: 16,
            layout: TableLayout::default(),
            deal: DealTiming::default(),
            log_filter: "info".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, ClientError> {
    raw.trim().parse::<T>().map_err(|_| {
        ClientError::config(format!("{name} must be a valid number, got '{raw}'"))
    })
}

/// Shortest usable frame step; a zero step never moves the clock.
pub const MIN_FRAME: Duration = Duration::from_millis(1);

impl ClientConfig {
    /// Defaults overlaid with `TABLE_*`, `DEAL_*` and `SHUFFLE_*` variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::default().overlay(|name| env::var(name).ok())
    }

    /// Load a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ClientError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| ClientError::config(format!("invalid config {}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("TABLE_WIDTH") {
            self.layout.width = parse_var("TABLE_WIDTH", &raw)?;
        }
        if let Some(raw) = lookup("TABLE_HEIGHT") {
            self.layout.height = parse_var("TABLE_HEIGHT", &raw)?;
        }
        if let Some(raw) = lookup("TABLE_FRAME_MS") {
            self.frame_ms = parse_var("TABLE_FRAME_MS", &raw)?;
        }
        if let Some(raw) = lookup("DEAL_CARD_MS") {
            self.deal.card_ms = parse_var("DEAL_CARD_MS", &raw)?;
        }
        if let Some(raw) = lookup("DEAL_STAGGER_MS") {
            self.deal.stagger_ms = parse_var("DEAL_STAGGER_MS", &raw)?;
        }
        if let Some(raw) = lookup("SHUFFLE_BURST_MS") {
            self.deal.burst_ms = parse_var("SHUFFLE_BURST_MS", &raw)?;
        }
        if let Some(raw) = lookup("SHUFFLE_BURST_CARDS") {
            self.deal.burst_cards = parse_var("SHUFFLE_BURST_CARDS", &raw)?;
        }
        if let Some(raw) = lookup("TABLE_LOG") {
            self.log_filter = raw;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings the frame loop and layout cannot run with.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.frame_ms == 0 {
            return Err(ClientError::config("frame_ms must be greater than 0"));
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.layout.width) || !positive(self.layout.height) {
            return Err(ClientError::config("table dimensions must be positive"));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
