//! Overlay and chrome operations the engine drives.

use crate::domain::{CardKey, Phase};

pub const WAITING_FOR_PASS: &str = "Waiting for other players to pass...";

pub trait TableUi {
    /// Lobby text plus the names gathered so far.
    fn show_lobby(&mut self, names: &[String], max_players: usize);
    fn hide_lobby(&mut self);
    fn show_controls(&mut self);
    /// Also hides the pass button.
    fn hide_controls(&mut self);
    fn update_phase(&mut self, phase: &Phase);
    fn show_pass_button(&mut self);
    fn set_pass_button_enabled(&mut self, enabled: bool);
    fn hide_pass_button(&mut self);
    fn show_waiting_overlay(&mut self, message: &str);
    fn hide_waiting_overlay(&mut self);
    /// Keys of the local cards currently picked for the pass.
    fn highlight_selection(&mut self, keys: &[CardKey]);
    /// Server error text, shown as received.
    fn show_error(&mut self, message: &str);
}

pub fn lobby_status(count: usize, max_players: usize) -> String {
    if count < max_players {
        format!("Waiting for players... {count}/{max_players}")
    } else {
        "All players connected. Starting game...".to_string()
    }
}

pub fn lobby_lines(names: &[String]) -> Vec<String> {
    if names.is_empty() {
        return vec!["No players joined yet".to_string()];
    }
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect()
}

pub fn phase_title(phase: &Phase) -> String {
    match phase {
        Phase::Passing | Phase::AwaitingPassAck => "Hearts - Passing Phase".to_string(),
        Phase::Playing => "Hearts - Playing Phase".to_string(),
        Phase::Ready => "Hearts - Game Started".to_string(),
        other => format!("Hearts - {other}"),
    }
}
