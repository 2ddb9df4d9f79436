//! Turn/phase state machine.
//!
//! `waiting → lobby → ready → <server phases>`. Only `passing` and `playing`
//! are interpreted; any other server phase is carried verbatim as
//! `Phase::Other`. `AwaitingPassAck` is local-only and is left through a
//! pass-complete event or a server phase other than `passing`.

use std::fmt;

use tracing::{debug, info};

/// Client-side game phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the local player has entered a name.
    Waiting,
    /// Name entered, fewer than four players present.
    Lobby,
    /// Table rendered, no server phase applied yet.
    Ready,
    Passing,
    /// Pass submitted, waiting for the server to finish the exchange.
    AwaitingPassAck,
    Playing,
    /// Server phase this client does not interpret (scoring, finished, ...).
    Other(String),
}

impl Phase {
    /// Interpret a phase string sent by the server.
    pub fn from_server(raw: &str) -> Self {
        match raw {
            "passing" => Phase::Passing,
            "playing" => Phase::Playing,
            other => Phase::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Lobby => "lobby",
            Phase::Ready => "ready",
            Phase::Passing => "passing",
            Phase::AwaitingPassAck => "awaiting-pass-ack",
            Phase::Playing => "playing",
            Phase::Other(raw) => raw,
        }
    }

    /// Both halves of the pass sub-protocol.
    pub fn is_pass_phase(&self) -> bool {
        matches!(self, Phase::Passing | Phase::AwaitingPassAck)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
}

impl PhaseTransition {
    pub fn entered_passing(&self) -> bool {
        self.to == Phase::Passing && !self.from.is_pass_phase()
    }

    pub fn left_passing(&self) -> bool {
        self.from.is_pass_phase() && !self.to.is_pass_phase()
    }
}

#[derive(Debug)]
pub struct PhaseController {
    phase: Phase,
    server_phase: Option<String>,
    ready_fired: bool,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            server_phase: None,
            ready_fired: false,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Latest phase string from the server, stored even before ready.
    pub fn server_phase(&self) -> Option<&str> {
        self.server_phase.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready_fired
    }

    fn move_to(&mut self, to: Phase) -> PhaseTransition {
        let from = std::mem::replace(&mut self.phase, to.clone());
        info!(from = %from, to = %to, "[PHASE] transition");
        PhaseTransition { from, to }
    }

    /// Local name submitted.
    pub fn enter_lobby(&mut self) -> Option<PhaseTransition> {
        (self.phase == Phase::Waiting).then(|| self.move_to(Phase::Lobby))
    }

    /// Roster reached four players. Fires once per controller.
    pub fn mark_ready(&mut self) -> Option<PhaseTransition> {
        if self.ready_fired || self.phase != Phase::Lobby {
            return None;
        }
        self.ready_fired = true;
        Some(self.move_to(Phase::Ready))
    }

    /// Apply the phase carried by a snapshot.
    pub fn apply_server_phase(&mut self, raw: Option<&str>) -> Option<PhaseTransition> {
        let raw = raw?;
        self.server_phase = Some(raw.to_string());
        if !self.ready_fired {
            debug!(server_phase = raw, "[PHASE] stored before ready");
            return None;
        }

        let target = Phase::from_server(raw);
        if self.phase == Phase::AwaitingPassAck && target == Phase::Passing {
            return None;
        }
        if target == self.phase {
            return None;
        }
        Some(self.move_to(target))
    }

    /// Local pass submitted.
    pub fn begin_pass_ack(&mut self) -> Option<PhaseTransition> {
        (self.phase == Phase::Passing).then(|| self.move_to(Phase::AwaitingPassAck))
    }

    /// Server finished the pass exchange. Without an explicit phase the
    /// table moves on to `playing`.
    pub fn complete_pass(&mut self, raw: Option<&str>) -> Option<PhaseTransition> {
        if !self.ready_fired {
            if let Some(raw) = raw {
                self.server_phase = Some(raw.to_string());
            }
            return None;
        }
        let target = raw.map(Phase::from_server).unwrap_or(Phase::Playing);
        if let Some(raw) = raw {
            self.server_phase = Some(raw.to_string());
        }
        if target == self.phase {
            return None;
        }
        Some(self.move_to(target))
    }

    /// Game reset: back to the freshly rendered table.
    pub fn reset(&mut self) -> Option<PhaseTransition> {
        self.server_phase = None;
        (self.ready_fired && self.phase != Phase::Ready).then(|| self.move_to(Phase::Ready))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_controller() -> PhaseController {
        let mut pc = PhaseController::new();
        pc.enter_lobby();
        pc.mark_ready();
        pc
    }

    #[test]
    fn ready_fires_once() {
        let mut pc = PhaseController::new();
        assert!(pc.mark_ready().is_none(), "not in lobby yet");
        assert!(pc.enter_lobby().is_some());
        let t = pc.mark_ready().unwrap();
        assert_eq!((t.from, t.to), (Phase::Lobby, Phase::Ready));
        assert!(pc.mark_ready().is_none());
        assert!(pc.enter_lobby().is_none());
    }

    #[test]
    fn server_phase_stored_but_not_applied_before_ready() {
        let mut pc = PhaseController::new();
        pc.enter_lobby();
        assert!(pc.apply_server_phase(Some("passing")).is_none());
        assert_eq!(pc.phase(), &Phase::Lobby);
        assert_eq!(pc.server_phase(), Some("passing"));
    }

    #[test]
    fn unknown_phase_passes_through() {
        let mut pc = ready_controller();
        let t = pc.apply_server_phase(Some("scoring")).unwrap();
        assert_eq!(t.to, Phase::Other("scoring".into()));
        assert_eq!(pc.phase().as_str(), "scoring");
    }

    #[test]
    fn awaiting_ack_survives_passing_snapshots() {
        let mut pc = ready_controller();
        assert!(pc.apply_server_phase(Some("passing")).unwrap().entered_passing());
        pc.begin_pass_ack().unwrap();
        assert!(pc.apply_server_phase(Some("passing")).is_none());
        assert_eq!(pc.phase(), &Phase::AwaitingPassAck);
    }

    #[test]
    fn server_override_leaves_awaiting_ack() {
        let mut pc = ready_controller();
        pc.apply_server_phase(Some("passing"));
        pc.begin_pass_ack();
        let t = pc.apply_server_phase(Some("playing")).unwrap();
        assert!(t.left_passing());
        assert_eq!(pc.phase(), &Phase::Playing);
    }

    #[test]
    fn pass_complete_defaults_to_playing() {
        let mut pc = ready_controller();
        pc.apply_server_phase(Some("passing"));
        pc.begin_pass_ack();
        let t = pc.complete_pass(None).unwrap();
        assert!(t.left_passing());
        assert_eq!(t.to, Phase::Playing);
    }

    #[test]
    fn begin_pass_ack_requires_passing() {
        let mut pc = ready_controller();
        assert!(pc.begin_pass_ack().is_none());
        pc.apply_server_phase(Some("playing"));
        assert!(pc.begin_pass_ack().is_none());
    }

    #[test]
    fn missing_phase_keeps_current() {
        let mut pc = ready_controller();
        pc.apply_server_phase(Some("playing"));
        assert!(pc.apply_server_phase(None).is_none());
        assert_eq!(pc.phase(), &Phase::Playing);
    }

    #[test]
    fn reset_returns_to_ready() {
        let mut pc = ready_controller();
        pc.apply_server_phase(Some("playing"));
        assert_eq!(pc.reset().unwrap().to, Phase::Ready);
        assert_eq!(pc.server_phase(), None);
        assert!(pc.is_ready());
    }
}
