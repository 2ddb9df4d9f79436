//! Deterministic cancellable task scheduler.
//!
//! Time only moves when `advance` is called with a new frame timestamp.
//! Every task carries a `CancellationToken`; the token is checked before each
//! step, so a cancelled task never writes to a card again even though it is
//! still queued until the next frame drops it.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::render::CardLayer;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Done,
}

/// One per-frame animation step function.
pub trait FrameTask {
    /// `elapsed` is measured from the task's start time.
    fn step(&mut self, elapsed: Duration, layer: &mut CardLayer) -> TaskStatus;
}

struct Scheduled {
    start_at: Duration,
    token: CancellationToken,
    task: Box<dyn FrameTask>,
}

#[derive(Default)]
pub struct FrameScheduler {
    now: Duration,
    tasks: Vec<Scheduled>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `task` to start `delay` after the current frame. The returned
    /// token is a child of `parent`; cancelling either stops the task.
    pub fn schedule(
        &mut self,
        task: Box<dyn FrameTask>,
        delay: Duration,
        parent: &CancellationToken,
    ) -> CancellationToken {
        let token = parent.child_token();
        self.tasks.push(Scheduled {
            start_at: self.now + delay,
            token: token.clone(),
            task,
        });
        token
    }

    /// Run every due task for the frame at `now`.
    pub fn advance(&mut self, now: Duration, layer: &mut CardLayer) {
        self.now = self.now.max(now);
        let now = self.now;
        let before = self.tasks.len();
        self.tasks.retain_mut(|scheduled| {
            if scheduled.token.is_cancelled() {
                return false;
            }
            if now < scheduled.start_at {
                return true;
            }
            scheduled.task.step(now - scheduled.start_at, layer) == TaskStatus::Running
        });
        if before != self.tasks.len() {
            trace!(
                finished = before - self.tasks.len(),
                remaining = self.tasks.len(),
                "[FRAMES] tasks retired"
            );
        }
    }

    /// Cancel and drop everything queued.
    pub fn cancel_all(&mut self) {
        for scheduled in self.tasks.drain(..) {
            scheduled.token.cancel();
        }
    }

    /// Queued tasks whose token is still live.
    pub fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|s| !s.token.is_cancelled())
            .count()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}
