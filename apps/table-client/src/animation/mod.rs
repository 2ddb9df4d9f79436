//! Frame-driven card animation.

pub mod deal;
pub mod easing;
pub mod scheduler;

pub use deal::{plan_deal, render_instant, schedule_deal, stagger_order, AnimationTask, DealPlan};
pub use scheduler::{FrameScheduler, FrameTask, TaskStatus};
