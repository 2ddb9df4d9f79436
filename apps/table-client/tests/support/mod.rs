#![allow(dead_code)]

pub mod fakes;
pub mod harness;
pub mod logging;

pub use fakes::{CardState, RecordingBackend, RecordingTransport, RecordingUi, UiCall};
pub use harness::{codes, players, Harness};
