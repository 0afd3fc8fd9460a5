//! Core keepsake library: the page-sequencing and reveal-timing engine.
//!
//! Everything here runs on a virtual clock and never blocks; the TUI and the
//! rehearsal driver decide how that clock maps to wall time.

pub mod ambient;
pub mod config;
pub mod gesture;
pub mod interrupt;
pub mod latch;
pub mod pages;
pub mod rehearsal;
pub mod reveal;
pub mod script;
pub mod sequence;
pub mod session;
pub mod timer;
pub mod timing;
pub mod typewriter;
