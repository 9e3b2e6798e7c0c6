//! Event lifecycle engine
//!
//! Derives event status from wall-clock time, reconciles stored status
//! against the derived one, and arms one-shot transition timers. A
//! periodic fallback pass (driven by the binary) bounds the staleness of
//! any missed timer.

pub mod clock;
pub mod engine;
pub mod scheduler;

pub use clock::{Clock, SystemClock};
pub use engine::{derive_status, EventStore, LifecycleEngine, LifecycleEvent, StatusChange};
pub use scheduler::{TransitionPhase, TransitionScheduler};
