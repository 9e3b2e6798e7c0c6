//! Analytics aggregation
//!
//! Pure folds over flattened attendance records. No network or timer
//! interaction happens here; the service layer fetches, this module
//! summarizes, the view layer renders.

pub mod aggregator;

pub use aggregator::{aggregate, event_summary};
