//! Repository module
//!
//! This module contains all database repository implementations

pub mod organizer;
pub mod event;
pub mod venue;
pub mod attendance;

pub use organizer::OrganizerRepository;
pub use event::EventRepository;
pub use venue::VenueRepository;
pub use attendance::AttendanceRepository;
