//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, OrganizerRepository, EventRepository, VenueRepository, AttendanceRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub organizers: OrganizerRepository,
    pub events: EventRepository,
    pub venues: VenueRepository,
    pub attendance: AttendanceRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            organizers: OrganizerRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            venues: VenueRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool),
        }
    }
}
