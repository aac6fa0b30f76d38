use std::fmt;

use crate::types::request::{CarId, Direction, Floor};

/// Point-in-time copy of one car. Holds no references into the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarStatus {
    pub id: CarId,
    pub current_floor: Floor,
    pub direction: Direction,
    /// Ascending, in the order the car will serve them.
    pub up_stops: Vec<Floor>,
    /// Descending, in the order the car will serve them.
    pub down_stops: Vec<Floor>,
}

impl CarStatus {
    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle
    }

    pub fn pending(&self) -> usize {
        self.up_stops.len() + self.down_stops.len()
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car {}: floor={} dir={} up={:?} down={:?}",
            self.id, self.current_floor, self.direction, self.up_stops, self.down_stops
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResponse {
    Assigned(CarId),
    Accepted,
    Stepped,
    Status(Vec<CarStatus>),
}
