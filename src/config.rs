use std::time::Duration;

use crate::error::DispatchError;
use crate::types::request::Floor;

pub const DEFAULT_NUM_CARS: usize = 3;
pub const DEFAULT_NUM_FLOORS: Floor = 10;
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub num_cars: usize,
    pub num_floors: Floor,
    /// Period of the stepping driver.
    pub tick: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            num_cars: DEFAULT_NUM_CARS,
            num_floors: DEFAULT_NUM_FLOORS,
            tick: DEFAULT_TICK,
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.num_cars == 0 {
            return Err(DispatchError::InvalidConfig("at least one car is required"));
        }
        if self.num_floors == 0 {
            return Err(DispatchError::InvalidConfig("at least one floor is required"));
        }
        if self.tick.is_zero() {
            return Err(DispatchError::InvalidConfig("tick period must be non-zero"));
        }
        Ok(())
    }
}
