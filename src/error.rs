use std::fmt;

use crate::types::request::{CarId, Floor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    InvalidFloor { floor: Floor, num_floors: Floor },
    UnknownCar(CarId),
    /// Hall calls must ask for `Up` or `Down`.
    InvalidDirection,
    InvalidConfig(&'static str),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidFloor { floor, num_floors } => {
                write!(f, "floor {floor} is outside 0..{num_floors}")
            }
            DispatchError::UnknownCar(id) => write!(f, "unknown car {id}"),
            DispatchError::InvalidDirection => write!(f, "hall call must be UP or DOWN"),
            DispatchError::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for DispatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQueueError;

impl fmt::Display for EmptyQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "directional queue is empty")
    }
}

impl std::error::Error for EmptyQueueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DispatchError::InvalidFloor {
            floor: 12,
            num_floors: 10,
        };
        assert_eq!(err.to_string(), "floor 12 is outside 0..10");
        assert_eq!(DispatchError::UnknownCar(999).to_string(), "unknown car 999");
        assert_eq!(EmptyQueueError.to_string(), "directional queue is empty");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = DispatchError::UnknownCar(3).into();
        assert!(err.downcast_ref::<DispatchError>().is_some());
    }
}
