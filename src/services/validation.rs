use log::warn;
use tower::BoxError;
use tower::filter::Predicate;

use crate::error::DispatchError;
use crate::types::request::{DispatchRequest, Floor};

/// Rejects requests for floors outside the building before they reach the
/// dispatcher. Use with `ServiceBuilder::filter`.
#[derive(Debug, Clone, Copy)]
pub struct FloorValidation {
    num_floors: Floor,
}

impl FloorValidation {
    pub fn new(num_floors: Floor) -> Self {
        FloorValidation { num_floors }
    }
}

impl Predicate<DispatchRequest> for FloorValidation {
    type Request = DispatchRequest;

    fn check(&mut self, request: DispatchRequest) -> Result<Self::Request, BoxError> {
        match request.floor() {
            Some(floor) if floor >= self.num_floors => {
                warn!("invalid request: {request:?}");
                Err(Box::new(DispatchError::InvalidFloor {
                    floor,
                    num_floors: self.num_floors,
                }))
            }
            _ => Ok(request),
        }
    }
}
