//! Multi-car elevator dispatch simulator.
//!
//! A [`DispatchService`] owns a fleet of cars. Hall calls are assigned to the
//! car with the best [`AssignmentStrategy`] score, in-car selections are added
//! to a car's up or down queue, and each [`Dispatcher::step`] moves every car
//! at most one floor toward its next stop.

pub mod car;
pub mod config;
pub mod error;
pub mod queue;
pub mod strategy;

pub mod strategies {
    pub mod nearest_car;
}

pub mod services {
    pub mod dispatch;
    pub mod ticker;
    pub mod validation;
}

pub mod types {
    pub mod request;
    pub mod status;
}

pub use config::DispatchConfig;
pub use error::{DispatchError, EmptyQueueError};
pub use services::dispatch::{DispatchService, Dispatcher};
pub use services::ticker::Ticker;
pub use services::validation::FloorValidation;
pub use strategy::AssignmentStrategy;
pub use types::request::{CarId, Direction, DispatchRequest, Floor, FloorRequest};
pub use types::status::{CarStatus, DispatchResponse};
