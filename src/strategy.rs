use crate::car::Car;
use crate::types::request::{Direction, Floor};

/// Scores how well a car fits a hall call. Lower is better; the dispatcher
/// picks the lowest score and breaks ties on the lowest car id.
pub trait AssignmentStrategy: Send + Sync + 'static {
    fn score(&self, car: &Car, floor: Floor, direction: Direction, num_floors: Floor) -> u64;
}
