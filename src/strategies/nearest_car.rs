use crate::car::Car;
use crate::strategy::AssignmentStrategy;
use crate::types::request::{Direction, Floor};

/// Nearest car, with a `num_floors` penalty for any car that would have to
/// reverse to reach the caller. The penalty outweighs every plain distance,
/// so a car already heading toward the floor always wins over one that is
/// not.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCar;

impl AssignmentStrategy for NearestCar {
    fn score(&self, car: &Car, floor: Floor, _direction: Direction, num_floors: Floor) -> u64 {
        let current = car.current_floor();
        let distance = u64::from(current.abs_diff(floor));
        let on_the_way = match car.direction() {
            Direction::Idle => true,
            Direction::Up => floor >= current,
            Direction::Down => floor <= current,
        };
        if on_the_way {
            distance
        } else {
            distance + u64::from(num_floors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_car(from: Floor, to: Floor) -> Car {
        let mut car = Car::new(1);
        if from > 0 {
            car.enqueue_selection(from);
            while car.has_stops() {
                car.advance();
            }
        }
        if to != from {
            car.enqueue_selection(to);
        }
        car
    }

    #[test]
    fn test_idle_car_scores_plain_distance() {
        let car = moving_car(6, 6);
        assert_eq!(car.direction(), Direction::Idle);
        assert_eq!(NearestCar.score(&car, 2, Direction::Up, 10), 4);
        assert_eq!(NearestCar.score(&car, 9, Direction::Down, 10), 3);
    }

    #[test]
    fn test_same_direction_car_scores_plain_distance() {
        let up = moving_car(3, 8);
        assert_eq!(up.direction(), Direction::Up);
        assert_eq!(NearestCar.score(&up, 5, Direction::Up, 10), 2);
        assert_eq!(NearestCar.score(&up, 3, Direction::Down, 10), 0);

        let down = moving_car(7, 1);
        assert_eq!(down.direction(), Direction::Down);
        assert_eq!(NearestCar.score(&down, 4, Direction::Down, 10), 3);
    }

    #[test]
    fn test_reversing_car_pays_penalty() {
        let up = moving_car(3, 8);
        assert_eq!(NearestCar.score(&up, 2, Direction::Down, 10), 11);

        let down = moving_car(7, 1);
        assert_eq!(NearestCar.score(&down, 9, Direction::Up, 10), 12);
    }
}
