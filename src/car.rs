use log::trace;

use crate::queue::DirectionalQueue;
use crate::types::request::{CarId, Direction, Floor, FloorRequest};
use crate::types::status::CarStatus;

/// One elevator car. `direction` is `Idle` exactly when both queues are
/// empty; every mutation below re-establishes that before returning.
#[derive(Debug)]
pub struct Car {
    id: CarId,
    current_floor: Floor,
    direction: Direction,
    up_stops: DirectionalQueue,
    down_stops: DirectionalQueue,
}

impl Car {
    pub fn new(id: CarId) -> Self {
        Car {
            id,
            current_floor: 0,
            direction: Direction::Idle,
            up_stops: DirectionalQueue::ascending(),
            down_stops: DirectionalQueue::descending(),
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn up_stops(&self) -> &DirectionalQueue {
        &self.up_stops
    }

    pub fn down_stops(&self) -> &DirectionalQueue {
        &self.down_stops
    }

    pub fn has_stops(&self) -> bool {
        !self.up_stops.is_empty() || !self.down_stops.is_empty()
    }

    /// Hall call. Goes to the up queue when the floor is above the car, or
    /// level with it and the caller wants to go up.
    pub fn enqueue_call(&mut self, floor: Floor, direction: Direction) {
        let request = FloorRequest::new(floor, direction);
        if floor > self.current_floor || (floor == self.current_floor && direction == Direction::Up)
        {
            self.up_stops.push(request);
        } else {
            self.down_stops.push(request);
        }
        self.refresh_direction();
    }

    /// In-car selection. Floors on the way up join the up queue; a floor the
    /// car has already passed waits in the down queue for the reversal.
    pub fn enqueue_selection(&mut self, floor: Floor) {
        let request = FloorRequest::new(floor, self.direction);
        let on_way_up = match self.direction {
            Direction::Up => floor >= self.current_floor,
            Direction::Down | Direction::Idle => floor > self.current_floor,
        };
        if on_way_up {
            self.up_stops.push(request);
        } else {
            self.down_stops.push(request);
        }
        self.refresh_direction();
    }

    /// Drop every pending stop and head for `floor`.
    pub fn recall(&mut self, floor: Floor) {
        self.up_stops.clear();
        self.down_stops.clear();
        if floor != self.current_floor {
            self.enqueue_selection(floor);
        }
        self.refresh_direction();
    }

    /// Re-derive the direction from what is left in the queues. Keeps going
    /// the same way while there is work in that direction.
    pub fn refresh_direction(&mut self) {
        let has_up = !self.up_stops.is_empty();
        let has_down = !self.down_stops.is_empty();
        self.direction = match (self.direction, has_up, has_down) {
            (_, false, false) => Direction::Idle,
            (Direction::Up, false, true) => Direction::Down,
            (Direction::Down, true, false) => Direction::Up,
            (Direction::Idle, true, _) => Direction::Up,
            (Direction::Idle, false, true) => Direction::Down,
            (dir, _, _) => dir,
        };
    }

    /// Head of the queue for the current direction, flipping (or leaving
    /// idle) when that queue is empty.
    fn active_target(&mut self) -> Option<Floor> {
        match self.direction {
            Direction::Up => {
                if let Some(floor) = self.up_stops.peek_floor() {
                    return Some(floor);
                }
                self.direction = Direction::Down;
                self.down_stops.peek_floor()
            }
            Direction::Down => {
                if let Some(floor) = self.down_stops.peek_floor() {
                    return Some(floor);
                }
                self.direction = Direction::Up;
                self.up_stops.peek_floor()
            }
            Direction::Idle => {
                if let Some(floor) = self.up_stops.peek_floor() {
                    self.direction = Direction::Up;
                    Some(floor)
                } else if let Some(floor) = self.down_stops.peek_floor() {
                    self.direction = Direction::Down;
                    Some(floor)
                } else {
                    None
                }
            }
        }
    }

    fn service_stop(&mut self) {
        let queue = match self.direction {
            Direction::Up => &mut self.up_stops,
            Direction::Down => &mut self.down_stops,
            Direction::Idle => unreachable!("car {} serviced a stop while idle", self.id),
        };
        match queue.pop() {
            Ok(request) => trace!(
                "car {} serviced floor {} ({})",
                self.id, request.floor, request.direction
            ),
            Err(err) => unreachable!("car {} lost its active target: {err}", self.id),
        }
        self.refresh_direction();
    }

    /// One tick: service stops at the current floor, then travel one floor
    /// toward the next target and service it on arrival. A tick ends early
    /// when an in-place stop turns the car around or leaves it idle.
    pub fn advance(&mut self) {
        let target = loop {
            let Some(target) = self.active_target() else {
                self.direction = Direction::Idle;
                return;
            };
            if target != self.current_floor {
                break target;
            }
            let serving = self.direction;
            self.service_stop();
            if self.direction != serving {
                return;
            }
        };

        if target > self.current_floor {
            self.current_floor += 1;
        } else {
            self.current_floor -= 1;
        }
        trace!(
            "car {} moved {} to floor {} (target {target})",
            self.id, self.direction, self.current_floor
        );

        if self.current_floor == target {
            self.service_stop();
        }
    }

    pub fn status(&self) -> CarStatus {
        CarStatus {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            up_stops: self.up_stops.floors(),
            down_stops: self.down_stops.floors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_at(floor: Floor) -> Car {
        let mut car = Car::new(1);
        car.current_floor = floor;
        car
    }

    fn assert_idle_invariant(car: &Car) {
        assert_eq!(car.direction == Direction::Idle, !car.has_stops(), "{car:?}");
    }

    #[test]
    fn test_new_car_is_idle_at_ground() {
        let car = Car::new(4);
        assert_eq!(car.id(), 4);
        assert_eq!(car.current_floor(), 0);
        assert_eq!(car.direction(), Direction::Idle);
        assert!(!car.has_stops());
    }

    #[test]
    fn test_call_routing() {
        let mut car = car_at(4);
        car.enqueue_call(6, Direction::Down);
        car.enqueue_call(4, Direction::Up);
        car.enqueue_call(4, Direction::Down);
        car.enqueue_call(1, Direction::Up);
        assert_eq!(car.up_stops().floors(), vec![4, 6]);
        assert_eq!(car.down_stops().floors(), vec![4, 1]);
        assert_eq!(car.direction(), Direction::Up);
        assert_eq!(car.up_stops().peek().unwrap().direction, Direction::Up);
    }

    #[test]
    fn test_selection_routing_follows_travel_direction() {
        let mut car = car_at(3);
        car.enqueue_selection(7);
        assert_eq!(car.direction(), Direction::Up);
        car.enqueue_selection(3);
        car.enqueue_selection(1);
        assert_eq!(car.up_stops().floors(), vec![3, 7]);
        assert_eq!(car.down_stops().floors(), vec![1]);

        let mut car = car_at(5);
        car.enqueue_selection(2);
        assert_eq!(car.direction(), Direction::Down);
        car.enqueue_selection(5);
        car.enqueue_selection(8);
        assert_eq!(car.down_stops().floors(), vec![5, 2]);
        assert_eq!(car.up_stops().floors(), vec![8]);
        assert_eq!(car.down_stops().peek().unwrap().direction, Direction::Down);
    }

    #[test]
    fn test_refresh_direction_keeps_course_while_work_remains() {
        let mut car = car_at(5);
        car.enqueue_selection(8);
        car.enqueue_selection(2);
        assert_eq!(car.direction(), Direction::Up);
        car.up_stops.clear();
        car.refresh_direction();
        assert_eq!(car.direction(), Direction::Down);
        car.down_stops.clear();
        car.refresh_direction();
        assert_eq!(car.direction(), Direction::Idle);
    }

    #[test]
    fn test_advance_moves_one_floor_and_services_on_arrival() {
        let mut car = car_at(0);
        car.enqueue_selection(2);
        car.advance();
        assert_eq!(car.current_floor(), 1);
        assert_eq!(car.direction(), Direction::Up);
        car.advance();
        assert_eq!(car.current_floor(), 2);
        assert_eq!(car.direction(), Direction::Idle);
        car.advance();
        assert_eq!(car.current_floor(), 2);
        assert_idle_invariant(&car);
    }

    #[test]
    fn test_stop_at_current_floor_does_not_cost_a_tick() {
        let mut car = car_at(0);
        car.enqueue_call(0, Direction::Up);
        car.enqueue_selection(3);
        car.advance();
        assert_eq!(car.current_floor(), 1);
        assert_eq!(car.up_stops().floors(), vec![3]);
    }

    #[test]
    fn test_reversal_serves_passed_floor_on_the_way_down() {
        let mut car = car_at(0);
        car.enqueue_selection(5);
        for _ in 0..3 {
            car.advance();
        }
        assert_eq!(car.current_floor(), 3);
        car.enqueue_selection(2);
        assert_eq!(car.down_stops().floors(), vec![2]);

        let mut floors = Vec::new();
        while car.has_stops() {
            car.advance();
            floors.push(car.current_floor());
            assert_idle_invariant(&car);
        }
        assert_eq!(floors, vec![4, 5, 4, 3, 2]);
        assert_eq!(car.direction(), Direction::Idle);
    }

    #[test]
    fn test_turnaround_at_current_floor_ends_the_tick() {
        let mut car = car_at(0);
        car.enqueue_call(0, Direction::Down);
        car.enqueue_call(0, Direction::Up);
        car.enqueue_selection(4);
        assert_eq!(car.direction(), Direction::Down);
        assert_eq!(car.up_stops().floors(), vec![0, 4]);
        assert_eq!(car.down_stops().floors(), vec![0]);

        car.advance();
        assert_eq!(car.current_floor(), 0);
        assert_eq!(car.direction(), Direction::Up);
        assert_eq!(car.up_stops().floors(), vec![0, 4]);
        assert!(car.down_stops().is_empty());

        car.advance();
        assert_eq!(car.current_floor(), 1);
        assert_eq!(car.up_stops().floors(), vec![4]);
    }

    #[test]
    fn test_duplicate_stops_are_both_serviced() {
        let mut car = car_at(0);
        car.enqueue_selection(2);
        car.enqueue_call(2, Direction::Up);
        car.advance();
        car.advance();
        assert_eq!(car.current_floor(), 2);
        assert_eq!(car.up_stops().len(), 1);
        car.advance();
        assert_eq!(car.current_floor(), 2);
        assert!(!car.has_stops());
        assert_idle_invariant(&car);
    }

    #[test]
    fn test_recall() {
        let mut car = car_at(6);
        car.enqueue_selection(9);
        car.enqueue_selection(1);
        car.recall(0);
        assert!(car.up_stops().is_empty());
        assert_eq!(car.down_stops().floors(), vec![0]);
        assert_eq!(car.direction(), Direction::Down);

        let mut car = car_at(0);
        car.enqueue_selection(4);
        car.recall(0);
        assert!(!car.has_stops());
        assert_eq!(car.direction(), Direction::Idle);
    }

    #[test]
    fn test_status_is_a_copy() {
        let mut car = car_at(2);
        car.enqueue_selection(5);
        car.enqueue_selection(0);
        let status = car.status();
        car.advance();
        assert_eq!(status.current_floor, 2);
        assert_eq!(status.up_stops, vec![5]);
        assert_eq!(status.down_stops, vec![0]);
        assert_eq!(car.current_floor(), 3);
    }
}
