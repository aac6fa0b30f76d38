use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::Mutex;
use tower::Service;

use crate::car::Car;
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::strategies::nearest_car::NearestCar;
use crate::strategy::AssignmentStrategy;
use crate::types::request::{CarId, Direction, DispatchRequest, Floor};
use crate::types::status::{CarStatus, DispatchResponse};

const RECALL_FLOOR: Floor = 0;

/// The operations a driver needs from an elevator bank.
#[async_trait]
pub trait Dispatcher: Send + Sync + 'static {
    /// Assign a hall call to the best car and return its id.
    async fn call_elevator(&self, floor: Floor, direction: Direction)
    -> Result<CarId, DispatchError>;

    /// Add an in-car destination.
    async fn select_floor(&self, car: CarId, floor: Floor) -> Result<(), DispatchError>;

    /// Advance every car by one tick.
    async fn step(&self);

    /// Snapshot of every car, ordered by id.
    async fn status(&self) -> Vec<CarStatus>;

    /// Cancel all pending stops and send every car to the ground floor.
    async fn emergency_recall(&self);
}

#[derive(Debug)]
struct Fleet {
    cars: BTreeMap<CarId, Car>,
}

fn check_floor(floor: Floor, num_floors: Floor) -> Result<(), DispatchError> {
    if floor < num_floors {
        Ok(())
    } else {
        warn!("rejected floor {floor}, building has {num_floors} floors");
        Err(DispatchError::InvalidFloor { floor, num_floors })
    }
}

/// Fleet of cars behind a single lock. Clones share the same fleet, and every
/// operation holds the lock from start to finish, so operations are totally
/// ordered and snapshots are never torn.
#[derive(Debug, Clone)]
pub struct DispatchService<ST = NearestCar> {
    fleet: Arc<Mutex<Fleet>>,
    num_floors: Floor,
    strategy: ST,
}

impl DispatchService<NearestCar> {
    /// Cars get ids `1..=num_cars` and start idle on floor 0.
    ///
    /// Panics if either argument is zero; use [`DispatchService::from_config`]
    /// for a checked constructor.
    pub fn new(num_cars: usize, num_floors: Floor) -> Self {
        Self::with_strategy(num_cars, num_floors, NearestCar)
    }

    pub fn from_config(config: &DispatchConfig) -> Result<Self, DispatchError> {
        config.validate()?;
        Ok(Self::new(config.num_cars, config.num_floors))
    }
}

impl<ST> DispatchService<ST>
where
    ST: AssignmentStrategy + Clone,
{
    pub fn with_strategy(num_cars: usize, num_floors: Floor, strategy: ST) -> Self {
        assert!(num_cars > 0, "a dispatch service needs at least one car");
        assert!(num_floors > 0, "a dispatch service needs at least one floor");

        let cars = (1..=num_cars).map(|id| (id, Car::new(id))).collect();
        info!("dispatch service started with {num_cars} cars over {num_floors} floors");
        DispatchService {
            fleet: Arc::new(Mutex::new(Fleet { cars })),
            num_floors,
            strategy,
        }
    }

    pub fn num_floors(&self) -> Floor {
        self.num_floors
    }
}

#[async_trait]
impl<ST> Dispatcher for DispatchService<ST>
where
    ST: AssignmentStrategy + Clone,
{
    async fn call_elevator(
        &self,
        floor: Floor,
        direction: Direction,
    ) -> Result<CarId, DispatchError> {
        if direction == Direction::Idle {
            warn!("rejected hall call at floor {floor} without a direction");
            return Err(DispatchError::InvalidDirection);
        }

        let mut guard = self.fleet.lock().await;
        let fleet = &mut *guard;
        let num_floors = self.num_floors;
        check_floor(floor, num_floors)?;

        // min_by_key keeps the first minimum, and the map iterates by id.
        let Some((score, car)) = fleet
            .cars
            .values_mut()
            .map(|car| {
                let score = self.strategy.score(car, floor, direction, num_floors);
                (score, car)
            })
            .min_by_key(|(score, _)| *score)
        else {
            unreachable!("dispatch service has no cars");
        };

        car.enqueue_call(floor, direction);
        debug!(
            "hall call at floor {floor} ({direction}) assigned to car {} with score {score}",
            car.id()
        );
        Ok(car.id())
    }

    async fn select_floor(&self, car_id: CarId, floor: Floor) -> Result<(), DispatchError> {
        let mut guard = self.fleet.lock().await;
        let fleet = &mut *guard;
        let Some(car) = fleet.cars.get_mut(&car_id) else {
            warn!("rejected selection of floor {floor} for unknown car {car_id}");
            return Err(DispatchError::UnknownCar(car_id));
        };
        check_floor(floor, self.num_floors)?;

        car.enqueue_selection(floor);
        debug!(
            "car {car_id} selected floor {floor}, now heading {}",
            car.direction()
        );
        Ok(())
    }

    async fn step(&self) {
        let mut fleet = self.fleet.lock().await;
        for car in fleet.cars.values_mut() {
            car.advance();
        }
    }

    async fn status(&self) -> Vec<CarStatus> {
        let fleet = self.fleet.lock().await;
        fleet.cars.values().map(Car::status).collect()
    }

    async fn emergency_recall(&self) {
        let mut fleet = self.fleet.lock().await;
        info!("emergency recall: sending all cars to floor {RECALL_FLOOR}");
        for car in fleet.cars.values_mut() {
            car.recall(RECALL_FLOOR);
        }
    }
}

impl<ST> Service<DispatchRequest> for DispatchService<ST>
where
    ST: AssignmentStrategy + Clone,
{
    type Response = DispatchResponse;
    type Error = DispatchError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: DispatchRequest) -> Self::Future {
        let svc = self.clone();

        Box::pin(async move {
            match request {
                DispatchRequest::Call { floor, direction } => svc
                    .call_elevator(floor, direction)
                    .await
                    .map(DispatchResponse::Assigned),
                DispatchRequest::Select { car, floor } => svc
                    .select_floor(car, floor)
                    .await
                    .map(|()| DispatchResponse::Accepted),
                DispatchRequest::Step => {
                    svc.step().await;
                    Ok(DispatchResponse::Stepped)
                }
                DispatchRequest::Status => Ok(DispatchResponse::Status(svc.status().await)),
                DispatchRequest::EmergencyRecall => {
                    svc.emergency_recall().await;
                    Ok(DispatchResponse::Accepted)
                }
            }
        })
    }
}
