use std::collections::VecDeque;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::car::{Car, CarState, Step};
use crate::config::FleetConfig;
use crate::error::DispatchError;
use crate::pending::PendingHallCalls;
use crate::strategies::LeastDetour;
use crate::strategy::Strategy;
use crate::types::{
    CabCall, CarId, Direction, FleetEvent, Floor, FloorRange, HallCall, StopOutcome, ToCar,
    ToDispatcher,
};

/// How a hall call was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Handed to a car. `outcome` says what the car did with it.
    Car { car: CarId, outcome: StopOutcome },
    /// No car fits yet; the call waits for the next free car.
    Queued,
    /// An equal call is already waiting.
    AlreadyQueued,
}

#[derive(Debug, Default)]
struct Observers(Option<UnboundedSender<FleetEvent>>);

impl Observers {
    fn publish(&self, event: FleetEvent) {
        if let Some(tx) = &self.0 {
            if tx.send(event).is_err() {
                warn!("fleet event receiver dropped");
            }
        }
    }
}

/// Owns the fleet, the free pool and every pending hall call.
///
/// All methods take `&mut self`; callers that share a dispatcher must put it
/// behind a single lock (see `DispatchService`) so that every read-then-write
/// sequence runs as one unit.
#[derive(Debug)]
pub struct Dispatcher<S = LeastDetour> {
    range: FloorRange,
    fleet: Vec<Car>,
    free_pool: VecDeque<CarId>,
    pending: PendingHallCalls,
    mailbox: VecDeque<ToDispatcher>,
    strategy: S,
    observers: Observers,
}

impl Dispatcher<LeastDetour> {
    /// `cars` cars numbered from 1, all idle at the bottom floor.
    pub fn new(cars: u32, range: FloorRange) -> Self {
        Self::with_strategy(cars, range, LeastDetour)
    }

    pub fn from_config(config: &FleetConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let range = FloorRange::new(config.bottom_floor, config.top_floor)?;
        Ok(Self::new(config.cars, range))
    }
}

impl<S: Strategy> Dispatcher<S> {
    pub fn with_strategy(cars: u32, range: FloorRange, strategy: S) -> Self {
        let fleet = (1..=cars).map(|id| Car::new(id, range.bottom())).collect();
        Self::from_fleet(fleet, range, strategy)
    }

    fn from_fleet(fleet: Vec<Car>, range: FloorRange, strategy: S) -> Self {
        let free_pool = fleet.iter().filter(|c| c.is_idle()).map(Car::id).collect();
        Self {
            range,
            fleet,
            free_pool,
            pending: PendingHallCalls::new(),
            mailbox: VecDeque::new(),
            strategy,
            observers: Observers::default(),
        }
    }

    /// Publishes every fleet event on `tx`.
    pub fn with_events(mut self, tx: UnboundedSender<FleetEvent>) -> Self {
        self.observers = Observers(Some(tx));
        self
    }

    pub fn range(&self) -> FloorRange {
        self.range
    }

    pub fn list_cars(&self) -> Vec<CarState> {
        self.fleet.iter().map(Car::snapshot).collect()
    }

    /// Pending hall calls, `Up` by ascending floor then `Down` by descending floor.
    pub fn list_pending(&self) -> Vec<HallCall> {
        self.pending.by_floor()
    }

    pub fn pending(&self) -> &PendingHallCalls {
        &self.pending
    }

    pub fn free_cars(&self) -> Vec<CarId> {
        self.free_pool.iter().copied().collect()
    }

    pub fn submit_hall_call(
        &mut self,
        floor: Floor,
        direction: Direction,
    ) -> Result<Assignment, DispatchError> {
        let call = HallCall::new(floor, direction, &self.range)?;

        if self.pending.contains(&call) {
            info!(%call, "hall call already queued");
            return Ok(Assignment::AlreadyQueued);
        }

        if let Some(car) = self.free_pool.pop_front() {
            let outcome = self.serve(car, call.floor())?;
            if outcome == StopOutcome::ServedInPlace {
                self.free_pool.push_front(car);
            }
            info!(%call, car, ?outcome, "hall call assigned to free car");
            self.observers.publish(FleetEvent::Assigned { car, call });
            return Ok(Assignment::Car { car, outcome });
        }

        if let Some(car) = self.strategy.select(&self.fleet, &call) {
            let outcome = self.serve(car, call.floor())?;
            info!(%call, car, ?outcome, "hall call assigned to car in transit");
            self.observers.publish(FleetEvent::Assigned { car, call });
            return Ok(Assignment::Car { car, outcome });
        }

        self.pending.push(call);
        info!(
            %call,
            pending = self.pending.len(),
            lowest_up = ?self.pending.lowest_up(),
            highest_down = ?self.pending.highest_down(),
            "no car available, hall call queued"
        );
        self.observers.publish(FleetEvent::Queued(call));
        Ok(Assignment::Queued)
    }

    pub fn submit_cab_call(
        &mut self,
        car: Option<CarId>,
        floor: Floor,
    ) -> Result<StopOutcome, DispatchError> {
        let call = CabCall::new(car, floor, &self.range)?;
        let index = self.index_of(call.car())?;

        if self.fleet[index].is_floor_already_requested(call.floor()) {
            info!(%call, "floor already requested");
            return Ok(StopOutcome::AlreadyRequested);
        }

        let outcome = self.fleet[index].handle(ToCar::ServeFloor(call.floor()));
        if outcome == StopOutcome::Added {
            self.free_pool.retain(|&id| id != call.car());
        }
        info!(%call, ?outcome, "cab call");
        self.observers.publish(FleetEvent::CabStop { call });
        Ok(outcome)
    }

    /// Moves every busy car one floor, then handles the notices that produced.
    pub fn advance_clock(&mut self) -> Result<Vec<(CarId, Step)>, DispatchError> {
        let mut steps = Vec::new();
        for car in self.fleet.iter_mut().filter(|c| !c.is_idle()) {
            let step = car.advance()?;
            debug!(car = car.id(), floor = step.floor, direction = %car.direction(), "car moved");
            if step.arrived {
                self.observers.publish(FleetEvent::Arrived {
                    car: car.id(),
                    floor: step.floor,
                });
            }
            if let Some(notice) = step.notice {
                self.mailbox.push_back(notice);
            }
            steps.push((car.id(), step));
        }

        while let Some(message) = self.mailbox.pop_front() {
            self.on_message(message)?;
        }
        Ok(steps)
    }

    pub fn on_message(&mut self, message: ToDispatcher) -> Result<(), DispatchError> {
        match message {
            ToDispatcher::NewlyFree(car) => self.reclaim(car),
        }
    }

    /// An outside "back in service" notice. Busy or already free cars are left alone.
    pub fn release_car(&mut self, car: CarId) -> Result<(), DispatchError> {
        let index = self.index_of(car)?;
        if self.free_pool.contains(&car) {
            return Ok(());
        }
        if !self.fleet[index].is_idle() {
            warn!(car, "release ignored, car still has pending stops");
            return Ok(());
        }
        self.reclaim(car)
    }

    // Oldest waiting call first, regardless of where the car stands. Calls at the
    // car's own floor are served on the spot and the next one is tried.
    fn reclaim(&mut self, car: CarId) -> Result<(), DispatchError> {
        let index = self.index_of(car)?;
        if !self.fleet[index].is_idle() || self.free_pool.contains(&car) {
            warn!(car, "stale newly-free notice");
            return Ok(());
        }
        info!(car, "car newly free");
        self.observers.publish(FleetEvent::NewlyFree(car));

        while let Some(call) = self.pending.pop_oldest() {
            let outcome = self.serve(car, call.floor())?;
            info!(car, %call, ?outcome, "freed car takes oldest pending call");
            self.observers.publish(FleetEvent::Reclaimed { car, call });
            if outcome != StopOutcome::ServedInPlace {
                return Ok(());
            }
        }

        self.free_pool.push_back(car);
        info!(car, free = self.free_pool.len(), "car returned to free pool");
        self.observers.publish(FleetEvent::Released(car));
        Ok(())
    }

    fn serve(&mut self, car: CarId, floor: Floor) -> Result<StopOutcome, DispatchError> {
        let index = self.index_of(car)?;
        let outcome = self.fleet[index].handle(ToCar::ServeFloor(floor));
        if outcome == StopOutcome::AlreadyRequested {
            info!(car, floor, "floor already requested");
        }
        Ok(outcome)
    }

    fn index_of(&self, car: CarId) -> Result<usize, DispatchError> {
        self.fleet
            .iter()
            .position(|c| c.id() == car)
            .ok_or(DispatchError::UnknownCarId(car))
    }
}
