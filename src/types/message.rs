use std::fmt;
use std::fmt::Display;

use crate::types::{CabCall, CarId, Floor, HallCall};

/// Dispatcher -> car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToCar {
    ServeFloor(Floor),
}

/// Car -> dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToDispatcher {
    NewlyFree(CarId),
}

/// What a car did with a `ServeFloor` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Added,
    AlreadyRequested,
    /// The car was already standing at the floor.
    ServedInPlace,
}

/// Notifications published to whoever observes the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetEvent {
    Assigned { car: CarId, call: HallCall },
    CabStop { call: CabCall },
    Queued(HallCall),
    Arrived { car: CarId, floor: Floor },
    NewlyFree(CarId),
    Reclaimed { car: CarId, call: HallCall },
    Released(CarId),
}

impl Display for ToCar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToCar::ServeFloor(floor) => write!(f, "serve {floor}"),
        }
    }
}

impl Display for ToDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToDispatcher::NewlyFree(car) => write!(f, "car {car} newly free"),
        }
    }
}

impl Display for FleetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetEvent::Assigned { car, call } => write!(f, "{call} assigned to car {car}"),
            FleetEvent::CabStop { call } => write!(f, "cab stop {call}"),
            FleetEvent::Queued(call) => write!(f, "{call} queued"),
            FleetEvent::Arrived { car, floor } => write!(f, "car {car} arrived at {floor}"),
            FleetEvent::NewlyFree(car) => write!(f, "car {car} is free"),
            FleetEvent::Reclaimed { car, call } => write!(f, "car {car} reclaimed for {call}"),
            FleetEvent::Released(car) => write!(f, "car {car} back in the free pool"),
        }
    }
}
