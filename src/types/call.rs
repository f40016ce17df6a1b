use std::fmt;

use crate::error::DispatchError;
use crate::types::{CarId, Direction, Floor, FloorRange};

/// Someone waiting at `floor` who wants to travel `direction`.
///
/// Two hall calls are the same request iff floor and direction match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HallCall {
    floor: Floor,
    direction: Direction,
}

impl HallCall {
    pub fn new(floor: Floor, direction: Direction, range: &FloorRange) -> Result<Self, DispatchError> {
        let floor = range.validate(floor)?;
        if direction == Direction::None {
            return Err(DispatchError::MissingDirection { floor });
        }
        Ok(Self { floor, direction })
    }

    /// For floors that already went through `new`.
    pub(crate) fn validated(floor: Floor, direction: Direction) -> Self {
        Self { floor, direction }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for HallCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.direction, self.floor)
    }
}

/// A rider inside car `car` asking for `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CabCall {
    car: CarId,
    floor: Floor,
}

impl CabCall {
    /// Checks the floor and presence of a car id. Fleet membership is checked by
    /// the dispatcher, which is the only one that knows the fleet.
    pub fn new(car: Option<CarId>, floor: Floor, range: &FloorRange) -> Result<Self, DispatchError> {
        let floor = range.validate(floor)?;
        let car = car.ok_or(DispatchError::MissingCarId)?;
        Ok(Self { car, floor })
    }

    pub fn car(&self) -> CarId {
        self.car
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }
}

impl fmt::Display for CabCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {} -> {}", self.car, self.floor)
    }
}
