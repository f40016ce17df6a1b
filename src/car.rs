use std::collections::BTreeSet;
use std::ops::Bound;

use crate::error::DispatchError;
use crate::types::{CarId, Direction, Floor, StopOutcome, ToCar, ToDispatcher};

/// Read-only snapshot of one car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarState {
    pub id: CarId,
    pub current_floor: Floor,
    pub direction: Direction,
    pub pending_stops: BTreeSet<Floor>,
}

/// Result of moving a car by one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub floor: Floor,
    pub arrived: bool,
    pub notice: Option<ToDispatcher>,
}

/// One elevator car. `direction` always follows from `current_floor` and
/// `pending_stops`: `None` iff there is nothing left to visit.
#[derive(Debug)]
pub struct Car {
    id: CarId,
    current_floor: Floor,
    direction: Direction,
    pending_stops: BTreeSet<Floor>,
}

impl Car {
    pub fn new(id: CarId, current_floor: Floor) -> Self {
        Self {
            id,
            current_floor,
            direction: Direction::None,
            pending_stops: BTreeSet::new(),
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

    pub fn pending_stops(&self) -> &BTreeSet<Floor> {
        &self.pending_stops
    }

    pub fn is_idle(&self) -> bool {
        self.pending_stops.is_empty()
    }

    pub fn is_on_up_path(&self) -> bool {
        self.direction == Direction::Up
    }

    pub fn is_on_down_path(&self) -> bool {
        self.direction == Direction::Down
    }

    pub fn is_floor_already_requested(&self, floor: Floor) -> bool {
        self.pending_stops.contains(&floor)
    }

    /// The stop the car is committed to reaching next. An idle car addresses
    /// the floor it stands on.
    pub fn addressed_floor(&self) -> Floor {
        let next = match self.direction {
            Direction::Up => self.pending_stops.range(self.above()).next(),
            Direction::Down => self.pending_stops.range(..self.current_floor).next_back(),
            Direction::None => None,
        };
        next.copied().unwrap_or(self.current_floor)
    }

    /// Number of pending stops strictly between `a` and `b`, in either order.
    pub fn stops_between(&self, a: Floor, b: Floor) -> usize {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if low == high {
            return 0;
        }
        self.pending_stops.range(low + 1..high).count()
    }

    pub fn handle(&mut self, message: ToCar) -> StopOutcome {
        match message {
            ToCar::ServeFloor(floor) => self.add_stop(floor),
        }
    }

    pub fn add_stop(&mut self, floor: Floor) -> StopOutcome {
        if floor == self.current_floor {
            return StopOutcome::ServedInPlace;
        }
        if !self.pending_stops.insert(floor) {
            return StopOutcome::AlreadyRequested;
        }
        self.update_direction();
        StopOutcome::Added
    }

    /// Moves one floor along the current direction and drops the stop if the car
    /// lands on one. Emptying the stop list yields a `NewlyFree` notice.
    pub fn advance(&mut self) -> Result<Step, DispatchError> {
        let delta = match self.direction {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::None => return Err(DispatchError::IdleAdvance(self.id)),
        };
        if self.pending_stops.is_empty() {
            return Err(DispatchError::IdleAdvance(self.id));
        }

        self.current_floor += delta;
        let arrived = self.pending_stops.remove(&self.current_floor);
        self.update_direction();

        let notice = (arrived && self.pending_stops.is_empty())
            .then_some(ToDispatcher::NewlyFree(self.id));
        Ok(Step {
            floor: self.current_floor,
            arrived,
            notice,
        })
    }

    pub fn snapshot(&self) -> CarState {
        CarState {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            pending_stops: self.pending_stops.clone(),
        }
    }

    fn above(&self) -> (Bound<Floor>, Bound<Floor>) {
        (Bound::Excluded(self.current_floor), Bound::Unbounded)
    }

    // Keep going the same way while there is work that way, otherwise turn.
    fn update_direction(&mut self) {
        let above = self.pending_stops.range(self.above()).next().is_some();
        let below = self.pending_stops.range(..self.current_floor).next().is_some();
        self.direction = match (self.direction, above, below) {
            (_, false, false) => Direction::None,
            (Direction::Up, true, _) => Direction::Up,
            (Direction::Down, _, true) => Direction::Down,
            (_, true, _) => Direction::Up,
            (_, false, true) => Direction::Down,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(car: &Car) -> Vec<Floor> {
        car.pending_stops().iter().copied().collect()
    }

    #[test]
    fn new_car_is_idle() {
        let car = Car::new(1, 0);
        assert!(car.is_idle());
        assert_eq!(car.direction(), Direction::None);
        assert_eq!(car.addressed_floor(), 0);
    }

    #[test]
    fn add_stop_sets_direction_from_idle() {
        let mut up = Car::new(1, 3);
        assert_eq!(up.add_stop(7), StopOutcome::Added);
        assert!(up.is_on_up_path());

        let mut down = Car::new(2, 3);
        assert_eq!(down.add_stop(0), StopOutcome::Added);
        assert!(down.is_on_down_path());
    }

    #[test]
    fn stop_at_current_floor_is_served_in_place() {
        let mut car = Car::new(1, 4);
        assert_eq!(car.add_stop(4), StopOutcome::ServedInPlace);
        assert!(car.is_idle());
        assert_eq!(car.direction(), Direction::None);
    }

    #[test]
    fn duplicate_stop_leaves_stops_unchanged() {
        let mut car = Car::new(1, 0);
        car.add_stop(5);
        let before = car.snapshot();
        assert_eq!(car.add_stop(5), StopOutcome::AlreadyRequested);
        assert_eq!(car.snapshot(), before);
        assert!(car.is_floor_already_requested(5));
        assert!(!car.is_floor_already_requested(6));
    }

    #[test]
    fn handle_serve_floor_adds_stop() {
        let mut car = Car::new(1, 0);
        assert_eq!(car.handle(ToCar::ServeFloor(2)), StopOutcome::Added);
        assert_eq!(stops(&car), vec![2]);
    }

    #[test]
    fn addressed_floor_is_nearest_stop_in_travel_direction() {
        let mut car = Car::new(1, 1);
        car.add_stop(8);
        car.add_stop(3);
        assert_eq!(car.addressed_floor(), 3);

        let mut car = Car::new(2, 9);
        car.add_stop(2);
        car.add_stop(6);
        assert_eq!(car.addressed_floor(), 6);
    }

    #[test]
    fn keeps_direction_while_work_remains_ahead() {
        let mut car = Car::new(1, 5);
        car.add_stop(8);
        car.add_stop(2);
        assert!(car.is_on_up_path());
        assert_eq!(car.addressed_floor(), 8);
    }

    #[test]
    fn advance_walks_to_stop_and_frees_the_car() {
        let mut car = Car::new(1, 0);
        car.add_stop(2);

        let step = car.advance().unwrap();
        assert_eq!(step, Step { floor: 1, arrived: false, notice: None });
        assert!(car.is_on_up_path());

        let step = car.advance().unwrap();
        assert_eq!(
            step,
            Step { floor: 2, arrived: true, notice: Some(ToDispatcher::NewlyFree(1)) }
        );
        assert!(car.is_idle());
        assert_eq!(car.direction(), Direction::None);
    }

    #[test]
    fn advance_turns_around_after_last_stop_above() {
        let mut car = Car::new(1, 2);
        car.add_stop(3);
        car.add_stop(0);
        assert!(car.is_on_up_path());

        let step = car.advance().unwrap();
        assert!(step.arrived);
        assert_eq!(step.notice, None);
        assert!(car.is_on_down_path());
        assert_eq!(car.addressed_floor(), 0);

        car.advance().unwrap();
        car.advance().unwrap();
        let step = car.advance().unwrap();
        assert_eq!(step.floor, 0);
        assert_eq!(step.notice, Some(ToDispatcher::NewlyFree(1)));
    }

    #[test]
    fn moves_at_the_edges_of_the_floor_type() {
        let mut car = Car::new(1, Floor::MAX - 1);
        car.add_stop(Floor::MAX);
        assert!(car.is_on_up_path());
        assert_eq!(car.addressed_floor(), Floor::MAX);
        let step = car.advance().unwrap();
        assert_eq!(step.floor, Floor::MAX);
        assert_eq!(step.notice, Some(ToDispatcher::NewlyFree(1)));
        assert_eq!(car.addressed_floor(), Floor::MAX);

        car.add_stop(Floor::MAX - 1);
        assert!(car.is_on_down_path());
        assert_eq!(car.addressed_floor(), Floor::MAX - 1);

        let mut car = Car::new(2, Floor::MIN + 1);
        car.add_stop(Floor::MIN);
        assert_eq!(car.advance().unwrap().floor, Floor::MIN);
        assert!(car.is_idle());
    }

    #[test]
    fn advancing_an_idle_car_is_an_invariant_violation() {
        let mut car = Car::new(3, 0);
        assert_eq!(car.advance(), Err(DispatchError::IdleAdvance(3)));
    }

    #[test]
    fn stops_between_is_exclusive_and_order_independent() {
        let mut car = Car::new(1, 0);
        for floor in [2, 3, 5, 7] {
            car.add_stop(floor);
        }
        assert_eq!(car.stops_between(2, 7), 2);
        assert_eq!(car.stops_between(7, 2), 2);
        assert_eq!(car.stops_between(3, 3), 0);
        assert_eq!(car.stops_between(3, 4), 0);
    }
}
