use crate::car::Car;
use crate::strategy::Strategy;
use crate::types::{CarId, Direction, HallCall};

/// Prefers the car that already travels towards the call and has the fewest
/// stops left to make before reaching it. Ties go to the car that comes first
/// in the fleet.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastDetour;

impl LeastDetour {
    fn is_candidate(car: &Car, call: &HallCall) -> bool {
        match call.direction() {
            Direction::Up => car.is_on_up_path() && car.addressed_floor() < call.floor(),
            Direction::Down => car.is_on_down_path() && car.addressed_floor() > call.floor(),
            Direction::None => false,
        }
    }

    fn detour(car: &Car, call: &HallCall) -> usize {
        car.stops_between(car.addressed_floor(), call.floor())
    }
}

impl Strategy for LeastDetour {
    fn select(&self, fleet: &[Car], call: &HallCall) -> Option<CarId> {
        // min_by_key returns the first of equal minima.
        fleet
            .iter()
            .filter(|car| Self::is_candidate(car, call))
            .map(|car| (Self::detour(car, call), car.id()))
            .min_by_key(|&(cost, _)| cost)
            .map(|(_, id)| id)
    }
}
