use crate::car::Car;
use crate::types::{CarId, HallCall};

/// Picks an in-transit car to pick up a hall call on its way.
///
/// Only consulted when the free pool is empty. Returning `None` parks the call
/// until a car frees up.
pub trait Strategy: Send + 'static {
    fn select(&self, fleet: &[Car], call: &HallCall) -> Option<CarId>;
}
