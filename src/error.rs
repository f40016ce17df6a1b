use crate::types::{CarId, Floor};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("floor {floor} is outside the serviced range [{bottom}, {top}]")]
    OutOfRange { floor: Floor, bottom: Floor, top: Floor },

    #[error("hall call at floor {floor} has no direction")]
    MissingDirection { floor: Floor },

    #[error("cab call has no car id")]
    MissingCarId,

    #[error("car {0} is not part of the fleet")]
    UnknownCarId(CarId),

    /// A car was stepped with nothing left to visit. Never recoverable.
    #[error("car {0} advanced with no pending stops")]
    IdleAdvance(CarId),
}

impl DispatchError {
    /// Whether the error comes from a malformed or unserviceable request, as
    /// opposed to a broken internal invariant.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, DispatchError::IdleAdvance(_))
    }
}
