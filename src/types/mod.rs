pub mod call;
pub mod floor;
pub mod message;
pub mod request;

pub use call::{CabCall, HallCall};
pub use floor::{CarId, Direction, Floor, FloorRange};
pub use message::{FleetEvent, StopOutcome, ToCar, ToDispatcher};
pub use request::Request;
