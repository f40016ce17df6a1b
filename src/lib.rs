//! Assigns elevator cars to hall and cab calls and steps each car along its
//! stop list.

pub mod car;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod pending;
pub mod services;
pub mod strategies;
pub mod strategy;
pub mod types;

pub use car::{Car, CarState};
pub use config::Config;
pub use dispatcher::{Assignment, Dispatcher};
pub use error::DispatchError;
pub use types::{CabCall, CarId, Direction, FleetEvent, Floor, FloorRange, HallCall, Request};
