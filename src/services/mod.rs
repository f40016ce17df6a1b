pub mod clock;
pub mod dispatch;
pub mod input;

pub use clock::spawn_clock;
pub use dispatch::{DispatchService, Response};
pub use input::{InputLayer, InputService};
