pub mod least_detour;

pub use least_detour::LeastDetour;
