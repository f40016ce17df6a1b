use std::fmt;

use crate::error::DispatchError;

pub type Floor = i32;
pub type CarId = u32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::None => write!(f, "NONE"),
        }
    }
}

/// Closed range of serviceable floors, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRange {
    bottom: Floor,
    top: Floor,
}

impl FloorRange {
    pub fn new(bottom: Floor, top: Floor) -> anyhow::Result<Self> {
        if bottom >= top {
            anyhow::bail!("bottom floor {bottom} must be below top floor {top}");
        }
        Ok(Self { bottom, top })
    }

    pub fn bottom(&self) -> Floor {
        self.bottom
    }

    pub fn top(&self) -> Floor {
        self.top
    }

    pub fn contains(&self, floor: Floor) -> bool {
        (self.bottom..=self.top).contains(&floor)
    }

    /// Out-of-range floors are rejected, never clamped.
    pub fn validate(&self, floor: Floor) -> Result<Floor, DispatchError> {
        if self.contains(floor) {
            Ok(floor)
        } else {
            Err(DispatchError::OutOfRange {
                floor,
                bottom: self.bottom,
                top: self.top,
            })
        }
    }
}
