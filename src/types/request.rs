use anyhow::Context;
use std::convert::TryFrom;

use crate::types::{CarId, Direction, Floor};

/// A request as submitted by an outside caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    HallCall { floor: Floor, direction: Direction },
    CabCall { car: Option<CarId>, floor: Floor },
    ListCars,
    ListPending,
    AdvanceClock,
    Release(CarId),
}

fn parse_floor(arg: &str) -> anyhow::Result<Floor> {
    arg.parse::<Floor>()
        .context(format!("failed to parse '{arg}' as a floor"))
}

fn parse_car(arg: &str) -> anyhow::Result<CarId> {
    arg.parse::<CarId>()
        .context(format!("failed to parse '{arg}' as a car id"))
}

impl TryFrom<&str> for Request {
    type Error = anyhow::Error;

    /// One request per line: `U 5`, `D 5`, `H 5`, `P 2 7`, `P 7`, `L`, `Q`, `T`, `R 2`.
    fn try_from(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            anyhow::bail!("empty request");
        };
        let args: Vec<&str> = parts.collect();

        let request = match (cmd.to_ascii_uppercase().as_str(), args.as_slice()) {
            ("U", [floor]) => Request::HallCall {
                floor: parse_floor(floor)?,
                direction: Direction::Up,
            },
            ("D", [floor]) => Request::HallCall {
                floor: parse_floor(floor)?,
                direction: Direction::Down,
            },
            ("H", [floor]) => Request::HallCall {
                floor: parse_floor(floor)?,
                direction: Direction::None,
            },
            ("P", [car, floor]) => Request::CabCall {
                car: Some(parse_car(car)?),
                floor: parse_floor(floor)?,
            },
            ("P", [floor]) => Request::CabCall {
                car: None,
                floor: parse_floor(floor)?,
            },
            ("L", []) => Request::ListCars,
            ("Q", []) => Request::ListPending,
            ("T", []) => Request::AdvanceClock,
            ("R", [car]) => Request::Release(parse_car(car)?),
            (other, args) => anyhow::bail!("unknown request '{other}' with {} argument(s)", args.len()),
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hall_calls() {
        assert_eq!(
            Request::try_from("U 5").unwrap(),
            Request::HallCall { floor: 5, direction: Direction::Up }
        );
        assert_eq!(
            Request::try_from("d -1").unwrap(),
            Request::HallCall { floor: -1, direction: Direction::Down }
        );
        assert_eq!(
            Request::try_from("H 3").unwrap(),
            Request::HallCall { floor: 3, direction: Direction::None }
        );
    }

    #[test]
    fn parses_cab_calls_with_and_without_car() {
        assert_eq!(
            Request::try_from("P 2 7").unwrap(),
            Request::CabCall { car: Some(2), floor: 7 }
        );
        assert_eq!(
            Request::try_from("P 7").unwrap(),
            Request::CabCall { car: None, floor: 7 }
        );
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(Request::try_from("L").unwrap(), Request::ListCars);
        assert_eq!(Request::try_from("  q ").unwrap(), Request::ListPending);
        assert_eq!(Request::try_from("T").unwrap(), Request::AdvanceClock);
        assert_eq!(Request::try_from("R 1").unwrap(), Request::Release(1));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Request::try_from("").is_err());
        assert!(Request::try_from("U").is_err());
        assert!(Request::try_from("U five").is_err());
        assert!(Request::try_from("P -1 3").is_err());
        assert!(Request::try_from("X 1").is_err());
        assert!(Request::try_from("L 1").is_err());
    }
}
