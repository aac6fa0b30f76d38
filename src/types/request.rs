use anyhow::Context;
use std::fmt;

pub type Floor = u32;
pub type CarId = usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Idle => write!(f, "IDLE"),
        }
    }
}

/// A pending stop. The direction is the one relevant when the stop was
/// requested: the call direction for hall calls, the car's travel direction
/// for in-car selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRequest {
    pub floor: Floor,
    pub direction: Direction,
}

impl FloorRequest {
    pub fn new(floor: Floor, direction: Direction) -> Self {
        FloorRequest { floor, direction }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchRequest {
    Call { floor: Floor, direction: Direction },
    Select { car: CarId, floor: Floor },
    Step,
    Status,
    EmergencyRecall,
}

impl DispatchRequest {
    /// The floor this request targets, if any.
    pub fn floor(&self) -> Option<Floor> {
        match self {
            DispatchRequest::Call { floor, .. } | DispatchRequest::Select { floor, .. } => {
                Some(*floor)
            }
            DispatchRequest::Step | DispatchRequest::Status | DispatchRequest::EmergencyRecall => {
                None
            }
        }
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .context(format!("failed to parse '{raw}' as a number"))
}

/// Driver command lines: `U<f>`, `D<f>`, `P<car>:<f>`, `T`, `S`, `E`.
impl TryFrom<&str> for DispatchRequest {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        let line = value.trim();
        let mut chars = line.chars();
        let Some(cmd) = chars.next() else {
            anyhow::bail!("empty command");
        };
        let arg = chars.as_str();

        match cmd.to_ascii_uppercase() {
            'U' => Ok(DispatchRequest::Call {
                floor: parse_number(arg)?,
                direction: Direction::Up,
            }),
            'D' => Ok(DispatchRequest::Call {
                floor: parse_number(arg)?,
                direction: Direction::Down,
            }),
            'P' => {
                let (car, floor) = arg
                    .split_once(':')
                    .context(format!("expected P<car>:<floor>, got '{line}'"))?;
                Ok(DispatchRequest::Select {
                    car: parse_number(car)?,
                    floor: parse_number(floor)?,
                })
            }
            'T' | 'S' | 'E' if !arg.trim().is_empty() => {
                anyhow::bail!("command '{cmd}' takes no argument, got '{arg}'")
            }
            'T' => Ok(DispatchRequest::Step),
            'S' => Ok(DispatchRequest::Status),
            'E' => Ok(DispatchRequest::EmergencyRecall),
            other => anyhow::bail!("unknown command: {other}"),
        }
    }
}
