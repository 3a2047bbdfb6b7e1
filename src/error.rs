use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid hour {0}: expected 0..=23")]
    InvalidHour(u32),
    #[error("invalid max hours {0}: must be at least 1")]
    InvalidMaxHours(u32),
    #[error("invalid hall count {0}: expected 1..=10")]
    InvalidHalls(u32),
    #[error("availability needs at least one hour")]
    EmptyHours,
    #[error("invalid day key: {0}")]
    InvalidDayKey(String),
    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("no requirement at hour {hour} on {day}")]
    UnknownHour { day: String, hour: u8 },
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
