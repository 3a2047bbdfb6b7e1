#![forbid(unsafe_code)]
//! Hallplan — répartition d'employés sur des créneaux horaires par salle.
//!
//! - État local en JSON (employés + besoins), sans base de données.
//! - Répartition gloutonne par capacité restante, déterministe.
//! - Fusion des heures consécutives en plages `HH:00-HH:00`.
//! - Export CSV / XLSX / JSON de lignes (employé, date, salle, plage).

pub mod compress;
pub mod error;
pub mod export;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use compress::{compress_hours, TimeRange};
pub use error::PlanError;
pub use export::{export_rows, ExportOptions, ExportRow, DEFAULT_PLACEHOLDER};
pub use model::{
    Availability, DayKey, DaySchedule, Employee, EmployeeId, HourRequirement, PlannerState,
    Schedule, DEFAULT_HALL_PREFIX,
};
pub use scheduler::{distribute, AssignedHour, Distribution, Scheduler, SlotAssignment};
pub use storage::{JsonStorage, Storage};
