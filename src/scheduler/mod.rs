mod assignment;
mod types;

pub use assignment::distribute;
pub use types::{AssignedHour, Distribution, EmployeeAssignments, SlotAssignment};

use crate::error::PlanError;
use crate::export::{self, ExportOptions, ExportRow};
use crate::model::{DayKey, Employee, HourRequirement, PlannerState};
use chrono::NaiveDate;

/// Scheduler : encapsule l'état (employés + besoins) en cours d'édition
#[derive(Debug, Default)]
pub struct Scheduler {
    state: PlannerState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: PlannerState::default(),
        }
    }

    pub fn from_state(state: PlannerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut PlannerState {
        &mut self.state
    }

    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        self.state.employees.extend(employees);
    }

    pub fn remove_employee(&mut self, index: usize) -> Result<Employee, PlanError> {
        self.state.remove_employee(index)
    }

    pub fn add_hour(
        &mut self,
        date: NaiveDate,
        requirement: HourRequirement,
        names: &[String],
        hall_prefix: &str,
    ) {
        self.state
            .schedule
            .add_hour(date, requirement, names, hall_prefix);
    }

    pub fn remove_hour(&mut self, key: &DayKey, hour: u8) -> Result<usize, PlanError> {
        self.state.schedule.remove_hour(key, hour)
    }

    /// Recalcule entièrement la répartition ; l'état n'est pas modifié.
    pub fn distribute(&self) -> Distribution {
        distribute(&self.state.employees, &self.state.schedule)
    }

    /// Répartit puis produit les lignes d'export.
    pub fn export_rows(&self, opts: &ExportOptions) -> Vec<ExportRow> {
        let distribution = self.distribute();
        export::export_rows(
            &self.state.employees,
            &self.state.schedule,
            &distribution,
            opts,
        )
    }
}
