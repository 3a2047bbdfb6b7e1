use crate::model::{DayKey, EmployeeId};
use serde::Serialize;

/// Heure attribuée à un employé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignedHour {
    pub day: DayKey,
    pub hour: u8,
}

/// Résultat d'une entrée de besoin : la position dans `employees` est l'index de salle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    pub day: DayKey,
    pub hour: u8,
    pub halls: u32,
    pub employees: Vec<EmployeeId>,
}

impl SlotAssignment {
    pub fn open_positions(&self) -> usize {
        (self.halls as usize).saturating_sub(self.employees.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeAssignments {
    pub employee: EmployeeId,
    pub hours: Vec<AssignedHour>,
}

/// Sortie d'une passe de répartition.
///
/// `slots` suit l'ordre du planning (jours puis entrées), `employees` l'ordre du roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Distribution {
    pub slots: Vec<SlotAssignment>,
    pub employees: Vec<EmployeeAssignments>,
}

impl Distribution {
    /// Première entrée correspondant à (jour, heure).
    pub fn slot(&self, day: &DayKey, hour: u8) -> Option<&SlotAssignment> {
        self.slots.iter().find(|s| &s.day == day && s.hour == hour)
    }

    pub fn hours_for(&self, employee: &EmployeeId) -> &[AssignedHour] {
        self.employees
            .iter()
            .find(|e| &e.employee == employee)
            .map(|e| e.hours.as_slice())
            .unwrap_or(&[])
    }

    pub fn assigned_count(&self, employee: &EmployeeId, day: &DayKey) -> usize {
        self.hours_for(employee)
            .iter()
            .filter(|h| &h.day == day)
            .count()
    }

    pub fn required_positions(&self) -> usize {
        self.slots.iter().map(|s| s.halls as usize).sum()
    }

    pub fn filled_positions(&self) -> usize {
        self.slots.iter().map(|s| s.employees.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.open_positions() == 0)
    }
}
