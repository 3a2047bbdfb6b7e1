use crate::compress::compress_hours;
use crate::model::{Employee, EmployeeId, Schedule, DEFAULT_HALL_PREFIX};
use crate::scheduler::Distribution;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Nom affiché pour une salle restée sans employé.
pub const DEFAULT_PLACEHOLDER: &str = "Unassigned";

/// En-têtes des colonnes d'export, dans l'ordre des champs de `ExportRow`.
pub const HEADERS: [&str; 4] = ["Employee", "Date", "Hall", "Hours"];

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub placeholder: String,
    pub hall_prefix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            hall_prefix: DEFAULT_HALL_PREFIX.to_string(),
        }
    }
}

/// Ligne plate prête pour un tableur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub employee: String,
    pub date: String,
    pub hall: String,
    pub time_range: String,
}

impl ExportRow {
    pub fn fields(&self) -> [&str; 4] {
        [
            self.employee.as_str(),
            self.date.as_str(),
            self.hall.as_str(),
            self.time_range.as_str(),
        ]
    }
}

struct HallGroup {
    date: String,
    hall: String,
    hours: BTreeSet<u8>,
}

/// Transforme une répartition en lignes (employé, date, salle, plage).
///
/// Regroupe par nom puis par (date, salle) dans l'ordre de première apparition.
pub fn export_rows(
    employees: &[Employee],
    schedule: &Schedule,
    distribution: &Distribution,
    opts: &ExportOptions,
) -> Vec<ExportRow> {
    let names: HashMap<&EmployeeId, &str> = employees
        .iter()
        .map(|e| (&e.id, e.name.as_str()))
        .collect();

    let mut groups: Vec<(String, Vec<HallGroup>)> = Vec::new();

    for slot in &distribution.slots {
        let day = schedule.day(&slot.day);
        let date = slot.day.date_label();

        for index in 0..slot.halls as usize {
            let hall = match day {
                Some(day) => day.hall_name(slot.hour, index, &opts.hall_prefix),
                None => format!("{} {}", opts.hall_prefix, index + 1),
            };
            let name = match slot.employees.get(index) {
                Some(id) => names.get(id).copied().unwrap_or(id.as_str()),
                None => opts.placeholder.as_str(),
            };

            let pos = match groups.iter().position(|(n, _)| n == name) {
                Some(pos) => pos,
                None => {
                    groups.push((name.to_string(), Vec::new()));
                    groups.len() - 1
                }
            };
            let halls = &mut groups[pos].1;
            match halls.iter_mut().find(|g| g.date == date && g.hall == hall) {
                Some(group) => {
                    group.hours.insert(slot.hour);
                }
                None => halls.push(HallGroup {
                    date: date.clone(),
                    hall,
                    hours: BTreeSet::from([slot.hour]),
                }),
            }
        }
    }

    let mut rows = Vec::new();
    for (name, halls) in groups {
        for group in halls {
            let hours: Vec<u8> = group.hours.into_iter().collect();
            for range in compress_hours(&hours) {
                rows.push(ExportRow {
                    employee: name.clone(),
                    date: group.date.clone(),
                    hall: group.hall.clone(),
                    time_range: range.to_string(),
                });
            }
        }
    }
    rows
}
