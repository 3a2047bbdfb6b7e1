use super::types::{AssignedHour, Distribution, EmployeeAssignments, SlotAssignment};
use crate::model::{DayKey, Employee, Schedule};
use std::cmp::Reverse;

/// Répartition gloutonne des employés sur les créneaux (jour, heure).
///
/// Jours dans l'ordre d'insertion ; dans un jour, les heures les plus gourmandes
/// en salles d'abord, puis les plus tôt. Les candidats sont classés par capacité
/// restante décroissante (tri stable : à égalité, l'ordre du roster l'emporte).
/// Un créneau sans assez de candidats reste partiellement vide.
pub fn distribute(employees: &[Employee], schedule: &Schedule) -> Distribution {
    let mut assigned: Vec<Vec<AssignedHour>> = vec![Vec::new(); employees.len()];
    let mut slots = Vec::with_capacity(schedule.days.iter().map(|d| d.hours.len()).sum());

    for day in &schedule.days {
        let weekday = day.key.weekday();

        let mut order: Vec<usize> = (0..day.hours.len()).collect();
        order.sort_by_key(|&idx| (Reverse(day.hours[idx].halls), day.hours[idx].hour));

        let mut picked: Vec<Vec<usize>> = vec![Vec::new(); day.hours.len()];
        for idx in order {
            let req = day.hours[idx];

            let mut candidates: Vec<(usize, u32)> = employees
                .iter()
                .enumerate()
                .filter_map(|(pos, employee)| {
                    let avail = employee.availability_on(weekday)?;
                    if !avail.covers(req.hour) {
                        return None;
                    }
                    let used = assigned_on(&assigned[pos], &day.key);
                    (used < avail.max_hours).then(|| (pos, avail.max_hours - used))
                })
                .collect();
            candidates.sort_by_key(|&(_, remaining)| Reverse(remaining));

            let mut chosen: Vec<usize> = candidates
                .into_iter()
                .take(req.halls as usize)
                .map(|(pos, _)| pos)
                .collect();
            for &pos in &chosen {
                assigned[pos].push(AssignedHour {
                    day: day.key,
                    hour: req.hour,
                });
            }
            // les salles sont occupées dans l'ordre du roster
            chosen.sort_unstable();
            picked[idx] = chosen;
        }

        for (req, chosen) in day.hours.iter().zip(picked) {
            slots.push(SlotAssignment {
                day: day.key,
                hour: req.hour,
                halls: req.halls,
                employees: chosen.into_iter().map(|pos| employees[pos].id.clone()).collect(),
            });
        }
    }

    let distribution = Distribution {
        slots,
        employees: employees
            .iter()
            .zip(assigned)
            .map(|(employee, hours)| EmployeeAssignments {
                employee: employee.id.clone(),
                hours,
            })
            .collect(),
    };

    #[cfg(feature = "logging")]
    tracing::debug!(
        slots = distribution.slots.len(),
        filled = distribution.filled_positions(),
        required = distribution.required_positions(),
        "distribution computed"
    );

    distribution
}

fn assigned_on(hours: &[AssignedHour], day: &DayKey) -> u32 {
    hours.iter().filter(|h| &h.day == day).count() as u32
}
