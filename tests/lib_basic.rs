#![forbid(unsafe_code)]
use chrono::{NaiveDate, Weekday};
use hallplan::{
    distribute, Availability, DayKey, Employee, ExportOptions, HourRequirement, Schedule,
    Scheduler, DEFAULT_HALL_PREFIX,
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

fn employee(name: &str, slots: &[(Weekday, &[u32], u32)]) -> Employee {
    slots.iter().fold(Employee::new(name), |e, (day, hours, max)| {
        e.with_availability(Availability::new(*day, hours.iter().copied(), *max).unwrap())
    })
}

/// Semaine chargée : plus de postes que de capacité.
fn busy_week() -> (Vec<Employee>, Schedule) {
    let employees = vec![
        employee("Alice", &[(Weekday::Mon, &[8, 9, 10, 11, 12], 3), (Weekday::Wed, &[9, 10], 2)]),
        employee("Bob", &[(Weekday::Mon, &[9, 10, 11], 2), (Weekday::Tue, &[14, 15, 16], 3)]),
        employee("Chloe", &[(Weekday::Mon, &[10, 11, 12, 13], 4)]),
        employee("Alice", &[(Weekday::Tue, &[14, 15], 1), (Weekday::Wed, &[9], 1)]),
        employee("Dan", &[(Weekday::Wed, &[9, 10, 11], 1)]),
    ];

    let mut schedule = Schedule::default();
    let entries: &[(u32, u32, u32)] = &[
        (22, 11, 2),
        (20, 9, 2),
        (20, 10, 3),
        (20, 11, 1),
        (20, 12, 2),
        (20, 13, 1),
        (21, 14, 2),
        (21, 15, 1),
        (21, 16, 1),
        (22, 9, 3),
        (22, 10, 2),
    ];
    for &(d, hour, halls) in entries {
        schedule.add_hour(
            date(d),
            HourRequirement::new(hour, halls).unwrap(),
            &[],
            DEFAULT_HALL_PREFIX,
        );
    }
    (employees, schedule)
}

#[test]
fn capacity_availability_and_slot_size_hold() {
    let (employees, schedule) = busy_week();
    let d = distribute(&employees, &schedule);

    for slot in &d.slots {
        assert!(slot.employees.len() <= slot.halls as usize);
        for id in &slot.employees {
            let e = employees.iter().find(|e| &e.id == id).unwrap();
            let avail = e.availability_on(slot.day.weekday()).unwrap();
            assert!(avail.covers(slot.hour));
        }
    }

    for e in &employees {
        for day in &schedule.days {
            let used = d.assigned_count(&e.id, &day.key);
            let max = e
                .availability_on(day.key.weekday())
                .map(|a| a.max_hours as usize)
                .unwrap_or(0);
            assert!(used <= max, "{} over cap on {}", e.name, day.key);
        }
    }

    assert!(d.filled_positions() < d.required_positions());
    assert_eq!(d.required_positions(), schedule.required_positions());
}

#[test]
fn day_keys_keep_insertion_order() {
    let (employees, schedule) = busy_week();
    let d = distribute(&employees, &schedule);
    assert_eq!(d.slots[0].day, DayKey::new(date(22)));
    assert_eq!(d.slots[0].hour, 11);
    assert_eq!(d.slots.len(), 11);
}

#[test]
fn running_twice_gives_same_result() {
    let (employees, schedule) = busy_week();
    let first = distribute(&employees, &schedule);
    let second = distribute(&employees, &schedule);
    assert_eq!(first, second);

    let mut s = Scheduler::new();
    s.add_employees(employees);
    s.state_mut().schedule = schedule;
    let opts = ExportOptions::default();
    assert_eq!(s.export_rows(&opts), s.export_rows(&opts));
}

#[test]
fn single_employee_end_to_end() {
    let mut s = Scheduler::new();
    s.add_employees(vec![employee("Alice", &[(Weekday::Mon, &[9, 10, 11], 2)])]);
    s.add_hour(
        date(20),
        HourRequirement::new(9, 1).unwrap(),
        &["Hall A".to_string()],
        DEFAULT_HALL_PREFIX,
    );

    let rows = s.export_rows(&ExportOptions::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fields(), ["Alice", "20.10.2025", "Hall A", "09:00-10:00"]);
}

#[test]
fn starvation_prefers_capacity_then_roster_order() {
    let mut schedule = Schedule::default();
    schedule.add_hour(date(20), HourRequirement::new(9, 1).unwrap(), &[], "Hall");

    let low = employee("Low", &[(Weekday::Mon, &[9], 1)]);
    let high = employee("High", &[(Weekday::Mon, &[9], 5)]);
    let d = distribute(&[low.clone(), high.clone()], &schedule);
    assert_eq!(d.slots[0].employees, vec![high.id.clone()]);

    let twin = employee("Twin", &[(Weekday::Mon, &[9], 5)]);
    let d = distribute(&[twin.clone(), high.clone()], &schedule);
    assert_eq!(d.slots[0].employees, vec![twin.id]);
    assert!(d.hours_for(&high.id).is_empty());
}
