use crate::export::{ExportRow, HEADERS};
use crate::model::{parse_weekday, Availability, Employee, HourRequirement, Schedule};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV: header `name,day,hours,max_hours`.
///
/// Les lignes partageant le même nom sont fusionnées en un seul employé
/// (une disponibilité par jour). `hours` : entiers séparés par `;`, `,` ou espaces.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;
    let mut out: Vec<Employee> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?;
        let day = rec.get(1).context("missing day")?;
        let hours = rec.get(2).context("missing hours")?;
        let max_hours = rec.get(3).context("missing max_hours")?;
        if name.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let day = parse_weekday(day).with_context(|| format!("invalid day for {name}"))?;
        let hours = parse_hours(hours).with_context(|| format!("invalid hours for {name}"))?;
        let max_hours: u32 = max_hours
            .parse()
            .with_context(|| format!("invalid max_hours for {name}"))?;
        let availability = Availability::new(day, hours, max_hours)?;

        match out.iter_mut().find(|e| e.name == name) {
            Some(employee) => employee.set_availability(availability),
            None => out.push(Employee::new(name).with_availability(availability)),
        }
    }
    Ok(out)
}

/// Import de besoins: header `date,hour,halls,hall_names` (noms séparés par `;`).
///
/// Retourne le nombre d'entrées ajoutées à `schedule`.
pub fn import_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &mut Schedule,
    hall_prefix: &str,
) -> anyhow::Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;
    let mut added = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let date = parse_date(rec.get(0).context("missing date")?)?;
        let hour: u32 = rec.get(1).context("missing hour")?.parse().context("hour")?;
        let halls: u32 = rec.get(2).context("missing halls")?.parse().context("halls")?;
        let names = parse_hall_names(rec.get(3).unwrap_or(""));
        let requirement = HourRequirement::new(hour, halls)?;
        schedule.add_hour(date, requirement, &names, hall_prefix);
        added += 1;
    }
    Ok(added)
}

/// Liste d'heures: `9,10,11`, `9;10;11` ou `9 10 11`.
pub fn parse_hours(raw: &str) -> anyhow::Result<Vec<u32>> {
    let hours = raw
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            chunk
                .parse::<u32>()
                .with_context(|| format!("not an hour: {chunk}"))
        })
        .collect::<anyhow::Result<Vec<u32>>>()?;
    if hours.is_empty() {
        bail!("expected at least one hour");
    }
    Ok(hours)
}

/// Date `dd.mm.yyyy` ou ISO `yyyy-mm-dd`.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .with_context(|| format!("invalid date: {raw}"))
}

/// Noms de salles séparés par `;` ou `,`, vides ignorés.
pub fn parse_hall_names(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Écrit les lignes en CSV (avec en-têtes) vers n'importe quel writer.
pub fn write_rows_csv<W: std::io::Write>(writer: W, rows: &[ExportRow]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(writer);
    w.write_record(HEADERS)?;
    for row in rows {
        w.write_record(row.fields())?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des lignes: header `Employee,Date,Hall,Hours`
pub fn export_rows_csv<P: AsRef<Path>>(path: P, rows: &[ExportRow]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_rows_csv(file, rows)
}

/// Export JSON des lignes (jolie mise en forme)
pub fn export_rows_json<P: AsRef<Path>>(path: P, rows: &[ExportRow]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export XLSX: une feuille "Schedule", largeur de colonne = plus longue cellule + 2.
#[cfg(feature = "xlsx")]
pub fn export_rows_xlsx<P: AsRef<Path>>(path: P, rows: &[ExportRow]) -> anyhow::Result<()> {
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Schedule")?;

    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let line = idx as u32 + 1;
        for (col, value) in row.fields().iter().enumerate() {
            sheet.write_string(line, col as u16, *value)?;
        }
    }

    for (col, width) in column_widths(rows).into_iter().enumerate() {
        sheet.set_column_width(col as u16, f64::from(width + 2))?;
    }

    workbook
        .save(path.as_ref())
        .with_context(|| format!("writing {}", path.as_ref().display()))?;
    Ok(())
}

/// Largeur (en caractères) de la plus longue cellule de chaque colonne, en-têtes compris.
pub fn column_widths(rows: &[ExportRow]) -> [u32; 4] {
    let mut widths = HEADERS.map(|h| h.chars().count() as u32);
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.fields()) {
            *width = (*width).max(value.chars().count() as u32);
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn hours_accept_several_separators() {
        assert_eq!(parse_hours("9,10; 11 12").unwrap(), vec![9, 10, 11, 12]);
        assert!(parse_hours("9,x").is_err());
        assert!(parse_hours(" ").is_err());
    }

    #[test]
    fn dates_in_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        assert_eq!(parse_date("20.10.2025").unwrap(), expected);
        assert_eq!(parse_date("2025-10-20").unwrap(), expected);
        assert!(parse_date("20/10/2025").is_err());
    }

    #[test]
    fn employees_with_same_name_are_merged() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,day,hours,max_hours").unwrap();
        writeln!(file, "Alice,Monday,\"9,10,11\",2").unwrap();
        writeln!(file, "Bob,tue,14;15,1").unwrap();
        writeln!(file, "Alice,Wednesday,8,1").unwrap();
        file.flush().unwrap();

        let employees = import_employees_csv(file.path()).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].availability.len(), 2);
        assert!(employees[0].availability_on(Weekday::Wed).unwrap().covers(8));
        assert_eq!(employees[1].availability_on(Weekday::Tue).unwrap().max_hours, 1);
    }

    #[test]
    fn employee_row_with_bad_hour_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,day,hours,max_hours").unwrap();
        writeln!(file, "Alice,Monday,25,2").unwrap();
        file.flush().unwrap();
        assert!(import_employees_csv(file.path()).is_err());
    }

    #[test]
    fn schedule_rows_are_appended_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "date,hour,halls,hall_names").unwrap();
        writeln!(file, "21.10.2025,10,2,Red;Blue").unwrap();
        writeln!(file, "2025-10-20,9,1").unwrap();
        file.flush().unwrap();

        let mut schedule = Schedule::default();
        assert_eq!(import_schedule_csv(file.path(), &mut schedule, "Hall").unwrap(), 2);
        assert_eq!(schedule.days[0].key.to_string(), "21.10.2025 (Tuesday)");
        assert_eq!(schedule.days[0].hall_names(10), ["Red", "Blue"]);
        assert_eq!(schedule.days[1].hall_names(9), ["Hall 1"]);
    }

    #[test]
    fn widths_cover_headers_and_cells() {
        let rows = vec![ExportRow {
            employee: "Maximilian".into(),
            date: "20.10.2025".into(),
            hall: "A".into(),
            time_range: "09:00-10:00".into(),
        }];
        assert_eq!(column_widths(&rows), [10, 10, 4, 11]);
    }
}
