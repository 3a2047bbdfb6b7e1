#![forbid(unsafe_code)]
#[cfg(not(feature = "xlsx"))]
use anyhow::bail;
use anyhow::Result;
use hallplan::{
    io,
    model::{parse_weekday, weekday_name, Availability, DayKey, Employee, HourRequirement},
    scheduler::Scheduler,
    storage::{JsonStorage, Storage},
    ExportOptions, ExportRow, PlanError,
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des employés par salle et par heure
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'état (employés + besoins)
    #[arg(long, global = true, default_value = "scheduler_data.json")]
    state: String,

    /// Préfixe des noms de salles générés
    #[arg(long, global = true, default_value = hallplan::DEFAULT_HALL_PREFIX)]
    hall_prefix: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un employé (ou une disponibilité) pour un jour de la semaine
    AddEmployee {
        #[arg(long)]
        name: String,
        /// Monday, Tuesday, ... (ou abrégé)
        #[arg(long)]
        day: String,
        /// liste "9,10,11"
        #[arg(long)]
        hours: String,
        #[arg(long)]
        max_hours: u32,
    },

    /// Retirer un employé par son numéro (voir list-employees)
    RemoveEmployee {
        #[arg(long)]
        index: usize,
    },

    /// Lister les employés
    ListEmployees,

    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un besoin horaire
    AddHour {
        /// dd.mm.yyyy ou yyyy-mm-dd
        #[arg(long)]
        date: String,
        #[arg(long)]
        hour: u32,
        #[arg(long, default_value_t = 1)]
        halls: u32,
        /// noms "Salle A,Salle B"
        #[arg(long, default_value = "")]
        names: String,
    },

    /// Retirer toutes les entrées d'une heure pour une date
    RemoveHour {
        #[arg(long)]
        date: String,
        #[arg(long)]
        hour: u8,
    },

    /// Lister les besoins
    ListSchedule,

    /// Importer des besoins depuis un CSV
    ImportSchedule {
        #[arg(long)]
        csv: String,
    },

    /// Calculer la répartition et l'afficher
    Distribute,

    /// Répartir puis exporter (CSV sur la sortie standard par défaut)
    Export {
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        /// Classeur XLSX (feature `xlsx`)
        #[arg(long)]
        out_xlsx: Option<String>,
        /// Nom affiché pour une salle sans employé
        #[arg(long, default_value = hallplan::DEFAULT_PLACEHOLDER)]
        placeholder: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.state)?;
    let mut scheduler = Scheduler::from_state(storage.load_or_default()?);

    let code = match cli.cmd {
        Commands::AddEmployee {
            name,
            day,
            hours,
            max_hours,
        } => {
            let day = parse_weekday(&day)?;
            let hours = io::parse_hours(&hours)?;
            let availability = Availability::new(day, hours, max_hours)?;
            scheduler.add_employees(vec![Employee::new(name).with_availability(availability)]);
            storage.save(scheduler.state())?;
            0
        }
        Commands::RemoveEmployee { index } => {
            let position = index
                .checked_sub(1)
                .ok_or_else(|| PlanError::UnknownEmployee(format!("#{index}")))?;
            let removed = scheduler.remove_employee(position)?;
            storage.save(scheduler.state())?;
            println!("removed {}", removed.name);
            0
        }
        Commands::ListEmployees => {
            for (idx, employee) in scheduler.state().employees.iter().enumerate() {
                for avail in &employee.availability {
                    let hours: Vec<String> =
                        avail.hours_available.iter().map(u8::to_string).collect();
                    println!(
                        "{} | {} | {} | {} | max {}",
                        idx + 1,
                        employee.name,
                        weekday_name(avail.day),
                        hours.join(","),
                        avail.max_hours
                    );
                }
            }
            0
        }
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            scheduler.add_employees(employees);
            storage.save(scheduler.state())?;
            0
        }
        Commands::AddHour {
            date,
            hour,
            halls,
            names,
        } => {
            let date = io::parse_date(&date)?;
            let requirement = HourRequirement::new(hour, halls)?;
            let names = io::parse_hall_names(&names);
            scheduler.add_hour(date, requirement, &names, &cli.hall_prefix);
            storage.save(scheduler.state())?;
            0
        }
        Commands::RemoveHour { date, hour } => {
            let key = DayKey::new(io::parse_date(&date)?);
            scheduler.remove_hour(&key, hour)?;
            storage.save(scheduler.state())?;
            0
        }
        Commands::ListSchedule => {
            for day in &scheduler.state().schedule.days {
                for req in &day.hours {
                    println!(
                        "{} | {:02} | {} | {}",
                        day.key,
                        req.hour,
                        req.halls,
                        day.hall_names(req.hour).join(", ")
                    );
                }
            }
            0
        }
        Commands::ImportSchedule { csv } => {
            let added = io::import_schedule_csv(
                csv,
                &mut scheduler.state_mut().schedule,
                &cli.hall_prefix,
            )?;
            storage.save(scheduler.state())?;
            println!("imported {added} requirement(s)");
            0
        }
        Commands::Distribute => {
            let distribution = scheduler.distribute();
            let state = scheduler.state();
            for slot in &distribution.slots {
                let names: Vec<&str> = slot
                    .employees
                    .iter()
                    .map(|id| {
                        state
                            .find_employee_by_id(id)
                            .map(|e| e.name.as_str())
                            .unwrap_or(id.as_str())
                    })
                    .collect();
                println!(
                    "{} | {:02}:00 | {}/{} | {}",
                    slot.day,
                    slot.hour,
                    slot.employees.len(),
                    slot.halls,
                    if names.is_empty() { "-".to_string() } else { names.join(", ") }
                );
            }
            println!(
                "filled {}/{}",
                distribution.filled_positions(),
                distribution.required_positions()
            );
            // Code 2 = WARNING/INCOMPLETE
            if distribution.is_complete() {
                0
            } else {
                2
            }
        }
        Commands::Export {
            out_csv,
            out_json,
            out_xlsx,
            placeholder,
        } => {
            let opts = ExportOptions {
                placeholder,
                hall_prefix: cli.hall_prefix.clone(),
            };
            let rows = scheduler.export_rows(&opts);
            let mut written = false;
            if let Some(path) = out_csv {
                io::export_rows_csv(path, &rows)?;
                written = true;
            }
            if let Some(path) = out_json {
                io::export_rows_json(path, &rows)?;
                written = true;
            }
            if let Some(path) = out_xlsx {
                export_xlsx(&path, &rows)?;
                written = true;
            }
            if !written {
                io::write_rows_csv(std::io::stdout().lock(), &rows)?;
            }
            0
        }
    };

    std::process::exit(code);
}

#[cfg(feature = "xlsx")]
fn export_xlsx(path: &str, rows: &[ExportRow]) -> Result<()> {
    io::export_rows_xlsx(path, rows)
}

#[cfg(not(feature = "xlsx"))]
fn export_xlsx(_path: &str, _rows: &[ExportRow]) -> Result<()> {
    bail!("built without the `xlsx` feature")
}
