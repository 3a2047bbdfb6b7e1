use crate::error::PlanError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Nombre maximal de salles pour une même heure.
pub const MAX_HALLS: u32 = 10;

/// Préfixe des noms de salles générés quand l'utilisateur en fournit moins que requis.
pub const DEFAULT_HALL_PREFIX: &str = "Hall";

/// Identifiant fort pour Employee (les noms ne sont pas uniques)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Nom complet du jour ("Monday", ...), tel qu'affiché dans les clés de jour.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepte les noms complets ou abrégés, sans tenir compte de la casse.
pub fn parse_weekday(raw: &str) -> Result<Weekday, PlanError> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| PlanError::UnknownWeekday(raw.trim().to_string()))
}

mod weekday_serde {
    use super::{parse_weekday, weekday_name};
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(d)?;
        parse_weekday(&raw).map_err(D::Error::custom)
    }
}

/// Disponibilité d'un employé pour un jour de la semaine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(with = "weekday_serde")]
    pub day: Weekday,
    pub hours_available: BTreeSet<u8>,
    pub max_hours: u32,
}

impl Availability {
    /// Valide les heures (0..=23, au moins une) et le plafond journalier (>= 1).
    pub fn new<I>(day: Weekday, hours: I, max_hours: u32) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = u32>,
    {
        if max_hours == 0 {
            return Err(PlanError::InvalidMaxHours(max_hours));
        }
        let mut hours_available = BTreeSet::new();
        for hour in hours {
            hours_available.insert(checked_hour(hour)?);
        }
        if hours_available.is_empty() {
            return Err(PlanError::EmptyHours);
        }
        Ok(Self {
            day,
            hours_available,
            max_hours,
        })
    }

    pub fn covers(&self, hour: u8) -> bool {
        self.hours_available.contains(&hour)
    }
}

/// Employé et ses disponibilités hebdomadaires (au plus une entrée par jour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default = "EmployeeId::random")]
    pub id: EmployeeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability: Vec<Availability>,
}

impl Employee {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: EmployeeId::random(),
            name: name.into(),
            availability: Vec::new(),
        }
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.set_availability(availability);
        self
    }

    /// Remplace la disponibilité existante pour ce jour, sinon l'ajoute.
    pub fn set_availability(&mut self, availability: Availability) {
        match self
            .availability
            .iter_mut()
            .find(|a| a.day == availability.day)
        {
            Some(slot) => *slot = availability,
            None => self.availability.push(availability),
        }
    }

    pub fn availability_on(&self, day: Weekday) -> Option<&Availability> {
        self.availability.iter().find(|a| a.day == day)
    }
}

/// Clé de jour : date calendaire + nom du jour, rendue `"dd.mm.yyyy (Weekday)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    date: NaiveDate,
}

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Partie date seule, `dd.mm.yyyy`.
    pub fn date_label(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.date_label(), weekday_name(self.weekday()))
    }
}

impl FromStr for DayKey {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanError::InvalidDayKey(s.to_string());
        let (date_raw, rest) = s.trim().split_once(" (").ok_or_else(invalid)?;
        let day_raw = rest.strip_suffix(')').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date_raw.trim(), "%d.%m.%Y").map_err(|_| invalid())?;
        let day = parse_weekday(day_raw)?;
        if day != date.weekday() {
            return Err(invalid());
        }
        Ok(Self { date })
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Besoin pour une heure donnée : nombre de salles à pourvoir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRequirement {
    pub hour: u8,
    pub halls: u32,
}

impl HourRequirement {
    pub fn new(hour: u32, halls: u32) -> Result<Self, PlanError> {
        if halls == 0 || halls > MAX_HALLS {
            return Err(PlanError::InvalidHalls(halls));
        }
        Ok(Self {
            hour: checked_hour(hour)?,
            halls,
        })
    }
}

/// Besoins d'une journée, dans l'ordre de saisie, avec les noms de salles par heure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub key: DayKey,
    #[serde(default)]
    pub hours: Vec<HourRequirement>,
    #[serde(default)]
    pub hall_names: BTreeMap<u8, Vec<String>>,
}

impl DaySchedule {
    pub fn new(key: DayKey) -> Self {
        Self {
            key,
            hours: Vec::new(),
            hall_names: BTreeMap::new(),
        }
    }

    pub fn hall_names(&self, hour: u8) -> &[String] {
        self.hall_names.get(&hour).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nom de la salle `index` (0-based) à cette heure, généré si absent.
    pub fn hall_name(&self, hour: u8, index: usize, prefix: &str) -> String {
        self.hall_names(hour)
            .get(index)
            .cloned()
            .unwrap_or_else(|| generated_hall_name(prefix, index))
    }
}

/// Ensemble des besoins ; l'ordre d'insertion des jours est conservé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schedule {
    #[serde(default)]
    pub days: Vec<DaySchedule>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, key: &DayKey) -> Option<&DaySchedule> {
        self.days.iter().find(|d| &d.key == key)
    }

    /// Ajoute un besoin horaire. Une heure déjà présente n'est pas fusionnée :
    /// une seconde entrée est ajoutée, et ses noms de salles remplacent les précédents.
    pub fn add_hour(
        &mut self,
        date: NaiveDate,
        requirement: HourRequirement,
        names: &[String],
        hall_prefix: &str,
    ) {
        let key = DayKey::new(date);
        let pos = match self.days.iter().position(|d| d.key == key) {
            Some(pos) => pos,
            None => {
                self.days.push(DaySchedule::new(key));
                self.days.len() - 1
            }
        };
        let day = &mut self.days[pos];
        day.hours.push(requirement);
        day.hall_names.insert(
            requirement.hour,
            pad_hall_names(names, requirement.halls, hall_prefix),
        );
    }

    /// Retire toutes les entrées de cette heure ; le jour disparaît s'il devient vide.
    pub fn remove_hour(&mut self, key: &DayKey, hour: u8) -> Result<usize, PlanError> {
        let pos = self
            .days
            .iter()
            .position(|d| &d.key == key)
            .ok_or_else(|| PlanError::UnknownDay(key.to_string()))?;
        let day = &mut self.days[pos];
        let before = day.hours.len();
        day.hours.retain(|h| h.hour != hour);
        let removed = before - day.hours.len();
        if removed == 0 {
            return Err(PlanError::UnknownHour {
                day: key.to_string(),
                hour,
            });
        }
        if day.hours.is_empty() {
            self.days.remove(pos);
        } else {
            day.hall_names.remove(&hour);
        }
        Ok(removed)
    }

    /// Nombre total de postes (salle × heure) à pourvoir.
    pub fn required_positions(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.hours.iter())
            .map(|h| h.halls as usize)
            .sum()
    }
}

/// État persistant complet : employés + besoins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlannerState {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub schedule: Schedule,
}

impl PlannerState {
    pub fn find_employee_by_id<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Retire l'employé à la position donnée (0-based, ordre du roster).
    pub fn remove_employee(&mut self, index: usize) -> Result<Employee, PlanError> {
        if index >= self.employees.len() {
            return Err(PlanError::UnknownEmployee(format!("#{}", index + 1)));
        }
        Ok(self.employees.remove(index))
    }
}

/// Tronque à `halls` noms (vides ignorés) et complète avec `"<prefix> N"`.
pub fn pad_hall_names(names: &[String], halls: u32, prefix: &str) -> Vec<String> {
    let halls = halls as usize;
    let mut out: Vec<String> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .take(halls)
        .map(str::to_string)
        .collect();
    for index in out.len()..halls {
        out.push(generated_hall_name(prefix, index));
    }
    out
}

fn generated_hall_name(prefix: &str, index: usize) -> String {
    format!("{prefix} {}", index + 1)
}

fn checked_hour(hour: u32) -> Result<u8, PlanError> {
    u8::try_from(hour)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or(PlanError::InvalidHour(hour))
}
