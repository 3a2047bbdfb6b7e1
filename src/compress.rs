use serde::{Serialize, Serializer};
use std::fmt;

/// Plage horaire semi-ouverte `[start, end)` en heures pleines ; `end` peut valoir 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u8,
    pub end: u8,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Fusionne des heures triées en plages contiguës minimales.
///
/// `[9, 10, 11, 14]` donne `09:00-12:00` et `14:00-15:00`.
pub fn compress_hours(hours: &[u8]) -> Vec<TimeRange> {
    let Some((&first, rest)) = hours.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let (mut start, mut last) = (first, first);
    for &hour in rest {
        if u16::from(hour) == u16::from(last) + 1 {
            last = hour;
        } else {
            out.push(closed(start, last));
            start = hour;
            last = hour;
        }
    }
    out.push(closed(start, last));
    out
}

fn closed(start: u8, last: u8) -> TimeRange {
    TimeRange {
        start,
        end: last.saturating_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(hours: &[u8]) -> Vec<String> {
        compress_hours(hours).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn merges_consecutive_hours() {
        assert_eq!(rendered(&[9, 10, 11, 14]), ["09:00-12:00", "14:00-15:00"]);
    }

    #[test]
    fn empty_and_single() {
        assert!(rendered(&[]).is_empty());
        assert_eq!(rendered(&[5]), ["05:00-06:00"]);
    }

    #[test]
    fn last_hour_of_day_ends_at_24() {
        assert_eq!(rendered(&[22, 23]), ["22:00-24:00"]);
    }

    #[test]
    fn every_gap_starts_a_new_range() {
        assert_eq!(
            rendered(&[0, 2, 3, 5]),
            ["00:00-01:00", "02:00-04:00", "05:00-06:00"]
        );
    }
}
