use crate::date::format_date;
use crate::reminder::ReminderType;
use chrono::{Datelike, NaiveDate};
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Discretized due date of a system reminder. Two runs that see the same
/// underlying data land in the same bucket even if they run on different
/// days, which keeps the reminder id stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueBucket {
    /// The computed event date itself, e.g. the expected heat
    Date(NaiveDate),
    Year(i32),
    Month(i32, u32),
    /// A named occurrence such as a litter milestone
    Key(String),
    /// Separates several rules that share a reminder type and have no
    /// related entity
    Scoped(&'static str, Box<DueBucket>),
}

impl DueBucket {
    fn encode(&self) -> String {
        match self {
            Self::Date(date) => format_date(date),
            Self::Year(year) => format!("{:04}", year),
            Self::Month(year, month) => format!("{:04}-{:02}", year, month),
            Self::Key(key) => key.clone(),
            Self::Scoped(scope, inner) => format!("{}/{}", scope, inner.encode()),
        }
    }

    pub fn year_of(date: NaiveDate) -> Self {
        Self::Year(date.year())
    }

    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month(date.year(), date.month())
    }

    pub fn scoped(scope: &'static str, inner: DueBucket) -> Self {
        Self::Scoped(scope, Box::new(inner))
    }
}

/// Deterministic id of a system reminder: `<type>-<16 hex chars>`
pub fn reminder_id(reminder_type: ReminderType, related_id: Option<&str>, bucket: &DueBucket) -> String {
    let mut hasher = Sha256::new();
    hasher.update(reminder_type.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(related_id.unwrap_or("").as_bytes());
    hasher.update(b"|");
    hasher.update(bucket.encode().as_bytes());
    let digest = hasher.finalize();

    let mut id = String::with_capacity(reminder_type.as_str().len() + 17);
    id.push_str(reminder_type.as_str());
    id.push('-');
    for byte in digest.iter().take(8) {
        let _ = write!(id, "{:02x}", byte);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ids_are_stable() {
        let a = reminder_id(ReminderType::Heat, Some("dog-a"), &DueBucket::Date(ymd(2026, 6, 1)));
        let b = reminder_id(ReminderType::Heat, Some("dog-a"), &DueBucket::Date(ymd(2026, 6, 1)));
        assert_eq!(a, b);
        assert!(a.starts_with("heat-"));
        assert_eq!(a.len(), "heat-".len() + 16);
    }

    #[test]
    fn ids_differ_per_component() {
        let base = reminder_id(ReminderType::Heat, Some("dog-a"), &DueBucket::Year(2026));
        assert_ne!(base, reminder_id(ReminderType::Vaccination, Some("dog-a"), &DueBucket::Year(2026)));
        assert_ne!(base, reminder_id(ReminderType::Heat, Some("dog-b"), &DueBucket::Year(2026)));
        assert_ne!(base, reminder_id(ReminderType::Heat, Some("dog-a"), &DueBucket::Year(2027)));
        assert_ne!(base, reminder_id(ReminderType::Heat, None, &DueBucket::Year(2026)));
        assert_ne!(
            reminder_id(ReminderType::General, None, &DueBucket::scoped("a", DueBucket::Year(2026))),
            reminder_id(ReminderType::General, None, &DueBucket::scoped("b", DueBucket::Year(2026)))
        );
    }

    #[test]
    fn buckets_ignore_the_day_of_generation() {
        assert_eq!(DueBucket::year_of(ymd(2026, 1, 1)), DueBucket::year_of(ymd(2026, 12, 31)));
        assert_eq!(DueBucket::month_of(ymd(2026, 3, 1)), DueBucket::month_of(ymd(2026, 3, 31)));
        assert_ne!(DueBucket::month_of(ymd(2026, 3, 31)), DueBucket::month_of(ymd(2026, 4, 1)));
    }
}
