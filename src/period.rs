//! Period labels ("2024 Q1", "2024-03", "2024-03-31") and inclusive period ranges.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordered key for a period label. Recognised labels order chronologically
/// and before unrecognised ones; unrecognised labels order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodKey {
    Quarter { year: i32, quarter: u32 },
    Month(NaiveDate),
    Day(NaiveDate),
    Label(String),
}

impl PeriodKey {
    pub fn parse(label: &str) -> Self {
        let s = label.trim();
        if let Some((year, quarter)) = parse_quarter(s) {
            return Self::Quarter { year, quarter };
        }
        if s.len() == 7 {
            if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
                return Self::Month(d);
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Self::Day(d);
        }
        Self::Label(s.to_string())
    }

    /// First day covered by the period.
    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            Self::Quarter { year, quarter } => NaiveDate::from_ymd_opt(*year, (quarter - 1) * 3 + 1, 1),
            Self::Month(d) => NaiveDate::from_ymd_opt(d.year(), d.month(), 1),
            Self::Day(d) => Some(*d),
            Self::Label(_) => None,
        }
    }

    /// Last day covered by the period.
    pub fn end(&self) -> Option<NaiveDate> {
        let months = match self {
            Self::Quarter { .. } => 3,
            Self::Month(_) => 1,
            Self::Day(d) => return Some(*d),
            Self::Label(_) => return None,
        };
        self.start()?.checked_add_months(Months::new(months))?.pred_opt()
    }

    // Finer periods sort first when two periods start on the same day.
    fn granularity(&self) -> u8 {
        match self {
            Self::Day(_) => 0,
            Self::Month(_) => 1,
            Self::Quarter { .. } => 2,
            Self::Label(_) => 3,
        }
    }
}

/// Accepts "2024 Q1", "2024-Q1", "2024_q1" and "2024Q1".
fn parse_quarter(s: &str) -> Option<(i32, u32)> {
    if s.len() < 6 || !s.is_char_boundary(4) {
        return None;
    }
    let (year, rest) = s.split_at(4);
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let rest = rest.trim_start_matches([' ', '-', '_']);
    let digits = rest.strip_prefix('Q').or_else(|| rest.strip_prefix('q'))?;
    let quarter: u32 = digits.parse().ok()?;
    if !(1..=4).contains(&quarter) {
        return None;
    }
    Some((year.parse().ok()?, quarter))
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.start(), other.start()) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| self.granularity().cmp(&other.granularity())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (self, other) {
                (Self::Label(a), Self::Label(b)) => a.cmp(b),
                _ => self.granularity().cmp(&other.granularity()),
            },
        }
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Inclusive range of periods. An open end accepts everything on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl PeriodRange {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// A period is inside when it overlaps the range, so a month or day falling in a
    /// quarter bound counts as inside that quarter. Unrecognised labels compare by order.
    pub fn contains(&self, label: &str) -> bool {
        let key = PeriodKey::parse(label);
        let after_from = self.from.as_deref().map_or(true, |from| {
            let from = PeriodKey::parse(from);
            match (key.end(), from.start()) {
                (Some(end), Some(start)) => end >= start,
                _ => key >= from,
            }
        });
        let before_to = self.to.as_deref().map_or(true, |to| {
            let to = PeriodKey::parse(to);
            match (key.start(), to.end()) {
                (Some(start), Some(end)) => start <= end,
                _ => key <= to,
            }
        });
        after_from && before_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quarter_spellings() {
        for s in ["2024 Q1", "2024-Q1", "2024_q1", "2024Q1", " 2024 Q1 "] {
            assert_eq!(
                PeriodKey::parse(s),
                PeriodKey::Quarter {
                    year: 2024,
                    quarter: 1
                },
                "{s}"
            );
        }
        assert!(matches!(PeriodKey::parse("2024 Q5"), PeriodKey::Label(_)));
    }

    #[test]
    fn parses_month_and_day() {
        assert!(matches!(PeriodKey::parse("2024-03"), PeriodKey::Month(_)));
        assert!(matches!(PeriodKey::parse("2024-03-31"), PeriodKey::Day(_)));
        assert!(matches!(PeriodKey::parse("March"), PeriodKey::Label(_)));
    }

    #[test]
    fn quarters_order_across_years() {
        assert!(PeriodKey::parse("2023 Q4") < PeriodKey::parse("2024 Q1"));
        assert!(PeriodKey::parse("2024 Q2") > PeriodKey::parse("2024-03-31"));
    }

    #[test]
    fn period_ends() {
        let end = |s: &str| PeriodKey::parse(s).end();
        assert_eq!(end("2024 Q4"), NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(end("2024 Q1"), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(end("2024-02"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(end("2024-05-15"), NaiveDate::from_ymd_opt(2024, 5, 15));
        assert_eq!(end("Total"), None);
    }

    #[test]
    fn recognised_before_labels() {
        assert!(PeriodKey::parse("2099 Q4") < PeriodKey::parse("Total"));
        assert!(PeriodKey::parse("a") < PeriodKey::parse("b"));
    }

    #[test]
    fn range_is_inclusive() {
        let range = PeriodRange::new(Some("2023 Q4".into()), Some("2024 Q4".into()));
        assert!(!range.contains("2023 Q3"));
        assert!(range.contains("2023 Q4"));
        assert!(range.contains("2024 Q2"));
        assert!(range.contains("2024 Q4"));
        assert!(!range.contains("2025 Q1"));
    }

    #[test]
    fn range_bounds_cover_whole_quarters() {
        let to_q4 = PeriodRange::new(None, Some("2024 Q4".into()));
        assert!(to_q4.contains("2024-11"));
        assert!(to_q4.contains("2024-12-31"));
        assert!(!to_q4.contains("2025-01"));
        assert!(!to_q4.contains("2025-01-01"));

        let from_q2 = PeriodRange::new(Some("2024 Q2".into()), None);
        assert!(from_q2.contains("2024-04"));
        assert!(from_q2.contains("2024-04-01"));
        assert!(from_q2.contains("2024-05-15"));
        assert!(!from_q2.contains("2024-03"));
        assert!(!from_q2.contains("2024-03-31"));
    }

    #[test]
    fn month_bounds_against_quarters_and_labels() {
        let range = PeriodRange::new(Some("2024-02".into()), Some("2024-05".into()));
        assert!(range.contains("2024 Q1"));
        assert!(range.contains("2024 Q2"));
        assert!(!range.contains("2023 Q4"));
        assert!(!range.contains("2024 Q3"));
        assert!(range.contains("2024-02-29"));
        assert!(!range.contains("2024-06-01"));
        assert!(!range.contains("Total"));
    }

    #[test]
    fn open_range_accepts_all() {
        let range = PeriodRange::default();
        assert!(range.is_unbounded());
        assert!(range.contains("anything"));
        let from_only = PeriodRange::new(Some("2024 Q1".into()), None);
        assert!(from_only.contains("2030 Q1"));
        assert!(!from_only.contains("2023 Q1"));
    }
}
