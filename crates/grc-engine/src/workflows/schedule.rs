use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Reviews falling due within this many days are flagged for committee attention.
pub const DUE_SOON_WINDOW_DAYS: i64 = 30;

/// Position of a review date relative to the evaluation date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewWindow {
    pub days_until: Option<i64>,
    pub overdue: bool,
    pub due_soon: bool,
}

impl ReviewWindow {
    /// Missing or unparsable dates yield an unknown window with both flags cleared.
    pub fn evaluate(review_date: Option<&str>, today: NaiveDate) -> Self {
        let days_until = review_date
            .and_then(parse_iso_date)
            .map(|date| (date - today).num_days());

        match days_until {
            Some(days) => Self {
                days_until: Some(days),
                overdue: days < 0,
                due_soon: (0..=DUE_SOON_WINDOW_DAYS).contains(&days),
            },
            None => Self::default(),
        }
    }

    pub fn alert(&self) -> Option<ReviewAlertKind> {
        if self.overdue {
            Some(ReviewAlertKind::Overdue)
        } else if self.due_soon {
            Some(ReviewAlertKind::DueSoon)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAlertKind {
    Overdue,
    DueSoon,
}

/// Committee attention line for a single review date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewAlert {
    pub subject: String,
    pub kind: ReviewAlertKind,
    pub days: i64,
    pub message: String,
}

impl ReviewAlert {
    fn new(subject: &str, kind: ReviewAlertKind, days: i64) -> Self {
        let message = match kind {
            ReviewAlertKind::Overdue => format!("{subject} overdue by {} days", days.abs()),
            ReviewAlertKind::DueSoon => format!("{subject} due in {days} days"),
        };

        Self {
            subject: subject.to_string(),
            kind,
            days,
            message,
        }
    }
}

/// Overdue reviews first, then those due soon; input order within each group.
pub(crate) fn review_alerts<'a, I>(windows: I) -> Vec<ReviewAlert>
where
    I: IntoIterator<Item = (&'a str, ReviewWindow)>,
{
    let mut overdue = Vec::new();
    let mut due_soon = Vec::new();

    for (subject, window) in windows {
        match (window.alert(), window.days_until) {
            (Some(ReviewAlertKind::Overdue), Some(days)) => {
                overdue.push(ReviewAlert::new(subject, ReviewAlertKind::Overdue, days))
            }
            (Some(ReviewAlertKind::DueSoon), Some(days)) => {
                due_soon.push(ReviewAlert::new(subject, ReviewAlertKind::DueSoon, days))
            }
            _ => {}
        }
    }

    overdue.extend(due_soon);
    overdue
}

pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
