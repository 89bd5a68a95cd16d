use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::profiles::{Gender, Profile};

/// Trailing window counted as "recent".
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterAnalytics {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub recent: usize,
    pub top_taluk: String,
    pub top_education: String,
    pub top_occupation: String,
}

impl RosterAnalytics {
    /// `None` for an empty collection.
    pub fn compute(profiles: &[Profile], now: DateTime<Utc>) -> Option<Self> {
        if profiles.is_empty() {
            return None;
        }

        let window_start = now - Duration::days(RECENT_WINDOW_DAYS);
        let count_gender =
            |gender: Gender| profiles.iter().filter(|p| p.fields.gender == gender).count();

        Some(Self {
            total: profiles.len(),
            male: count_gender(Gender::Male),
            female: count_gender(Gender::Female),
            recent: profiles
                .iter()
                .filter(|p| {
                    p.created_at
                        .parse()
                        .is_some_and(|created| created > window_start)
                })
                .count(),
            top_taluk: most_frequent(
                profiles.iter().map(|p| p.fields.taluk.as_str()),
            )?,
            top_education: most_frequent(
                profiles.iter().map(|p| p.fields.education.as_str()),
            )?,
            top_occupation: most_frequent(
                profiles.iter().map(|p| p.fields.occupation.as_str()),
            )?,
        })
    }
}

/// Most frequent value; ties go to the value seen first.
pub fn most_frequent<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let max = counts.values().copied().max()?;
    order
        .into_iter()
        .find(|value| counts.get(value) == Some(&max))
        .map(str::to_string)
}
