use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::analytics::RosterAnalytics;
use super::export::{export_csv, CsvFormat, ExportError};
use super::filter::{filter_profiles, taluk_options, RosterFilters};
use crate::profiles::{Profile, ProfileId};

/// Immutable roster snapshot: raw collection, active filters, and everything derived
/// from them. Updates produce a new snapshot.
#[derive(Debug, Clone)]
pub struct RosterView {
    profiles: Arc<[Profile]>,
    filters: RosterFilters,
    visible: Vec<Profile>,
    analytics: Option<RosterAnalytics>,
    computed_at: DateTime<Utc>,
}

impl RosterView {
    pub fn new(profiles: Vec<Profile>, filters: RosterFilters, now: DateTime<Utc>) -> Self {
        let analytics = RosterAnalytics::compute(&profiles, now);
        let visible = filter_profiles(&profiles, &filters);
        Self {
            profiles: profiles.into(),
            filters,
            visible,
            analytics,
            computed_at: now,
        }
    }

    /// Same collection, new filters. Analytics are reused since the collection did not
    /// change.
    pub fn with_filters(&self, filters: RosterFilters) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            visible: filter_profiles(&self.profiles, &filters),
            filters,
            analytics: self.analytics.clone(),
            computed_at: self.computed_at,
        }
    }

    /// Fresh collection, current filters kept.
    pub fn with_profiles(&self, profiles: Vec<Profile>, now: DateTime<Utc>) -> Self {
        Self::new(profiles, self.filters.clone(), now)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn visible(&self) -> &[Profile] {
        &self.visible
    }

    pub fn filters(&self) -> &RosterFilters {
        &self.filters
    }

    pub fn analytics(&self) -> Option<&RosterAnalytics> {
        self.analytics.as_ref()
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn find(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|profile| &profile.id == id)
    }

    pub fn taluk_options(&self) -> Vec<String> {
        taluk_options(&self.profiles)
    }

    /// CSV of the visible profiles only.
    pub fn export(&self, format: CsvFormat) -> Result<String, ExportError> {
        export_csv(&self.visible, format)
    }

    pub fn rows(&self) -> Vec<RosterRow> {
        let current_year = self.computed_at.year();
        self.visible
            .iter()
            .map(|profile| RosterRow::new(profile, current_year))
            .collect()
    }

    pub fn listing(&self) -> RosterListing {
        RosterListing {
            total: self.profiles.len(),
            visible: self.visible.len(),
            filters: self.filters.clone(),
            profiles: self.rows(),
        }
    }
}

/// One visible profile plus the values derived for display.
#[derive(Debug, Clone, Serialize)]
pub struct RosterRow {
    #[serde(flatten)]
    pub profile: Profile,
    pub age: Option<i32>,
    pub payment_label: &'static str,
}

impl RosterRow {
    pub fn new(profile: &Profile, current_year: i32) -> Self {
        Self {
            age: profile.age_in(current_year),
            payment_label: profile.payment_label(),
            profile: profile.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterListing {
    pub total: usize,
    pub visible: usize,
    pub filters: RosterFilters,
    pub profiles: Vec<RosterRow>,
}
