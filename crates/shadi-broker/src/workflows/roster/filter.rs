use serde::{Deserialize, Serialize};

use crate::profiles::Profile;

/// Search inputs for the roster. Empty strings and `None` impose no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterFilters {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub taluk: Option<String>,
}

impl RosterFilters {
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_string()),
            ..Self::default()
        }
    }

    pub fn with_gender(self, gender: &str) -> Self {
        Self {
            gender: Some(gender.to_string()),
            ..self
        }
    }

    pub fn with_taluk(self, taluk: &str) -> Self {
        Self {
            taluk: Some(taluk.to_string()),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        active(&self.search).is_none()
            && active(&self.gender).is_none()
            && active(&self.taluk).is_none()
    }

    /// Free-text term (case-insensitive substring of name, father, mother, or taluk)
    /// AND exact gender AND exact taluk.
    pub fn matches(&self, profile: &Profile) -> bool {
        if let Some(term) = active(&self.search) {
            let needle = term.to_lowercase();
            let fields = &profile.fields;
            let hit = [
                &fields.full_name,
                &fields.father_name,
                &fields.mother_name,
                &fields.taluk,
            ]
            .iter()
            .any(|value| value.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(gender) = active(&self.gender) {
            if profile.fields.gender.as_str() != gender {
                return false;
            }
        }

        if let Some(taluk) = active(&self.taluk) {
            if profile.fields.taluk != taluk {
                return false;
            }
        }

        true
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Visible subset of `profiles`, in collection order.
pub fn filter_profiles(profiles: &[Profile], filters: &RosterFilters) -> Vec<Profile> {
    profiles
        .iter()
        .filter(|profile| filters.matches(profile))
        .cloned()
        .collect()
}

/// Distinct taluks in first-seen order, for building a taluk selector.
pub fn taluk_options(profiles: &[Profile]) -> Vec<String> {
    let mut seen = Vec::new();
    for profile in profiles {
        if !seen.contains(&profile.fields.taluk) {
            seen.push(profile.fields.taluk.clone());
        }
    }
    seen
}
