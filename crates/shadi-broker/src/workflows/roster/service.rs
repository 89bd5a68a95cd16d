use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::export::ExportError;
use super::filter::RosterFilters;
use super::view::RosterView;
use crate::profiles::{
    FieldValueError, GatewayError, Profile, ProfileField, ProfileGateway, ProfileId,
};

/// Administrative view over the Profile API: load, edit, delete.
pub struct RosterService<G> {
    gateway: Arc<G>,
}

impl<G> RosterService<G>
where
    G: ProfileGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetch the full collection and build a snapshot with `filters` applied.
    pub async fn load(
        &self,
        filters: RosterFilters,
        now: DateTime<Utc>,
    ) -> Result<RosterView, RosterError> {
        let profiles = self.gateway.list().await.map_err(|err| {
            warn!(error = %err, "roster load failed");
            RosterError::Gateway(err)
        })?;
        info!(profiles = profiles.len(), "roster loaded");
        Ok(RosterView::new(profiles, filters, now))
    }

    /// Reload the collection, keeping the current filters.
    pub async fn refresh(
        &self,
        view: &RosterView,
        now: DateTime<Utc>,
    ) -> Result<RosterView, RosterError> {
        self.load(view.filters().clone(), now).await
    }

    /// Open an edit seeded with the profile's current values.
    pub fn begin_edit(
        &self,
        view: &RosterView,
        id: &ProfileId,
    ) -> Result<ProfileEdit, RosterError> {
        ProfileEdit::begin(view, id)
    }

    /// Send the whole edited record, then reload with the view's filters.
    ///
    /// Once the Profile API accepts the update the call succeeds; a failed reload is
    /// reported separately in [`Applied::reload`].
    pub async fn save(
        &self,
        view: &RosterView,
        edit: ProfileEdit,
        now: DateTime<Utc>,
    ) -> Result<Applied<Profile>, RosterError> {
        let draft = edit.into_draft();
        let updated = self.gateway.update(&draft).await.map_err(|err| {
            warn!(profile_id = %draft.id, error = %err, "profile update failed");
            RosterError::Gateway(err)
        })?;
        info!(profile_id = %updated.id, "profile updated");

        let reload = self.refresh(view, now).await;
        Ok(Applied {
            value: updated,
            reload,
        })
    }

    /// Delete a profile the view knows about. Without confirmation nothing is sent.
    pub async fn delete(
        &self,
        view: &RosterView,
        id: &ProfileId,
        confirmed: bool,
        now: DateTime<Utc>,
    ) -> Result<Applied<ProfileId>, RosterError> {
        if view.find(id).is_none() {
            return Err(RosterError::NotFound(id.clone()));
        }
        if !confirmed {
            return Err(RosterError::ConfirmationRequired);
        }

        self.gateway.delete(id).await.map_err(|err| {
            warn!(profile_id = %id, error = %err, "profile deletion failed");
            RosterError::Gateway(err)
        })?;
        info!(profile_id = %id, "profile deleted");

        let reload = self.refresh(view, now).await;
        Ok(Applied {
            value: id.clone(),
            reload,
        })
    }
}

/// A mutation the Profile API accepted, and the reload issued after it.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub reload: Result<RosterView, RosterError>,
}

impl<G> Clone for RosterService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// An in-progress edit: the record as loaded and the draft being changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEdit {
    original: Profile,
    draft: Profile,
}

impl ProfileEdit {
    pub fn begin(view: &RosterView, id: &ProfileId) -> Result<Self, RosterError> {
        let original = view
            .find(id)
            .cloned()
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;
        Ok(Self {
            draft: original.clone(),
            original,
        })
    }

    pub fn original(&self) -> &Profile {
        &self.original
    }

    pub fn draft(&self) -> &Profile {
        &self.draft
    }

    pub fn set(mut self, field: ProfileField, value: &str) -> Result<Self, RosterError> {
        self.draft.set_field(field, value)?;
        Ok(self)
    }

    /// Replace the draft wholesale. The id is fixed for the lifetime of the edit.
    pub fn replace(mut self, draft: Profile) -> Result<Self, RosterError> {
        if draft.id != self.original.id {
            return Err(RosterError::IdMismatch {
                expected: self.original.id.clone(),
                found: draft.id,
            });
        }
        self.draft = draft;
        Ok(self)
    }

    pub fn changed_fields(&self) -> Vec<ProfileField> {
        ProfileField::all()
            .into_iter()
            .filter(|field| self.original.field_text(*field) != self.draft.field_text(*field))
            .collect()
    }

    pub fn into_draft(self) -> Profile {
        self.draft
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("profile {0} not found")]
    NotFound(ProfileId),
    #[error("deletion requires explicit confirmation")]
    ConfirmationRequired,
    #[error(transparent)]
    Field(#[from] FieldValueError),
    #[error("profile id {found} does not match {expected}")]
    IdMismatch { expected: ProfileId, found: ProfileId },
    #[error(transparent)]
    Export(#[from] ExportError),
}
