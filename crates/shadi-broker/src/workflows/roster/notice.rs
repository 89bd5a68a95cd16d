/// Operator-facing outcome messages. Gateway failures of any kind map onto the
/// matching `*Failed` notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterNotice {
    LoadFailed,
    AnalyticsFailed,
    Updated,
    UpdateFailed,
    ConfirmDelete,
    Deleted,
    DeleteFailed,
}

impl RosterNotice {
    pub const fn message(self) -> &'static str {
        match self {
            Self::LoadFailed => "Failed to fetch profiles",
            Self::AnalyticsFailed => "Failed to fetch analytics",
            Self::Updated => "Profile updated successfully!",
            Self::UpdateFailed => "Failed to update profile",
            Self::ConfirmDelete => "Are you sure you want to delete this profile?",
            Self::Deleted => "Profile deleted successfully!",
            Self::DeleteFailed => "Failed to delete profile",
        }
    }
}
