//! Administrative listing, analytics, editing, deletion, and export of profiles.

pub mod analytics;
pub mod export;
pub mod filter;
pub mod notice;
pub mod router;
pub mod service;
pub mod view;

#[cfg(test)]
mod tests;

pub use analytics::{most_frequent, RosterAnalytics, RECENT_WINDOW_DAYS};
pub use export::{csv_row, export_csv, export_filename, CsvFormat, ExportError, CSV_HEADER};
pub use filter::{filter_profiles, taluk_options, RosterFilters};
pub use notice::RosterNotice;
pub use router::{roster_router, RosterState};
pub use service::{Applied, ProfileEdit, RosterError, RosterService};
pub use view::{RosterListing, RosterRow, RosterView};
