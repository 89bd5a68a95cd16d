use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profiles::Profile;

pub const CSV_HEADER: [&str; 18] = [
    "ID",
    "Name",
    "Gender",
    "DOB",
    "Address",
    "PIN",
    "Taluk",
    "Father",
    "Mother",
    "Education",
    "Occupation",
    "Caste",
    "Complexion",
    "Height",
    "Weight",
    "Siblings",
    "Assets",
    "Created At",
];

/// `Plain` joins fields with bare commas and never quotes; downstream consumers
/// depend on that byte layout. `Escaped` quotes per RFC 4180.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvFormat {
    #[default]
    Plain,
    Escaped,
}

impl CsvFormat {
    pub const fn from_escape_flag(escape: bool) -> Self {
        if escape {
            Self::Escaped
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer could not be flushed: {0}")]
    Flush(String),
    #[error("csv output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub fn csv_row(profile: &Profile) -> [&str; 18] {
    let fields = &profile.fields;
    [
        profile.id.as_str(),
        fields.full_name.as_str(),
        fields.gender.as_str(),
        fields.date_of_birth.as_str(),
        fields.permanent_address.as_str(),
        fields.pin_code.as_str(),
        fields.taluk.as_str(),
        fields.father_name.as_str(),
        fields.mother_name.as_str(),
        fields.education.as_str(),
        fields.occupation.as_str(),
        fields.caste.as_str(),
        fields.complexion.as_str(),
        fields.height.as_str(),
        fields.weight.as_str(),
        fields.siblings_count.as_str(),
        fields.asset_details.as_str(),
        profile.created_at.as_str(),
    ]
}

/// Header plus one line per profile, lines separated by `\n` with no trailing newline.
pub fn export_csv(profiles: &[Profile], format: CsvFormat) -> Result<String, ExportError> {
    match format {
        CsvFormat::Plain => {
            let mut lines = Vec::with_capacity(profiles.len() + 1);
            lines.push(CSV_HEADER.join(","));
            lines.extend(profiles.iter().map(|profile| csv_row(profile).join(",")));
            Ok(lines.join("\n"))
        }
        CsvFormat::Escaped => {
            let mut writer = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(Vec::new());
            writer.write_record(CSV_HEADER)?;
            for profile in profiles {
                writer.write_record(csv_row(profile))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|err| ExportError::Flush(err.to_string()))?;
            let mut output = String::from_utf8(bytes)?;
            if output.ends_with('\n') {
                output.pop();
            }
            Ok(output)
        }
    }
}

/// `<product>_profiles_<YYYY-MM-DD>.csv`
pub fn export_filename(product: &str, date: NaiveDate) -> String {
    format!("{product}_profiles_{}.csv", date.format("%Y-%m-%d"))
}
