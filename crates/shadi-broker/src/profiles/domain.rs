use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier for a stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Gender as captured by intake. Values outside the two accepted options are kept
/// verbatim so the roster can still render records written by other clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other(raw) => raw,
        }
    }

    pub const fn is_recognized(&self) -> bool {
        matches!(self, Self::Male | Self::Female)
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server timestamp kept exactly as the Profile API rendered it.
///
/// The API emits naive ISO-8601 datetimes (no offset) as well as RFC 3339 strings
/// depending on the deployment; both are accepted by [`Timestamp::parse`], with naive
/// values interpreted as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.to_rfc3339())
    }
}

/// The sixteen answer fields shared by creation requests and stored profiles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFields {
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: String,
    pub permanent_address: String,
    pub pin_code: String,
    pub taluk: String,
    pub father_name: String,
    pub mother_name: String,
    pub education: String,
    pub occupation: String,
    pub caste: String,
    pub complexion: String,
    pub height: String,
    pub weight: String,
    pub siblings_count: String,
    pub asset_details: String,
}

impl ProfileFields {
    /// Text value of an answer field. Workflow fields return `None`.
    pub fn text(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Gender => return Some(self.gender.as_str()),
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::PermanentAddress => &self.permanent_address,
            ProfileField::PinCode => &self.pin_code,
            ProfileField::Taluk => &self.taluk,
            ProfileField::FatherName => &self.father_name,
            ProfileField::MotherName => &self.mother_name,
            ProfileField::Education => &self.education,
            ProfileField::Occupation => &self.occupation,
            ProfileField::Caste => &self.caste,
            ProfileField::Complexion => &self.complexion,
            ProfileField::Height => &self.height,
            ProfileField::Weight => &self.weight,
            ProfileField::SiblingsCount => &self.siblings_count,
            ProfileField::AssetDetails => &self.asset_details,
            ProfileField::DataVerification
            | ProfileField::PaymentStatus
            | ProfileField::PaymentUtr => return None,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        let slot = match field {
            ProfileField::FullName => &mut self.full_name,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
            ProfileField::PermanentAddress => &mut self.permanent_address,
            ProfileField::PinCode => &mut self.pin_code,
            ProfileField::Taluk => &mut self.taluk,
            ProfileField::FatherName => &mut self.father_name,
            ProfileField::MotherName => &mut self.mother_name,
            ProfileField::Education => &mut self.education,
            ProfileField::Occupation => &mut self.occupation,
            ProfileField::Caste => &mut self.caste,
            ProfileField::Complexion => &mut self.complexion,
            ProfileField::Height => &mut self.height,
            ProfileField::Weight => &mut self.weight,
            ProfileField::SiblingsCount => &mut self.siblings_count,
            ProfileField::AssetDetails => &mut self.asset_details,
            ProfileField::Gender
            | ProfileField::DataVerification
            | ProfileField::PaymentStatus
            | ProfileField::PaymentUtr => return None,
        };
        Some(slot)
    }

    /// Assign a raw text value to an answer field.
    pub fn set_text(&mut self, field: ProfileField, value: &str) -> Result<(), FieldValueError> {
        if field == ProfileField::Gender {
            self.gender = Gender::from(value);
            return Ok(());
        }

        match self.text_mut(field) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(FieldValueError::NotText(field)),
        }
    }

    /// Year component of `date_of_birth`, if it parses as a calendar date.
    pub fn birth_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }
}

/// Stored profile as returned by the Profile API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(flatten)]
    pub fields: ProfileFields,
    #[serde(default)]
    pub data_verification: bool,
    #[serde(default)]
    pub payment_status: bool,
    #[serde(default)]
    pub payment_utr: Option<String>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Profile {
    /// Calendar-year age: `current year - birth year`, ignoring month and day.
    pub fn age_in(&self, current_year: i32) -> Option<i32> {
        self.fields.birth_year().map(|year| current_year - year)
    }

    pub fn payment_label(&self) -> &'static str {
        if self.payment_status {
            "Paid"
        } else {
            "Unpaid"
        }
    }

    /// Current value of any editable field as text; flags render as `true`/`false`.
    pub fn field_text(&self, field: ProfileField) -> String {
        match field {
            ProfileField::DataVerification => self.data_verification.to_string(),
            ProfileField::PaymentStatus => self.payment_status.to_string(),
            ProfileField::PaymentUtr => self.payment_utr.clone().unwrap_or_default(),
            other => self.fields.text(other).unwrap_or_default().to_string(),
        }
    }

    /// Apply a raw textual edit to any editable field.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), FieldValueError> {
        match field {
            ProfileField::DataVerification => {
                self.data_verification = parse_flag(field, value)?;
                Ok(())
            }
            ProfileField::PaymentStatus => {
                self.payment_status = parse_flag(field, value)?;
                Ok(())
            }
            ProfileField::PaymentUtr => {
                let trimmed = value.trim();
                self.payment_utr = (!trimmed.is_empty()).then(|| trimmed.to_string());
                Ok(())
            }
            _ => self.fields.set_text(field, value),
        }
    }
}

fn parse_flag(field: ProfileField, value: &str) -> Result<bool, FieldValueError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "paid" => Ok(true),
        "false" | "no" | "0" | "unpaid" => Ok(false),
        _ => Err(FieldValueError::InvalidFlag {
            field,
            value: value.to_string(),
        }),
    }
}

/// Creation request body for `POST /profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    #[serde(flatten)]
    pub fields: ProfileFields,
    pub data_verification: bool,
    pub payment_status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_utr: Option<String>,
}

impl NewProfile {
    /// Intake submissions always start unpaid.
    pub fn unpaid(fields: ProfileFields, data_verification: bool) -> Self {
        Self {
            fields,
            data_verification,
            payment_status: false,
            payment_utr: None,
        }
    }
}

/// Every editable profile attribute, keyed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Gender,
    DateOfBirth,
    PermanentAddress,
    PinCode,
    Taluk,
    FatherName,
    MotherName,
    Education,
    Occupation,
    Caste,
    Complexion,
    Height,
    Weight,
    SiblingsCount,
    AssetDetails,
    DataVerification,
    PaymentStatus,
    PaymentUtr,
}

impl ProfileField {
    pub const fn all() -> [Self; 19] {
        [
            Self::FullName,
            Self::Gender,
            Self::DateOfBirth,
            Self::PermanentAddress,
            Self::PinCode,
            Self::Taluk,
            Self::FatherName,
            Self::MotherName,
            Self::Education,
            Self::Occupation,
            Self::Caste,
            Self::Complexion,
            Self::Height,
            Self::Weight,
            Self::SiblingsCount,
            Self::AssetDetails,
            Self::DataVerification,
            Self::PaymentStatus,
            Self::PaymentUtr,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Gender => "gender",
            Self::DateOfBirth => "date_of_birth",
            Self::PermanentAddress => "permanent_address",
            Self::PinCode => "pin_code",
            Self::Taluk => "taluk",
            Self::FatherName => "father_name",
            Self::MotherName => "mother_name",
            Self::Education => "education",
            Self::Occupation => "occupation",
            Self::Caste => "caste",
            Self::Complexion => "complexion",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::SiblingsCount => "siblings_count",
            Self::AssetDetails => "asset_details",
            Self::DataVerification => "data_verification",
            Self::PaymentStatus => "payment_status",
            Self::PaymentUtr => "payment_utr",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileField {
    type Err = FieldValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::all()
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| FieldValueError::UnknownField(key.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValueError {
    #[error("unknown profile field '{0}'")]
    UnknownField(String),
    #[error("{0} is not a text field")]
    NotText(ProfileField),
    #[error("{field} expects true/false, got '{value}'")]
    InvalidFlag { field: ProfileField, value: String },
}
