use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Kn,
}

impl Locale {
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Kn => "kn",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Kn,
            Self::Kn => Self::En,
        }
    }

    pub const fn text(self, label: Label) -> &'static str {
        match self {
            Self::En => english(label),
            Self::Kn => kannada(label),
        }
    }

    /// Footer progress line, e.g. `Answered 3 of 17`.
    pub fn progress_text(self, answered: usize, total: usize) -> String {
        format!(
            "{} {} {} {}",
            self.text(Label::Answered),
            answered,
            self.text(Label::Of),
            total
        )
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "kn" | "kannada" => Ok(Self::Kn),
            other => Err(format!("unsupported locale '{other}' (expected en or kn)")),
        }
    }
}

/// Every translatable string on the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Title,
    Subtitle,
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
    Required,
    Male,
    Female,
    Submit,
    Loading,
    Success,
    Error,
    Answered,
    Of,
}

const fn english(label: Label) -> &'static str {
    match label {
        Label::Title => "Shadi Broker",
        Label::Subtitle => "All-community Bride-Groom Information Center",
        Label::FullName => "Full Name",
        Label::Gender => "Gender",
        Label::DateOfBirth => "Date of Birth",
        Label::PermanentAddress => "Permanent Address",
        Label::PinCode => "PIN CODE/ZIP CODE",
        Label::Taluk => "Taluk",
        Label::FatherName => "Father's Name",
        Label::MotherName => "Mother's Name",
        Label::Education => "Education",
        Label::Occupation => "Occupation",
        Label::Caste => "Caste",
        Label::Complexion => "Complexion",
        Label::Height => "Height",
        Label::Weight => "Weight",
        Label::SiblingsCount => "Number of Siblings",
        Label::AssetDetails => "Asset Details",
        Label::DataVerification => "All the data as per my knowledge is correct",
        Label::Required => "Required",
        Label::Male => "MALE",
        Label::Female => "FEMALE",
        Label::Submit => "Submit",
        Label::Loading => "Loading...",
        Label::Success => "Profile created successfully!",
        Label::Error => "Something went wrong!",
        Label::Answered => "Answered",
        Label::Of => "of",
    }
}

const fn kannada(label: Label) -> &'static str {
    match label {
        Label::Title => "ಶಾದಿ ಬ್ರೋಕರ್",
        Label::Subtitle => "ಸರ್ವಜನಾಂಗೀಯ ವಧು-ವರರ ಮಾಹಿತಿ ಕೇಂದ್ರ",
        Label::FullName => "ವಧು/ವರನ ಪೂರ್ಣ ಹೆಸರು",
        Label::Gender => "ಲಿಂಗ",
        Label::DateOfBirth => "ವಧು/ವರನ ಹುಟ್ಟಿದ ದಿನಾಂಕ",
        Label::PermanentAddress => "ವಧು/ವರನ ಖಾಯಂ ವಿಳಾಸ",
        Label::PinCode => "ವಧು/ವರನ PIN CODE/ZIP CODE",
        Label::Taluk => "ವಧು/ವರನ ತಾಲೂಕು",
        Label::FatherName => "ವಧು/ವರನ ತಂದೆ ಹೆಸರು",
        Label::MotherName => "ವಧು/ವರನ ತಾಯಿ ಹೆಸರು",
        Label::Education => "ವಧು/ವರನ ಶಿಕ್ಷಣ",
        Label::Occupation => "ವಧು/ವರನ ಉದ್ಯೋಗ",
        Label::Caste => "ವಧು/ವರನ ಜಾತಿ",
        Label::Complexion => "ವಧು/ವರನ ಬೆಡಗು",
        Label::Height => "ವಧು/ವರನ ಎತ್ತರ",
        Label::Weight => "ವಧು/ವರನ ತೂಕ",
        Label::SiblingsCount => "ವಧು/ವರನ ಸಹೋದರರ ಸಂಖ್ಯೆ",
        Label::AssetDetails => "ವಧು/ವರನ ಆಸ್ತಿ ವಿವರ",
        Label::DataVerification => "ನನ್ನ ಜ್ಞಾನದ ಪ್ರಕಾರ ಎಲ್ಲಾ ಡೇಟಾ ಸರಿಯಾಗಿದೆ",
        Label::Required => "Required",
        Label::Male => "ಪುರುಷ",
        Label::Female => "ಮಹಿಳೆ",
        Label::Submit => "ಸಲ್ಲಿಸಿ",
        Label::Loading => "ಲೋಡ್ ಆಗುತ್ತಿದೆ...",
        Label::Success => "ಪ್ರೊಫೈಲ್ ಯಶಸ್ವಿಯಾಗಿ ರಚಿಸಲಾಗಿದೆ!",
        Label::Error => "ಏನೋ ತಪ್ಪಾಗಿದೆ!",
        Label::Answered => "ಉತ್ತರಿಸಲಾಗಿದೆ",
        Label::Of => "ನಲ್ಲಿ",
    }
}
