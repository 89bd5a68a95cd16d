use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::locale::{Label, Locale};
use super::questions::{question_for, questionnaire, total_questions, InputKind, QuestionId};
use crate::profiles::{Gender, NewProfile, ProfileField, ProfileFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakePhase {
    #[default]
    Editing,
    Submitting,
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Required,
    InvalidGender,
    InvalidDate,
    InvalidCount,
}

impl FieldProblem {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidGender => "must be male or female",
            Self::InvalidDate => "must be a date in YYYY-MM-DD form",
            Self::InvalidCount => "must be a whole number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: ProfileField,
    pub problem: FieldProblem,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("please verify that all data is correct")]
    VerificationRequired,
    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<FieldIssue>),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("{0} is not part of the questionnaire")]
    NotAQuestion(ProfileField),
    #[error("'{value}' is not a valid answer for {field}")]
    InvalidAnswer { field: ProfileField, value: String },
    #[error(transparent)]
    Gateway(#[from] crate::profiles::GatewayError),
}

/// Snapshot of one questionnaire in progress.
///
/// Every transition returns a new session; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeSession {
    locale: Locale,
    answers: BTreeMap<ProfileField, String>,
    verified: bool,
    answered: BTreeSet<QuestionId>,
    phase: IntakePhase,
}

impl IntakeSession {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn value(&self, field: ProfileField) -> &str {
        self.answers.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.answered.contains(&id)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answered.len(),
            total: total_questions(),
        }
    }

    pub fn progress_text(&self) -> String {
        let progress = self.progress();
        self.locale.progress_text(progress.answered, progress.total)
    }

    /// Backs both the inline and the pinned submit control.
    pub fn can_submit(&self) -> bool {
        self.verified && self.phase != IntakePhase::Submitting
    }

    /// Switch display language; answers are untouched.
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }

    /// Record a raw answer for a question-bound field.
    pub fn answer(&self, field: ProfileField, value: &str) -> Result<Self, IntakeError> {
        let question = question_for(field).ok_or(IntakeError::NotAQuestion(field))?;

        if question.kind == InputKind::Acknowledgment {
            let checked = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => true,
                "false" | "off" | "no" | "0" | "" => false,
                _ => {
                    return Err(IntakeError::InvalidAnswer {
                        field,
                        value: value.to_string(),
                    })
                }
            };
            return Ok(self.acknowledge(checked));
        }

        let mut next = self.clone();
        next.answers.insert(field, value.to_string());
        if value.trim().is_empty() {
            next.answered.remove(&question.id);
        } else {
            next.answered.insert(question.id);
        }
        Ok(next)
    }

    /// Tick or clear the verification acknowledgment.
    pub fn acknowledge(&self, checked: bool) -> Self {
        let mut next = self.clone();
        next.verified = checked;
        if let Some(question) = question_for(ProfileField::DataVerification) {
            if checked {
                next.answered.insert(question.id);
            } else {
                next.answered.remove(&question.id);
            }
        }
        next
    }

    /// Presence and input-kind checks for every answer field.
    pub fn validate(&self) -> Result<ProfileFields, Vec<FieldIssue>> {
        let mut fields = ProfileFields::default();
        let mut issues = Vec::new();

        for question in questionnaire() {
            if question.kind == InputKind::Acknowledgment {
                continue;
            }

            let raw = self.value(question.field);
            let trimmed = raw.trim();
            let problem = if trimmed.is_empty() {
                Some(FieldProblem::Required)
            } else {
                match question.kind {
                    InputKind::GenderChoice if !Gender::from(trimmed).is_recognized() => {
                        Some(FieldProblem::InvalidGender)
                    }
                    InputKind::Date
                        if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() =>
                    {
                        Some(FieldProblem::InvalidDate)
                    }
                    InputKind::Integer if trimmed.parse::<u32>().is_err() => {
                        Some(FieldProblem::InvalidCount)
                    }
                    _ => None,
                }
            };

            match problem {
                Some(problem) => issues.push(FieldIssue {
                    field: question.field,
                    problem,
                }),
                None => {
                    let value = if question.kind == InputKind::GenderChoice {
                        trimmed
                    } else {
                        raw
                    };
                    if let Err(err) = fields.set_text(question.field, value) {
                        tracing::error!(%err, "questionnaire bound to a non-text field");
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(fields)
        } else {
            Err(issues)
        }
    }

    /// Gate, validate, and move into the in-flight phase.
    ///
    /// Returns the in-flight session together with the creation request to send.
    pub fn begin_submission(&self) -> Result<(Self, NewProfile), IntakeError> {
        if self.phase == IntakePhase::Submitting {
            return Err(IntakeError::SubmissionInFlight);
        }
        if !self.verified {
            return Err(IntakeError::VerificationRequired);
        }

        let fields = self.validate().map_err(IntakeError::Invalid)?;
        let request = NewProfile::unpaid(fields, true);

        let next = Self {
            phase: IntakePhase::Submitting,
            ..self.clone()
        };
        Ok((next, request))
    }

    /// Successful create: clear everything and show the confirmation.
    pub fn complete(&self) -> Self {
        Self {
            locale: self.locale,
            phase: IntakePhase::Confirmed,
            ..Self::default()
        }
    }

    /// Failed create: keep every answer so the user can retry.
    pub fn fail(&self) -> Self {
        Self {
            phase: IntakePhase::Editing,
            ..self.clone()
        }
    }

    pub fn start_over(&self) -> Self {
        Self::new(self.locale)
    }

    /// Localized notice for the current phase, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self.phase {
            IntakePhase::Editing => None,
            IntakePhase::Submitting => Some(self.locale.text(Label::Loading)),
            IntakePhase::Confirmed => Some(self.locale.text(Label::Success)),
        }
    }
}
