use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::locale::{Label, Locale};
use super::questions::{questionnaire, total_questions, InputKind, QuestionId};
use super::session::{IntakeError, IntakeSession};
use crate::profiles::ProfileField;

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub field: ProfileField,
    pub kind: InputKind,
    pub label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub locale: Locale,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub submit_label: &'static str,
    pub required_label: &'static str,
    pub total: usize,
    pub questions: Vec<QuestionView>,
}

impl QuestionnaireView {
    pub fn new(locale: Locale) -> Self {
        let questions = questionnaire()
            .iter()
            .map(|question| QuestionView {
                id: question.id,
                field: question.field,
                kind: question.kind,
                label: locale.text(question.label),
                options: match question.kind {
                    InputKind::GenderChoice => vec![
                        ChoiceView {
                            value: "male",
                            label: locale.text(Label::Male),
                        },
                        ChoiceView {
                            value: "female",
                            label: locale.text(Label::Female),
                        },
                    ],
                    _ => Vec::new(),
                },
            })
            .collect();

        Self {
            locale,
            title: locale.text(Label::Title),
            subtitle: locale.text(Label::Subtitle),
            submit_label: locale.text(Label::Submit),
            required_label: locale.text(Label::Required),
            total: total_questions(),
            questions,
        }
    }
}

/// Completed questionnaire posted in one piece (HTTP body or CLI answers file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub answers: BTreeMap<ProfileField, String>,
    #[serde(default)]
    pub data_verification: bool,
}

impl SubmissionRequest {
    pub fn into_session(self) -> Result<IntakeSession, IntakeError> {
        let session = self
            .answers
            .iter()
            .try_fold(IntakeSession::new(self.locale), |session, (field, value)| {
                session.answer(*field, value)
            })?;

        Ok(session.acknowledge(self.data_verification))
    }
}
