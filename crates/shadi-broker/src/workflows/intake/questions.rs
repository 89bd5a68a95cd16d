use serde::{Deserialize, Serialize};

use super::locale::Label;
use crate::profiles::ProfileField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    ShortText,
    LongText,
    Date,
    Integer,
    GenderChoice,
    Acknowledgment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub field: ProfileField,
    pub label: Label,
    pub kind: InputKind,
}

const fn question(id: u8, field: ProfileField, label: Label, kind: InputKind) -> Question {
    Question {
        id: QuestionId(id),
        field,
        label,
        kind,
    }
}

const QUESTIONS: [Question; 17] = [
    question(1, ProfileField::FullName, Label::FullName, InputKind::ShortText),
    question(2, ProfileField::Gender, Label::Gender, InputKind::GenderChoice),
    question(3, ProfileField::DateOfBirth, Label::DateOfBirth, InputKind::Date),
    question(
        4,
        ProfileField::PermanentAddress,
        Label::PermanentAddress,
        InputKind::LongText,
    ),
    question(5, ProfileField::PinCode, Label::PinCode, InputKind::ShortText),
    question(6, ProfileField::Taluk, Label::Taluk, InputKind::ShortText),
    question(7, ProfileField::FatherName, Label::FatherName, InputKind::ShortText),
    question(8, ProfileField::MotherName, Label::MotherName, InputKind::ShortText),
    question(9, ProfileField::Education, Label::Education, InputKind::ShortText),
    question(10, ProfileField::Occupation, Label::Occupation, InputKind::ShortText),
    question(11, ProfileField::Caste, Label::Caste, InputKind::ShortText),
    question(12, ProfileField::Complexion, Label::Complexion, InputKind::ShortText),
    question(13, ProfileField::Height, Label::Height, InputKind::ShortText),
    question(14, ProfileField::Weight, Label::Weight, InputKind::ShortText),
    question(
        15,
        ProfileField::SiblingsCount,
        Label::SiblingsCount,
        InputKind::Integer,
    ),
    question(
        16,
        ProfileField::AssetDetails,
        Label::AssetDetails,
        InputKind::LongText,
    ),
    question(
        17,
        ProfileField::DataVerification,
        Label::DataVerification,
        InputKind::Acknowledgment,
    ),
];

/// The fixed questionnaire, in presentation order.
pub fn questionnaire() -> &'static [Question] {
    &QUESTIONS
}

pub fn total_questions() -> usize {
    QUESTIONS.len()
}

pub fn question_for(field: ProfileField) -> Option<&'static Question> {
    QUESTIONS.iter().find(|question| question.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_fields_unique() {
        for (index, question) in questionnaire().iter().enumerate() {
            assert_eq!(usize::from(question.id.0), index + 1);
        }

        let mut fields: Vec<_> = questionnaire().iter().map(|q| q.field).collect();
        fields.sort();
        fields.dedup();
        assert_eq!(fields.len(), total_questions());
    }

    #[test]
    fn acknowledgment_is_the_last_question() {
        let last = questionnaire().last().expect("questionnaire not empty");
        assert_eq!(last.kind, InputKind::Acknowledgment);
        assert_eq!(last.field, ProfileField::DataVerification);
        assert!(question_for(ProfileField::PaymentStatus).is_none());
    }
}
