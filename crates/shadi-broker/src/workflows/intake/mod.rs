//! Sequential questionnaire that produces a single profile creation request.

pub mod locale;
pub mod questions;
pub mod router;
pub mod service;
pub mod session;
pub mod views;

pub use locale::{Label, Locale};
pub use questions::{question_for, questionnaire, total_questions, InputKind, Question, QuestionId};
pub use router::intake_router;
pub use service::IntakeService;
pub use session::{FieldIssue, FieldProblem, IntakeError, IntakePhase, IntakeSession, Progress};
pub use views::{QuestionnaireView, SubmissionRequest};
