use crate::infra::{parse_assignment, OperatorContext};
use chrono::{Duration, Utc};
use clap::Args;
use shadi_broker::auth::{JwtVerifier, Role};
use shadi_broker::config::AppConfig;
use shadi_broker::error::AppError;
use shadi_broker::profiles::{Profile, ProfileField, ProfileId};
use shadi_broker::workflows::intake::{
    IntakeError, IntakeService, Label, Locale, QuestionnaireView, SubmissionRequest,
};
use shadi_broker::workflows::roster::{
    export_filename, CsvFormat, RosterError, RosterFilters, RosterNotice, RosterRow,
    RosterService, RosterView,
};
use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Case-insensitive match on name, father, mother, or taluk
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact gender (male/female)
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Exact taluk
    #[arg(long)]
    pub(crate) taluk: Option<String>,
}

impl FilterArgs {
    fn into_filters(self) -> RosterFilters {
        RosterFilters {
            search: self.search,
            gender: self.gender,
            taluk: self.taluk,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Write to this path instead of `<product>_profiles_<date>.csv`. Use `-` for stdout.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Quote fields containing commas, quotes, or newlines
    #[arg(long)]
    pub(crate) escape: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    /// Profile id
    pub(crate) id: String,
    /// FIELD=VALUE, repeatable
    #[arg(long = "set", value_parser = parse_assignment, required = true)]
    pub(crate) set: Vec<(ProfileField, String)>,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    /// Profile id
    pub(crate) id: String,
    /// Skip the interactive confirmation prompt
    #[arg(long)]
    pub(crate) yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Questionnaire language (en or kn)
    #[arg(long, default_value = "en")]
    pub(crate) locale: Locale,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// JSON file with `answers`, `data_verification`, and optional `locale`
    #[arg(long)]
    pub(crate) answers: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// Subject recorded in the token
    #[arg(long)]
    pub(crate) subject: String,
    /// Lifetime in minutes
    #[arg(long, default_value_t = 60)]
    pub(crate) ttl_minutes: i64,
}

pub(crate) async fn run_roster_list(args: FilterArgs) -> Result<(), AppError> {
    let context = OperatorContext::load()?;
    let service = RosterService::new(context.gateway);
    let view = service.load(args.into_filters(), Utc::now()).await?;

    render_roster(&view);
    Ok(())
}

pub(crate) async fn run_roster_stats() -> Result<(), AppError> {
    let context = OperatorContext::load()?;
    let service = RosterService::new(context.gateway);
    let view = service.load(RosterFilters::default(), Utc::now()).await?;

    let Some(analytics) = view.analytics() else {
        println!("No profiles yet");
        return Ok(());
    };
    println!("Roster analytics");
    println!(
        "- {} profiles | {} male | {} female",
        analytics.total, analytics.male, analytics.female
    );
    println!("- {} registered in the last 7 days", analytics.recent);
    println!("- Top taluk: {}", analytics.top_taluk);
    println!("- Top education: {}", analytics.top_education);
    println!("- Top occupation: {}", analytics.top_occupation);
    Ok(())
}

pub(crate) async fn run_roster_taluks() -> Result<(), AppError> {
    let context = OperatorContext::load()?;
    let service = RosterService::new(context.gateway);
    let view = service.load(RosterFilters::default(), Utc::now()).await?;

    for taluk in view.taluk_options() {
        println!("{taluk}");
    }
    Ok(())
}

pub(crate) async fn run_roster_export(args: ExportArgs) -> Result<(), AppError> {
    let context = OperatorContext::load()?;
    let service = RosterService::new(context.gateway);
    let now = Utc::now();
    let view = service.load(args.filters.into_filters(), now).await?;

    let escape = args.escape || context.config.export.escape_csv;
    let csv = view.export(CsvFormat::from_escape_flag(escape))?;

    match args.output {
        Some(path) if path.as_os_str() == OsStr::new("-") => println!("{csv}"),
        output => {
            let path = output.unwrap_or_else(|| {
                PathBuf::from(export_filename(
                    &context.config.export.product_name,
                    now.date_naive(),
                ))
            });
            std::fs::write(&path, csv)?;
            info!(rows = view.visible().len(), path = %path.display(), "roster exported");
            println!(
                "Exported {} profiles to {}",
                view.visible().len(),
                path.display()
            );
        }
    }
    Ok(())
}

pub(crate) async fn run_roster_edit(args: EditArgs) -> Result<(), AppError> {
    let context = OperatorContext::load()?;
    let service = RosterService::new(context.gateway);
    let now = Utc::now();
    let view = service.load(RosterFilters::default(), now).await?;

    let id = ProfileId(args.id);
    let edit = args
        .set
        .iter()
        .try_fold(service.begin_edit(&view, &id)?, |edit, (field, value)| {
            edit.set(*field, value)
        })?;

    let changed = edit.changed_fields();
    if changed.is_empty() {
        println!("Nothing to change for profile {id}");
        return Ok(());
    }

    match service.save(&view, edit, now).await {
        Ok(applied) => {
            println!("{}", RosterNotice::Updated.message());
            for field in changed {
                println!("- {field}: {}", display_value(&applied.value, field));
            }
            if applied.reload.is_err() {
                println!("{}", RosterNotice::LoadFailed.message());
            }
            Ok(())
        }
        Err(RosterError::Gateway(err)) => {
            println!("{}", RosterNotice::UpdateFailed.message());
            Err(AppError::from(err))
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) async fn run_roster_delete(args: DeleteArgs) -> Result<(), AppError> {
    let context = OperatorContext::load()?;
    let service = RosterService::new(context.gateway);
    let now = Utc::now();
    let view = service.load(RosterFilters::default(), now).await?;

    let id = ProfileId(args.id);
    let name = match view.find(&id) {
        Some(profile) => profile.fields.full_name.clone(),
        None => return Err(RosterError::NotFound(id).into()),
    };
    let confirmed = args.yes
        || confirm(&format!(
            "{} ({id} {name}) [y/N] ",
            RosterNotice::ConfirmDelete.message()
        ))?;

    match service.delete(&view, &id, confirmed, now).await {
        Ok(applied) => {
            println!("{}", RosterNotice::Deleted.message());
            match applied.reload {
                Ok(reloaded) => println!("{} profiles remain", reloaded.profiles().len()),
                Err(_) => println!("{}", RosterNotice::LoadFailed.message()),
            }
            Ok(())
        }
        Err(RosterError::ConfirmationRequired) => {
            println!("Deletion cancelled");
            Ok(())
        }
        Err(RosterError::Gateway(err)) => {
            println!("{}", RosterNotice::DeleteFailed.message());
            Err(AppError::from(err))
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn run_intake_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let view = QuestionnaireView::new(args.locale);
    println!("{}", view.title);
    println!("{}", view.subtitle);
    for question in &view.questions {
        println!("{:>2}. {} [{}]", question.id.0, question.label, question.field);
        for option in &question.options {
            println!("      {} = {}", option.value, option.label);
        }
    }
    Ok(())
}

pub(crate) async fn run_intake_submit(args: SubmitArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.answers)?;
    let request: SubmissionRequest = serde_json::from_str(&raw)
        .map_err(|err| AppError::Input(format!("{}: {err}", args.answers.display())))?;
    let locale = request.locale;
    let session = request.into_session()?;

    let context = OperatorContext::load()?;
    let service = IntakeService::new(context.gateway);
    let (session, outcome) = service.submit(session).await;

    match outcome {
        Ok(profile) => {
            println!("{}", session.notice().unwrap_or_default());
            println!("Profile id: {}", profile.id);
            Ok(())
        }
        Err(IntakeError::Invalid(issues)) => {
            println!("{}", session.progress_text());
            for issue in &issues {
                println!("- {}: {}", issue.field, issue.problem.describe());
            }
            Err(AppError::Intake(IntakeError::Invalid(issues)))
        }
        Err(err) => {
            println!("{}", locale.text(Label::Error));
            Err(err.into())
        }
    }
}

pub(crate) fn run_admin_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let verifier = JwtVerifier::new(&config.auth.jwt_secret);
    let token = verifier.issue(&args.subject, Role::Admin, Duration::minutes(args.ttl_minutes))?;
    println!("{token}");
    Ok(())
}

fn render_roster(view: &RosterView) {
    println!(
        "Showing {} of {} profiles",
        view.visible().len(),
        view.profiles().len()
    );
    println!(
        "{:<18} {:<24} {:<7} {:>4} {:<16} {:<24} {:<7}",
        "ID", "Name", "Gender", "Age", "Taluk", "Father", "Payment"
    );
    for row in view.rows() {
        println!("{}", format_row(&row));
    }
}

fn format_row(row: &RosterRow) -> String {
    let fields = &row.profile.fields;
    let age = row.age.map(|age| age.to_string()).unwrap_or_default();
    format!(
        "{:<18} {:<24} {:<7} {:>4} {:<16} {:<24} {:<7}",
        row.profile.id.as_str(),
        fields.full_name,
        fields.gender.as_str(),
        age,
        fields.taluk,
        fields.father_name,
        row.payment_label
    )
}

fn display_value(profile: &Profile, field: ProfileField) -> String {
    match field {
        ProfileField::PaymentStatus => profile.payment_label().to_string(),
        other => profile.field_text(other),
    }
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
