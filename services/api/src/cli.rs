use crate::console::{
    run_admin_token, run_intake_questions, run_intake_submit, run_roster_delete, run_roster_edit,
    run_roster_export, run_roster_list, run_roster_stats, run_roster_taluks, DeleteArgs, EditArgs,
    ExportArgs, FilterArgs, QuestionsArgs, SubmitArgs, TokenArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shadi_broker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Shadi Broker",
    about = "Collect matrimonial profiles and administer the roster from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List, analyse, export, edit, and delete stored profiles
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Show the questionnaire or submit a completed one
    Intake {
        #[command(subcommand)]
        command: IntakeCommand,
    },
    /// Operator helpers that need the configured secret
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Print the filtered roster as a table
    List(FilterArgs),
    /// Print roster analytics
    Stats,
    /// Print the distinct taluks available for filtering
    Taluks,
    /// Export the filtered roster as CSV
    Export(ExportArgs),
    /// Update fields of one profile and save the whole record
    Edit(EditArgs),
    /// Delete one profile after confirmation
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
enum IntakeCommand {
    /// Print the localized questionnaire
    Questions(QuestionsArgs),
    /// Submit a completed questionnaire from a JSON answers file
    Submit(SubmitArgs),
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Mint an admin bearer token for the roster API
    Token(TokenArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Roster { command } => match command {
            RosterCommand::List(args) => run_roster_list(args).await,
            RosterCommand::Stats => run_roster_stats().await,
            RosterCommand::Taluks => run_roster_taluks().await,
            RosterCommand::Export(args) => run_roster_export(args).await,
            RosterCommand::Edit(args) => run_roster_edit(args).await,
            RosterCommand::Delete(args) => run_roster_delete(args).await,
        },
        Command::Intake { command } => match command {
            IntakeCommand::Questions(args) => run_intake_questions(args),
            IntakeCommand::Submit(args) => run_intake_submit(args).await,
        },
        Command::Admin {
            command: AdminCommand::Token(args),
        } => run_admin_token(args),
    }
}
