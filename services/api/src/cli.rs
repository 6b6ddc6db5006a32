use crate::commands::{
    run_appetite_evaluation, run_due_diligence_validation, run_register_import,
    run_vendor_assessment, AppetiteArgs, DueDiligenceArgs, RegisterArgs, VendorArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use grc_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GRC Decision Engine",
    about = "Score vendors, validate due diligence and track risk appetite from the command line",
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
    /// Third-party vendor risk scoring
    Vendors {
        #[command(subcommand)]
        command: VendorCommand,
    },
    /// Supplier due-diligence questionnaire validation
    DueDiligence {
        #[command(subcommand)]
        command: DueDiligenceCommand,
    },
    /// Risk appetite RAG reporting
    Appetite {
        #[command(subcommand)]
        command: AppetiteCommand,
    },
    /// Risk register import and tiering
    Register {
        #[command(subcommand)]
        command: RegisterCommand,
    },
}

#[derive(Subcommand, Debug)]
enum VendorCommand {
    /// Assess every vendor in a JSON file and print the committee report
    Assess(VendorArgs),
}

#[derive(Subcommand, Debug)]
enum DueDiligenceCommand {
    /// Validate every questionnaire in a JSON file
    Validate(DueDiligenceArgs),
}

#[derive(Subcommand, Debug)]
enum AppetiteCommand {
    /// Rate metrics against appetite and tolerance
    Evaluate(AppetiteArgs),
}

#[derive(Subcommand, Debug)]
enum RegisterCommand {
    /// Import a risk register CSV export
    Import(RegisterArgs),
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
        Command::Vendors {
            command: VendorCommand::Assess(args),
        } => run_vendor_assessment(args),
        Command::DueDiligence {
            command: DueDiligenceCommand::Validate(args),
        } => run_due_diligence_validation(args),
        Command::Appetite {
            command: AppetiteCommand::Evaluate(args),
        } => run_appetite_evaluation(args),
        Command::Register {
            command: RegisterCommand::Import(args),
        } => run_register_import(args),
    }
}
