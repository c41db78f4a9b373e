//! CLI argument definitions for the portal client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use cpc_model::FormKind;

#[derive(Parser)]
#[command(
    name = "cpc",
    version,
    about = "Campus portal client - visitor counter and inquiry forms",
    long_about = "Talk to the campus portal API from the command line.\n\n\
                  Fetch or watch the live visitor counter, inspect the form\n\
                  catalog, and validate submission drafts before sending them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL (overrides CPC_API_BASE_URL).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the current visitor count.
    Count(CountArgs),

    /// List the form catalog: fields, rules, and endpoints.
    Forms,

    /// Validate a submission draft against a form's rules.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct CountArgs {
    /// Keep polling and print each change until interrupted.
    #[arg(long = "watch")]
    pub watch: bool,

    /// Also record this fetch as a visit.
    #[arg(long = "record-visit")]
    pub record_visit: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Which form to validate against.
    #[arg(value_enum, value_name = "FORM")]
    pub form: FormArg,

    /// JSON file of field values ({"name": "...", "email": "..."}).
    ///
    /// The keys "department" and "courses" feed the category selection;
    /// "captchaToken" stands in for a bot-challenge token.
    #[arg(value_name = "DRAFT")]
    pub draft: PathBuf,
}

/// Form kinds selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormArg {
    Admission,
    Exam,
    Student,
    Company,
}

impl From<FormArg> for FormKind {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::Admission => FormKind::AdmissionInquiry,
            FormArg::Exam => FormKind::ExamRegistration,
            FormArg::Student => FormKind::StudentInquiry,
            FormArg::Company => FormKind::CompanyInquiry,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
