//! Command-line view layer.
//!
//! Each subcommand dispatches store operations with the explicit session and
//! renders the resulting snapshot, either as text or as JSON. Listings are
//! filtered and paged in memory after a single fetch.

mod dispatch;
mod error;
mod input;
mod render;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::domain::{ApplicationStatus, EmploymentStatus, Role};

pub use dispatch::{ViewOptions, execute};
pub use error::CliError;

/// `jobboard` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobboard",
    about = "Search jobs, manage postings and review applications",
    version
)]
pub struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account and sign in with it.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Sign-in email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
        /// `candidate`, `employer` or `admin`.
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    /// Sign in and print the landing page for the account's role.
    Login {
        /// Sign-in email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Manage the signed-in account.
    #[command(subcommand)]
    Account(AccountCommand),
    /// Admin user management.
    #[command(subcommand)]
    Users(UsersCommand),
    /// Job postings.
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Candidate profiles.
    #[command(subcommand)]
    Candidate(CandidateCommand),
    /// Employer profiles.
    #[command(subcommand)]
    Employer(EmployerCommand),
    /// Job applications.
    #[command(subcommand)]
    Applications(ApplicationsCommand),
    /// Dashboard figures.
    #[command(subcommand)]
    Dashboard(DashboardCommand),
}

/// Page selector shared by listings.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// 1-indexed page to show.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

/// `account` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum AccountCommand {
    /// Replace the account password.
    ChangePassword {
        /// Password in use now.
        #[arg(long)]
        current: String,
        /// Password to switch to.
        #[arg(long = "new")]
        replacement: String,
    },
    /// Change the sign-in email.
    UpdateEmail {
        /// Email to switch to.
        email: String,
    },
    /// Delete the account and sign out.
    Delete,
}

/// `users` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List accounts.
    List {
        /// Match against name or email, ignoring case.
        #[arg(long, default_value = "")]
        search: String,
        /// Role to show, or `all`.
        #[arg(long, default_value = "all")]
        role: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Delete an account.
    Delete {
        /// Account identifier.
        id: u64,
    },
}

/// `jobs` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum JobsCommand {
    /// Every posting on the board.
    List {
        /// Only postings with this status.
        #[arg(long, value_parser = parse_employment_status)]
        status: Option<EmploymentStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Postings owned by an employer (the signed-in one by default).
    Mine {
        /// Employer account identifier.
        #[arg(long)]
        employer: Option<u64>,
        /// Only postings with this status.
        #[arg(long, value_parser = parse_employment_status)]
        status: Option<EmploymentStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Search postings by title and location.
    Search {
        /// Title fragment.
        #[arg(long)]
        title: Option<String>,
        /// Location fragment.
        #[arg(long)]
        location: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Post a job described by a JSON file.
    Create {
        /// JSON document with the posting fields.
        #[arg(long, value_name = "path")]
        file: Utf8PathBuf,
    },
    /// Replace a posting with the fields in a JSON file.
    Update {
        /// Posting identifier.
        id: u64,
        /// JSON document with the posting fields.
        #[arg(long, value_name = "path")]
        file: Utf8PathBuf,
    },
    /// Delete a posting.
    Delete {
        /// Posting identifier.
        id: u64,
    },
    /// Set the hiring state of a posting.
    Status {
        /// Posting identifier.
        id: u64,
        /// `Active`, `Inactive` or `Filled`.
        #[arg(value_parser = parse_employment_status)]
        status: EmploymentStatus,
    },
    /// Flip an owned posting between open and paused.
    Toggle {
        /// Posting identifier.
        id: u64,
    },
    /// Count the open postings of an employer (the signed-in one by default).
    Active {
        /// Employer account identifier.
        #[arg(long)]
        employer: Option<u64>,
    },
    /// Board-wide posting counters.
    Stats,
}

/// `candidate` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CandidateCommand {
    /// Create the signed-in candidate's profile.
    Create {
        /// JSON document with the profile fields.
        #[arg(long, value_name = "path")]
        profile: Utf8PathBuf,
        /// Resume to upload.
        #[arg(long, value_name = "path")]
        resume: Utf8PathBuf,
    },
    /// Show the signed-in candidate's profile.
    Show,
    /// Replace the signed-in candidate's profile fields.
    Update {
        /// JSON document with the profile fields.
        #[arg(long, value_name = "path")]
        profile: Utf8PathBuf,
    },
    /// Delete the profile owned by an account.
    Delete {
        /// Owning account identifier.
        user_id: u64,
    },
    /// Print the signed-in candidate's resume link.
    Resume,
    /// List every candidate profile.
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
}

/// `employer` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum EmployerCommand {
    /// Create the signed-in employer's company profile.
    Create {
        /// JSON document with the company fields.
        #[arg(long, value_name = "path")]
        profile: Utf8PathBuf,
    },
    /// Show the signed-in employer's company profile.
    Show,
    /// Replace the signed-in employer's company fields.
    Update {
        /// JSON document with the company fields.
        #[arg(long, value_name = "path")]
        profile: Utf8PathBuf,
    },
    /// Delete the company profile owned by an account.
    Delete {
        /// Owning account identifier.
        user_id: u64,
    },
    /// List every company profile.
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
}

/// `applications` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ApplicationsCommand {
    /// Apply to a job with a resume.
    Apply {
        /// Posting identifier.
        job_id: u64,
        /// Candidate profile identifier.
        #[arg(long)]
        candidate: u64,
        /// Resume to upload.
        #[arg(long, value_name = "path")]
        resume: Utf8PathBuf,
    },
    /// Applications received for an employer's postings.
    Received {
        /// Employer account identifier (the signed-in one by default).
        #[arg(long)]
        employer: Option<u64>,
        /// Only the job with exactly this title.
        #[arg(long)]
        job_title: Option<String>,
        /// Only applications in this review state.
        #[arg(long, value_parser = parse_application_status)]
        status: Option<ApplicationStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Applications a candidate has submitted.
    Mine {
        /// Candidate profile identifier.
        #[arg(long)]
        candidate: u64,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Set the review state of an application.
    Status {
        /// Application identifier.
        id: u64,
        /// `Pending`, `Reviewed`, `Shortlisted` or `Rejected`.
        #[arg(value_parser = parse_application_status)]
        status: ApplicationStatus,
    },
    /// Board-wide application count.
    Total,
}

/// `dashboard` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum DashboardCommand {
    /// Postings and applications of an employer.
    Employer {
        /// Employer account identifier (the signed-in one by default).
        #[arg(long)]
        employer: Option<u64>,
    },
    /// Board-wide figures.
    Admin,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("unknown role '{raw}'"))
}

fn parse_employment_status(raw: &str) -> Result<EmploymentStatus, String> {
    EmploymentStatus::parse(raw).ok_or_else(|| format!("unknown employment status '{raw}'"))
}

fn parse_application_status(raw: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::parse(raw).ok_or_else(|| format!("unknown application status '{raw}'"))
}
