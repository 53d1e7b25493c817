//! CLI argument definitions for `Relevate`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use relevate::config::ConfigOverrides;
use relevate::logger::Level;
use relevate::models::{CourseCategory, EmployeeStatus, Plan, UserRole};

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key (e.g., `level`, `data_dir`, `exports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CoursesSubcommand {
    /// List the course library.
    List {
        /// Only courses in this category (e.g., "leadership", "Health & Safety")
        #[arg(long, value_parser = clap::value_parser!(CourseCategory))]
        category: Option<CourseCategory>,
        /// Only courses whose title or description contains this text
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// Show one course with its learning points.
    Show {
        /// Course id (e.g., `hospitality-1`)
        #[arg(value_name = "COURSE")]
        course_id: String,
        /// Also print the lesson pages
        #[arg(long)]
        pages: bool,
    },
    /// Add a course to favorites, or remove it if already there.
    Favorite {
        /// Course id
        #[arg(value_name = "COURSE")]
        course_id: String,
    },
    /// List favorite courses.
    Favorites,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesSubcommand {
    /// List employees.
    List {
        /// Only employees with this status
        #[arg(long, value_parser = clap::value_parser!(EmployeeStatus))]
        status: Option<EmployeeStatus>,
    },
    /// Invite a new employee.
    Add {
        /// Full name
        #[arg(value_name = "NAME")]
        name: String,
        /// Email address
        #[arg(value_name = "EMAIL")]
        email: String,
    },
    /// Change an employee's status (invited, active, deactivated).
    Status {
        /// Employee id
        #[arg(value_name = "EMPLOYEE")]
        employee_id: String,
        /// New status
        #[arg(value_name = "STATUS", value_parser = clap::value_parser!(EmployeeStatus))]
        status: EmployeeStatus,
    },
    /// Assign a course to an employee.
    Assign {
        /// Employee id
        #[arg(value_name = "EMPLOYEE")]
        employee_id: String,
        /// Course id
        #[arg(value_name = "COURSE")]
        course_id: String,
    },
    /// Remove a course assignment.
    Unassign {
        /// Employee id
        #[arg(value_name = "EMPLOYEE")]
        employee_id: String,
        /// Course id
        #[arg(value_name = "COURSE")]
        course_id: String,
    },
    /// Show progress through assigned courses.
    ///
    /// Without an id, shows the signed-in employee.
    Progress {
        /// Employee id
        #[arg(value_name = "EMPLOYEE")]
        employee_id: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CompletionsSubcommand {
    /// List completion records.
    List {
        /// Only this employee's records
        #[arg(long, value_name = "EMPLOYEE")]
        employee: Option<String>,
        /// Only this course's records
        #[arg(long, value_name = "COURSE")]
        course: Option<String>,
        /// Only records from the last seven days
        #[arg(long = "new")]
        only_new: bool,
    },
    /// Record a completion directly.
    Add {
        /// Employee id
        #[arg(value_name = "EMPLOYEE")]
        employee_id: String,
        /// Course id
        #[arg(value_name = "COURSE")]
        course_id: String,
        /// Score in percent (0-100)
        #[arg(value_name = "SCORE")]
        score: u8,
        /// Pass flag; derived from the score when omitted
        #[arg(long, value_parser = BoolishValueParser::new())]
        passed: Option<bool>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CertificatesSubcommand {
    /// List certificates.
    ///
    /// Without `--employee`, lists the signed-in employee's certificates, or
    /// every certificate when the signed-in user is not an employee.
    List {
        /// Only this employee's certificates
        #[arg(long, value_name = "EMPLOYEE")]
        employee: Option<String>,
    },
    /// Render certificates as HTML pages.
    Render {
        /// Certificate ids
        #[arg(value_name = "CERTIFICATES", required_unless_present = "all")]
        certificate_ids: Vec<String>,
        /// Render every certificate
        #[arg(long)]
        all: bool,
        /// Output directory (defaults to config `certificates_dir`)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Check that certificates match passing completions one-to-one.
    Verify,
}

/// Employer signup form fields
#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Company name
    #[arg(long, default_value = "")]
    pub company: String,
    /// Your name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Login email
    #[arg(long, default_value = "")]
    pub email: String,
    /// Password (at least 8 characters)
    #[arg(long, default_value = "")]
    pub password: String,
    /// Password again
    #[arg(long = "confirm-password", default_value = "")]
    pub confirm_password: String,
    /// Subscription plan
    #[arg(long, default_value = "growth", value_parser = clap::value_parser!(Plan))]
    pub plan: Plan,
    /// Agree to the Terms & Conditions
    #[arg(long = "agree-terms")]
    pub agree_terms: bool,
}

/// Referral form fields
#[derive(Debug, Args)]
pub struct ReferralArgs {
    /// Your full name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Your email
    #[arg(long, default_value = "")]
    pub email: String,
    /// College name and address
    #[arg(long, default_value = "")]
    pub college: String,
    /// Allow Relevate to contact the college
    #[arg(long)]
    pub consent: bool,
    /// Print the request body instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Browse the course library and manage favorites.
    Courses {
        #[command(subcommand)]
        subcommand: CoursesSubcommand,
    },
    /// Manage employees and their course assignments.
    Employees {
        #[command(subcommand)]
        subcommand: EmployeesSubcommand,
    },
    /// Take a course quiz and record the result.
    ///
    /// Questions are asked one at a time on stdin unless `--answers` is given.
    Quiz {
        /// Course id
        #[arg(value_name = "COURSE")]
        course_id: String,
        /// Employee taking the quiz (defaults to the signed-in employee)
        #[arg(long, value_name = "EMPLOYEE")]
        employee: Option<String>,
        /// Answers as 1-based option numbers, one per question (e.g., 2,1,3,1,4)
        #[arg(long, value_delimiter = ',', value_name = "N,N,...")]
        answers: Option<Vec<usize>>,
        /// Read the lesson pages before the quiz
        #[arg(long)]
        read: bool,
    },
    /// Inspect and record course completions.
    Completions {
        #[command(subcommand)]
        subcommand: CompletionsSubcommand,
    },
    /// List, render and verify certificates.
    Certificates {
        #[command(subcommand)]
        subcommand: CertificatesSubcommand,
    },
    /// Export the training report as CSV.
    Report {
        /// Output directory (defaults to config `exports_dir`)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Print the CSV instead of writing a file
        #[arg(long)]
        stdout: bool,
        /// Print the team summary instead of exporting
        #[arg(long)]
        summary: bool,
    },
    /// Create an employer account.
    Signup(SignupArgs),
    /// Sign in.
    Login {
        /// Email address
        #[arg(value_name = "EMAIL")]
        email: String,
        /// Password
        #[arg(long, default_value = "")]
        password: String,
        /// Dashboard role
        #[arg(long, default_value = "employee", value_parser = clap::value_parser!(UserRole))]
        role: UserRole,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Recommend Relevate to your college.
    Referral(ReferralArgs),
}

#[derive(Parser, Debug)]
#[command(
    name = "relevate",
    about = "Relevate business training command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Start from demo data when nothing is stored (true/false)
    #[arg(long = "seed-demo", value_parser = BoolishValueParser::new())]
    pub seed_demo: Option<bool>,

    /// Override config report directory
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Override config certificate directory
    #[arg(long = "certificates-dir", value_name = "DIR")]
    pub certificates_dir: Option<PathBuf>,

    /// Override config referral endpoint
    #[arg(long = "referral-endpoint", value_name = "URL")]
    pub referral_endpoint: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// The short form `--data-dir` takes precedence over `--config-data-dir`
    /// when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref())
                .or_else(|| path_string(self.config_data_dir.as_ref())),
            seed_demo: self.seed_demo,
            exports_dir: path_string(self.exports_dir.as_ref()),
            certificates_dir: path_string(self.certificates_dir.as_ref()),
            endpoint: self.referral_endpoint.clone(),
        }
    }
}
