//! Command-line interface entry point for `Relevate`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::quiz::QuizArgs;
use relevate::config::Config;
use relevate::info;
use relevate::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; unknown values fall back to warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Courses { subcommand } => commands::courses::run(subcommand, &config, verbose),
        Command::Employees { subcommand } => commands::employees::run(subcommand, &config),
        Command::Quiz {
            course_id,
            employee,
            answers,
            read,
        } => commands::quiz::run(
            &QuizArgs {
                course_id: &course_id,
                employee: employee.as_deref(),
                answers: answers.as_deref(),
                read,
            },
            &config,
            verbose,
        ),
        Command::Completions { subcommand } => commands::completions::run(subcommand, &config),
        Command::Certificates { subcommand } => commands::certificates::run(subcommand, &config),
        Command::Report { out, stdout, summary } => {
            commands::report::run(out.as_deref(), stdout, summary, &config)
        }
        Command::Signup(signup) => commands::session::signup(signup, &config),
        Command::Login {
            email,
            password,
            role,
        } => commands::session::login(&email, &password, role, &config),
        Command::Logout => commands::session::logout(&config),
        Command::Whoami => commands::session::whoami(&config),
        Command::Referral(referral) => commands::referral::run(referral, &config),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
