//! Completion ledger commands

use super::{fail, open_business, CommandResult};
use crate::args::CompletionsSubcommand;
use relevate::config::Config;
use relevate::quiz::is_passing;

/// Dispatch completions subcommands
pub fn run(subcommand: CompletionsSubcommand, config: &Config) -> CommandResult {
    let mut business = open_business(config)?;

    match subcommand {
        CompletionsSubcommand::List {
            employee,
            course,
            only_new,
        } => {
            let records: Vec<_> = business
                .completions()
                .iter()
                .filter(|c| employee.as_deref().is_none_or(|id| c.employee_id == id))
                .filter(|c| course.as_deref().is_none_or(|id| c.course_id == id))
                .filter(|c| !only_new || business.is_new_completion(c.completed_date))
                .collect();

            if records.is_empty() {
                println!("No completions.");
                return Ok(());
            }
            for record in records {
                let badge = if business.is_new_completion(record.completed_date) {
                    "NEW"
                } else {
                    ""
                };
                println!(
                    "{:<20} {:<16} {:<40} {:>3}% {:<4} {} {:<20} {badge}",
                    record.id,
                    record.employee_name,
                    record.course_title,
                    record.score,
                    if record.passed { "pass" } else { "fail" },
                    record.completed_date.format("%Y-%m-%d"),
                    record.certificate_id.as_deref().unwrap_or("-"),
                );
            }
        }
        CompletionsSubcommand::Add {
            employee_id,
            course_id,
            score,
            passed,
        } => {
            let passed = passed.unwrap_or_else(|| is_passing(score));
            let record = business
                .add_completion(&employee_id, &course_id, score, passed)
                .map_err(fail)?;
            println!("✓ Recorded {} ({}%)", record.id, record.score);
            if let Some(cert) = record.certificate_id {
                println!("✓ Certificate issued: {cert}");
            }
        }
    }
    Ok(())
}
