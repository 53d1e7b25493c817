//! Training report and team summary

use super::{fail, open_business, CommandResult};
use relevate::config::Config;
use relevate::export::{training_report_csv, write_training_report};
use std::path::{Path, PathBuf};

/// Export the training report, or print the team summary
pub fn run(out: Option<&Path>, to_stdout: bool, summary: bool, config: &Config) -> CommandResult {
    let business = open_business(config)?;

    if summary {
        let company = business.company();
        let team = business.team_summary();
        println!("\n=== {} ({} plan) ===\n", company.name, company.plan);
        println!("Employees:         {} ({} active, {} invited)", team.total_employees, team.active_employees, team.invited_employees);
        println!("Completions:       {}", team.total_completions);
        println!("Certificates:      {}", team.certificates_issued);
        println!("Average score:     {}%", team.average_score);
        println!("Pass rate:         {}%", team.pass_rate);
        println!("New this week:     {}", business.new_completions().len());
        return Ok(());
    }

    if to_stdout {
        print!("{}", training_report_csv(&business).map_err(fail)?);
        return Ok(());
    }

    let dir = out.map_or_else(|| PathBuf::from(&config.paths.exports_dir), Path::to_path_buf);
    let path = write_training_report(&business, &dir).map_err(fail)?;
    println!("✓ Report generated: {}", path.display());
    Ok(())
}
