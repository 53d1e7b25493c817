//! Certificate commands

use super::{fail, open_business, open_session, CommandResult};
use crate::args::CertificatesSubcommand;
use relevate::config::Config;
use relevate::export::write_certificate;
use relevate::models::{Certificate, UserRole};
use std::path::PathBuf;

/// Dispatch certificates subcommands
pub fn run(subcommand: CertificatesSubcommand, config: &Config) -> CommandResult {
    let business = open_business(config)?;

    match subcommand {
        CertificatesSubcommand::List { employee } => {
            let session = open_session(config);
            let employee_id = employee.or_else(|| {
                session
                    .user()
                    .filter(|u| u.role == UserRole::Employee)
                    .and_then(|_| session.current_employee(&business))
                    .map(|e| e.id.clone())
            });

            let certificates: Vec<&Certificate> = match &employee_id {
                Some(id) => business.get_employee_certificates(id),
                None => business.certificates().iter().collect(),
            };

            let plural = if certificates.len() == 1 { "" } else { "s" };
            println!("{} Certificate{plural} Earned\n", certificates.len());
            for cert in certificates {
                println!(
                    "{:<20} {:<16} {:<40} {:>3}%  {}  Issued by {}",
                    cert.id,
                    cert.employee_name,
                    cert.course_title,
                    cert.score,
                    cert.completed_date.format("%B %-d, %Y"),
                    cert.company_name
                );
            }
        }
        CertificatesSubcommand::Render {
            certificate_ids,
            all,
            out,
        } => {
            let dir = out.unwrap_or_else(|| PathBuf::from(&config.paths.certificates_dir));
            let selected: Vec<&Certificate> = if all {
                business.certificates().iter().collect()
            } else {
                certificate_ids
                    .iter()
                    .map(|id| {
                        business
                            .certificate(id)
                            .ok_or_else(|| format!("✗ Certificate not found: '{id}'"))
                    })
                    .collect::<Result<_, _>>()?
            };

            if selected.is_empty() {
                println!("No certificates to render.");
            }
            for cert in selected {
                let path = write_certificate(cert, &dir).map_err(fail)?;
                println!("✓ Certificate written: {}", path.display());
            }
        }
        CertificatesSubcommand::Verify => {
            let issues = business.ledger_issues();
            if issues.is_empty() {
                println!(
                    "✓ {} certificates match {} passing completions",
                    business.certificates().len(),
                    business.completions().iter().filter(|c| c.passed).count()
                );
            } else {
                for issue in &issues {
                    eprintln!("✗ {issue}");
                }
                return Err(format!("✗ {} ledger issue(s) found", issues.len()));
            }
        }
    }
    Ok(())
}
