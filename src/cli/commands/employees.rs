//! Employee management commands

use super::{fail, open_business, open_session, resolve_employee, CommandResult};
use crate::args::EmployeesSubcommand;
use relevate::config::Config;
use relevate::validation::validate_email;

/// Dispatch employees subcommands
pub fn run(subcommand: EmployeesSubcommand, config: &Config) -> CommandResult {
    let mut business = open_business(config)?;

    match subcommand {
        EmployeesSubcommand::List { status } => {
            let employees: Vec<_> = business
                .employees()
                .iter()
                .filter(|e| status.is_none_or(|s| e.status == s))
                .collect();
            if employees.is_empty() {
                println!("No employees.");
                return Ok(());
            }
            for employee in employees {
                println!(
                    "{:<18} {:<20} {:<32} {:<12} joined {}  courses: {}",
                    employee.id,
                    employee.name,
                    employee.email,
                    employee.status,
                    employee.joined_date.format("%Y-%m-%d"),
                    employee.assigned_courses.len()
                );
            }
        }
        EmployeesSubcommand::Add { name, email } => {
            if name.trim().is_empty() {
                return Err("✗ Name is required".to_string());
            }
            if !validate_email(&email) {
                return Err("✗ Please enter a valid email address".to_string());
            }
            let employee = business.add_employee(&name, &email).map_err(fail)?;
            println!("✓ Invited {} <{}> as {}", employee.name, employee.email, employee.id);
        }
        EmployeesSubcommand::Status { employee_id, status } => {
            business
                .update_employee_status(&employee_id, status)
                .map_err(fail)?;
            println!("✓ {employee_id} is now {status}");
        }
        EmployeesSubcommand::Assign { employee_id, course_id } => {
            if business.assign_course(&employee_id, &course_id).map_err(fail)? {
                println!("✓ Assigned {course_id} to {employee_id}");
            } else {
                println!("✓ {course_id} was already assigned to {employee_id}");
            }
        }
        EmployeesSubcommand::Unassign { employee_id, course_id } => {
            if business.unassign_course(&employee_id, &course_id).map_err(fail)? {
                println!("✓ Unassigned {course_id} from {employee_id}");
            } else {
                println!("✓ {course_id} was not assigned to {employee_id}");
            }
        }
        EmployeesSubcommand::Progress { employee_id } => {
            let session = open_session(config);
            let employee = resolve_employee(&business, &session, employee_id.as_deref())?;
            let progress = business.employee_progress(&employee.id).map_err(fail)?;

            println!("\n=== {} ({}) ===\n", employee.name, employee.id);
            println!(
                "Progress: {}/{} assigned courses passed ({}%)",
                progress.completed, progress.assigned, progress.percent
            );
            for course in business.assigned_courses(&employee.id).map_err(fail)? {
                let best = business
                    .get_employee_completions(&employee.id)
                    .into_iter()
                    .filter(|c| c.course_id == course.id)
                    .map(|c| c.score)
                    .max();
                let mark = match best {
                    Some(score) if relevate::quiz::is_passing(score) => format!("✓ {score}%"),
                    Some(score) => format!("✗ {score}%"),
                    None => "-".to_string(),
                };
                println!("  {:<8} {:<18} {}", mark, course.id, course.title);
            }
        }
    }
    Ok(())
}
