//! Sign up, sign in and out

use super::{fail, open_business, open_session, CommandResult};
use crate::args::SignupArgs;
use relevate::config::Config;
use relevate::models::UserRole;
use relevate::validation::EmployerSignup;

/// Create an employer account: store the company and sign in as employer
pub fn signup(args: SignupArgs, config: &Config) -> CommandResult {
    let form = EmployerSignup {
        company_name: args.company,
        employer_name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        agreed_to_terms: args.agree_terms,
        plan: args.plan,
    };

    let errors = form.validate();
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("✗ {}: {err}", err.field);
        }
        return Err(format!("✗ Signup failed with {} error(s)", errors.len()));
    }

    let mut business = open_business(config)?;
    business.save_company(form.company()).map_err(fail)?;

    let mut session = open_session(config);
    session
        .login(&form.email, &form.password, UserRole::Employer)
        .map_err(fail)?;

    println!(
        "✓ Welcome, {}! {} is on the {} plan.",
        form.employer_name.trim(),
        business.company().name,
        business.company().plan
    );
    Ok(())
}

/// Sign in with any well-formed email and a password
pub fn login(email: &str, password: &str, role: UserRole, config: &Config) -> CommandResult {
    let mut session = open_session(config);
    let user = session.login(email, password, role).map_err(fail)?;
    println!("✓ Signed in as {} ({})", user.email, user.role);
    Ok(())
}

/// Forget the stored user
pub fn logout(config: &Config) -> CommandResult {
    let mut session = open_session(config);
    if !session.is_signed_in() {
        println!("Not signed in.");
        return Ok(());
    }
    session.logout().map_err(fail)?;
    println!("✓ Signed out");
    Ok(())
}

/// Show the signed-in user and their employee record
pub fn whoami(config: &Config) -> CommandResult {
    let session = open_session(config);
    let Some(user) = session.user() else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{} <{}> ({})", user.name, user.email, user.role);
    let business = open_business(config)?;
    match session.current_employee(&business) {
        Some(employee) => println!(
            "Employee {} at {}, {}",
            employee.id,
            business.company().name,
            employee.status
        ),
        None if user.role == UserRole::Employee => {
            println!("No employee record matches this email.");
        }
        None => {}
    }
    Ok(())
}
