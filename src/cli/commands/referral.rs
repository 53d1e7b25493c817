//! Refer a college

use super::{fail, CommandResult};
use crate::args::ReferralArgs;
use relevate::config::Config;
use relevate::referral::{Referral, ReferralClient};

/// Validate the referral and post it, or print it with `--dry-run`
pub fn run(args: ReferralArgs, config: &Config) -> CommandResult {
    let referral = Referral {
        full_name: args.name,
        email: args.email,
        college_address: args.college,
        consent: args.consent,
    };
    referral.validate().map_err(fail)?;

    if args.dry_run {
        let body = serde_json::to_string_pretty(&referral.payload()).map_err(fail)?;
        println!("POST {}\n{body}", config.referral.endpoint);
        return Ok(());
    }

    let client = ReferralClient::new(&config.referral.endpoint).map_err(fail)?;
    client.submit(&referral).map_err(fail)?;
    println!("✓ Thank you! We'll reach out to your college soon.");
    Ok(())
}
