//! Company model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Starter plan
    Starter,
    /// Growth plan
    Growth,
    /// Enterprise plan
    Enterprise,
}

impl Plan {
    /// Name shown to users
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Growth => "Growth",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starter" => Ok(Self::Starter),
            "growth" => Ok(Self::Growth),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(format!("Unknown plan: '{s}'")),
        }
    }
}

/// The logged-in employer's company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    /// Company name, printed on certificates
    pub name: String,
    /// Subscription plan
    pub plan: Plan,
    /// Seat count declared by the employer
    pub employee_count: u32,
}

impl CompanyInfo {
    /// Create company info
    #[must_use]
    pub const fn new(name: String, plan: Plan, employee_count: u32) -> Self {
        Self {
            name,
            plan,
            employee_count,
        }
    }
}
