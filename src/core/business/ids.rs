//! Timestamp-based record ids (`emp-<millis>`, `comp-<millis>`, `cert-<millis>`)

use chrono::{DateTime, Utc};

/// Id prefix for employees
pub const EMPLOYEE_PREFIX: &str = "emp";
/// Id prefix for completion records
pub const COMPLETION_PREFIX: &str = "comp";
/// Id prefix for certificates
pub const CERTIFICATE_PREFIX: &str = "cert";

/// Hands out strictly increasing numeric suffixes.
///
/// The suffix is the current time in milliseconds unless that would repeat or
/// go below a suffix already issued or observed, in which case it is bumped.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator that has seen nothing
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Record an existing id so later ids never collide with it
    pub fn observe(&mut self, id: &str) {
        if let Some(n) = id
            .rsplit_once('-')
            .and_then(|(_, suffix)| suffix.parse::<i64>().ok())
        {
            self.last = self.last.max(n);
        }
    }

    /// Next id with `prefix`
    pub fn next(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        let n = now.timestamp_millis().max(self.last + 1);
        self.last = n;
        format!("{prefix}-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ids_use_millis() {
        let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(EMPLOYEE_PREFIX, now), "emp-1718000000123");
    }

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut ids = IdGenerator::new();
        let a = ids.next(COMPLETION_PREFIX, now);
        let b = ids.next(CERTIFICATE_PREFIX, now);
        assert_eq!(a, "comp-1000");
        assert_eq!(b, "cert-1001");
    }

    #[test]
    fn test_observed_ids_are_skipped() {
        let now = Utc.timestamp_millis_opt(50).unwrap();
        let mut ids = IdGenerator::new();
        ids.observe("emp-900");
        ids.observe("emp-1");
        ids.observe("not-a-number");
        assert_eq!(ids.next(EMPLOYEE_PREFIX, now), "emp-901");
    }
}
