//! Printable certificate page

use super::{write_file, ExportError};
use crate::core::models::Certificate;
use askama::Template;
use std::path::{Path, PathBuf};

/// HTML certificate co-branded with the issuing company
#[derive(Debug, Template)]
#[template(path = "certificate.html")]
pub struct CertificateDocument<'a> {
    /// Certificate id, printed as a reference
    pub certificate_id: &'a str,
    /// Holder
    pub employee_name: &'a str,
    /// Course completed
    pub course_title: &'a str,
    /// Completion date, e.g. "June 1, 2024"
    pub completed_on: String,
    /// Score in percent
    pub score: u8,
    /// Issuing company
    pub company_name: &'a str,
}

impl<'a> CertificateDocument<'a> {
    /// Document for a certificate
    #[must_use]
    pub fn new(cert: &'a Certificate) -> Self {
        Self {
            certificate_id: &cert.id,
            employee_name: &cert.employee_name,
            course_title: &cert.course_title,
            completed_on: cert.completed_date.format("%B %-d, %Y").to_string(),
            score: cert.score,
            company_name: &cert.company_name,
        }
    }
}

/// Render `cert` and write it to `dir/<certificate id>.html`
///
/// # Errors
/// Returns an error if rendering or writing fails
pub fn write_certificate(cert: &Certificate, dir: &Path) -> Result<PathBuf, ExportError> {
    let html = CertificateDocument::new(cert).render()?;
    write_file(dir, &format!("{}.html", cert.id), &html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn cert() -> Certificate {
        Certificate {
            id: "cert-1".to_string(),
            employee_id: "emp-1".to_string(),
            employee_name: "Sarah Johnson".to_string(),
            course_id: "health-safety-1".to_string(),
            course_title: "Workplace Health & Safety Essentials".to_string(),
            completed_date: Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap(),
            score: 92,
            company_name: "Demo <Company> Ltd".to_string(),
        }
    }

    #[test]
    fn test_render_contains_details() {
        let cert = cert();
        let html = CertificateDocument::new(&cert).render().unwrap();
        assert!(html.contains("Sarah Johnson"));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains("92%"));
        assert!(html.contains("cert-1"));
    }

    #[test]
    fn test_render_escapes_html() {
        let cert = cert();
        let html = CertificateDocument::new(&cert).render().unwrap();
        assert!(html.contains("Health &amp; Safety"));
        assert!(html.contains("Demo &lt;Company&gt; Ltd"));
        assert!(!html.contains("<Company>"));
    }

    #[test]
    fn test_write_certificate() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("certs");
        let path = write_certificate(&cert(), &out).unwrap();
        assert_eq!(path, out.join("cert-1.html"));
        assert!(std::fs::read_to_string(path).unwrap().contains("Sarah Johnson"));
    }
}
