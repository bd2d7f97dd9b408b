// src/export.rs

use crate::core::models::{OutputFormat, ScanReport};
use color_eyre::eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::info;

/// Writes a finished report to `{domain}_scan_results.{ext}` in the working
/// directory and returns the path.
///
/// The JSON form is the full `ScanReport`; the text form is a flat summary
/// suitable for grepping.
pub fn export_report(report: &ScanReport) -> Result<PathBuf> {
    let extension = match report.config.output_format {
        OutputFormat::Json => "json",
        OutputFormat::Text => "txt",
    };
    let path = PathBuf::from(format!(
        "{}_scan_results.{extension}",
        report.config.target_domain
    ));

    let content = match report.config.output_format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).wrap_err("serializing report")?
        }
        OutputFormat::Text => render_text(report),
    };

    std::fs::write(&path, content)
        .wrap_err_with(|| format!("writing report to {}", path.display()))?;
    info!(path = %path.display(), "Report exported.");
    Ok(path)
}

fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Scan report for {}\n\n", report.config.target_domain));

    for sub in &report.subdomains {
        let status = sub
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let server = sub.server.as_deref().unwrap_or("N/A");
        out.push_str(&format!("{}\t{}\t{}\n", sub.url, status, server));
    }

    if !report.vulnerable_parameters.is_empty() {
        out.push_str("\nFlagged parameters:\n");
        for finding in &report.vulnerable_parameters {
            out.push_str(&format!("{}\t{}\n", finding.parameter, finding.url));
        }
    }

    out.push_str(&format!(
        "\nTotal: {} subdomains, {} active, {} findings\n",
        report.subdomains.len(),
        report.active_count(),
        report.vulnerable_parameters.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ScanConfig, Subdomain};

    #[test]
    fn text_rendering_lists_hosts_and_totals() {
        let mut report = ScanReport::new(ScanConfig {
            target_domain: "example.com".to_string(),
            ..ScanConfig::default()
        });
        report.subdomains.push(Subdomain {
            status: Some(200),
            is_active: true,
            server: Some("nginx".to_string()),
            ..Subdomain::unchecked("api.example.com")
        });
        report.subdomains.push(Subdomain::unchecked("old.example.com"));

        let text = render_text(&report);
        assert!(text.contains("api.example.com\t200\tnginx"));
        assert!(text.contains("old.example.com\tN/A\tN/A"));
        assert!(text.contains("2 subdomains, 1 active, 0 findings"));
    }
}
