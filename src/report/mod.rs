// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for contrast audits.
//!
//! Supports multiple output formats:
//! - Text: per-pair ratios, summary, best/worst pair, grade and recommendations
//! - JSON: the compliance reports, structured for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::auditor::{ComplianceReport, ContrastResult};
use crate::fleet::{findings_from_report, Severity};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// A theme name paired with its compliance report
#[derive(Debug, Clone, Serialize)]
pub struct ThemeAudit {
    pub theme: String,
    pub report: ComplianceReport,
}

impl ThemeAudit {
    pub fn new(theme: &str, report: ComplianceReport) -> Self {
        Self {
            theme: theme.to_string(),
            report,
        }
    }
}

/// Generate a report covering one or more audited themes
pub fn generate_report(audits: &[ThemeAudit], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(audits),
        OutputFormat::Json => generate_json_report(audits),
        OutputFormat::Sarif => generate_sarif_report(audits),
    }
}

/// Suggested follow-ups for a report
pub fn recommendations(report: &ComplianceReport) -> Vec<String> {
    let mut advice = Vec::new();

    if report.has_failures() {
        advice.push(format!(
            "Fix {} failing contrast combination(s)",
            report.fail_count()
        ));
    }
    if report.aa_count() > 0 {
        advice.push(format!(
            "Consider improving {} AA combination(s) to AAA where possible",
            report.aa_count()
        ));
    }
    if advice.is_empty() {
        advice.push("All combinations meet AAA; no changes needed".to_string());
    }

    advice
}

fn push_result(output: &mut String, result: &ContrastResult) {
    output.push_str(&format!("[{}] {}\n", result.tier(), result.description()));
    output.push_str(&format!(
        "  Colors: {} on {} ({} on {})\n",
        result.foreground(),
        result.background(),
        result.foreground_token(),
        result.background_token()
    ));
    output.push_str(&format!(
        "  Ratio: {:.2}:1 (needs {}:1 for {} text)\n",
        result.ratio(),
        result.threshold(),
        if result.large_text() { "large" } else { "normal" }
    ));
}

/// Generate human-readable text report
fn generate_text_report(audits: &[ThemeAudit]) -> String {
    let mut output = String::new();

    output.push_str("=== Contrastbot WCAG Contrast Report ===\n\n");

    for audit in audits {
        let report = &audit.report;
        output.push_str(&format!("--- Theme: {} ---\n", audit.theme));

        for result in report.results() {
            push_result(&mut output, result);
        }
        output.push('\n');

        output.push_str(&format!(
            "Summary: {} checked, {} passed, {} failed (AAA: {}, AA: {})\n",
            report.total(),
            report.pass_count(),
            report.fail_count(),
            report.aaa_count(),
            report.aa_count()
        ));
        output.push_str(&format!(
            "Best contrast: {} ({:.2}:1)\n",
            report.best().description(),
            report.best().ratio()
        ));
        output.push_str(&format!(
            "Worst contrast: {} ({:.2}:1)\n",
            report.worst().description(),
            report.worst().ratio()
        ));
        output.push_str(&format!(
            "Grade: {} ({}), {:.1}% pass rate\n",
            report.grade(),
            report.grade().qualifier(),
            report.pass_rate()
        ));

        output.push_str("Recommendations:\n");
        for advice in recommendations(report) {
            output.push_str(&format!("  - {}\n", advice));
        }
        output.push('\n');
    }

    if audits.iter().any(|a| a.report.has_failures()) {
        output.push_str("RESULT: FAIL (contrast below WCAG AA)\n");
    } else if audits.iter().any(|a| a.report.aa_count() > 0) {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(audits: &[ThemeAudit]) -> String {
    serde_json::to_string_pretty(audits).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize reports: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    name: String,
    #[serde(rename = "fullyQualifiedName")]
    fully_qualified_name: String,
}

/// Generate SARIF report
fn generate_sarif_report(audits: &[ThemeAudit]) -> String {
    let results: Vec<SarifResult> = audits
        .iter()
        .flat_map(|audit| findings_from_report(&audit.theme, &audit.report).findings)
        .map(|f| {
            let level = match f.severity {
                Severity::Error => "error",
                Severity::Warning => "note",
            };

            let locations = f
                .element
                .as_ref()
                .map(|element| SarifLocation {
                    logical_locations: vec![SarifLogicalLocation {
                        name: element.clone(),
                        fully_qualified_name: f.location_string(),
                    }],
                })
                .into_iter()
                .collect();

            SarifResult {
                rule_id: f.rule_id,
                level: level.to_string(),
                message: SarifMessage { text: f.message },
                locations,
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "contrastbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::{audit, ContrastAssertion};
    use crate::palette::Palette;

    fn sample_audit() -> ThemeAudit {
        let palette = Palette::from_hex_pairs([
            ("text", "#ffffff"),
            ("bg", "#0a0a0a"),
            ("muted", "#767676"),
            ("paper", "#ffffff"),
            ("accent", "#b8941f"),
            ("cream", "#f9f5ee"),
        ])
        .unwrap();
        let report = audit(
            &palette,
            &[
                ContrastAssertion::new("text", "bg", "Body copy"),
                ContrastAssertion::new("muted", "paper", "Caption"),
                ContrastAssertion::new("accent", "cream", "Link"),
            ],
        )
        .unwrap();
        ThemeAudit::new("site", report)
    }

    fn clean_audit() -> ThemeAudit {
        let palette = Palette::from_hex_pairs([("text", "#ffffff"), ("bg", "#000000")]).unwrap();
        let report = audit(&palette, &[ContrastAssertion::new("text", "bg", "Body copy")]).unwrap();
        ThemeAudit::new("mono", report)
    }

    #[test]
    fn test_text_report_contents() {
        let report = generate_report(&[sample_audit()], OutputFormat::Text);
        assert!(report.contains("--- Theme: site ---"));
        assert!(report.contains("[AAA] Body copy"));
        assert!(report.contains("Colors: #ffffff on #0a0a0a (text on bg)"));
        assert!(report.contains("Ratio: 4.54:1"));
        assert!(report.contains("Best contrast: Body copy"));
        assert!(report.contains("Worst contrast: Link"));
        assert!(report.contains("Grade: C (Needs Improvement), 66.7% pass rate"));
        assert!(report.contains("Fix 1 failing contrast combination(s)"));
        assert!(report.contains("RESULT: FAIL"));
    }

    #[test]
    fn test_text_report_clean() {
        let report = generate_report(&[clean_audit()], OutputFormat::Text);
        assert!(report.contains("Grade: A+ (Excellent), 100.0% pass rate"));
        assert!(report.contains("no changes needed"));
        assert!(report.trim_end().ends_with("RESULT: PASS"));
    }

    #[test]
    fn test_json_report() {
        let report = generate_report(&[sample_audit()], OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed[0]["theme"], "site");
        assert_eq!(parsed[0]["report"]["grade"], "C");
        assert_eq!(parsed[0]["report"]["worst_index"], 2);
        assert_eq!(parsed[0]["report"]["results"][2]["tier"], "FAIL");
        assert_eq!(parsed[0]["report"]["results"][0]["foreground"], "#ffffff");
    }

    #[test]
    fn test_sarif_report() {
        let report = generate_report(&[sample_audit(), clean_audit()], OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");

        let results = parsed["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["level"], "note");
        assert_eq!(results[1]["level"], "error");
        assert_eq!(
            results[1]["locations"][0]["logicalLocations"][0]["fullyQualifiedName"],
            "site: accent on cream"
        );
    }

    #[test]
    fn test_sarif_aa_pair_is_note() {
        let palette = Palette::from_hex_pairs([("muted", "#767676"), ("paper", "#ffffff")]).unwrap();
        let report = audit(&palette, &[ContrastAssertion::new("muted", "paper", "Caption")]).unwrap();
        let sarif = generate_report(&[ThemeAudit::new("site", report)], OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&sarif).expect("valid JSON");

        let results = parsed["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["level"], "note");
        assert_eq!(results[0]["ruleId"], "WCAG-1.4.6-contrast-aaa");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
