// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for contrastbot

use contrastbot::auditor::{audit, ContrastAssertion, Grade, Tier};
use contrastbot::config::{load_config, write_default_config, Config};
use contrastbot::error::ContrastError;
use contrastbot::fleet::findings_from_report;
use contrastbot::palette::Palette;
use contrastbot::report::{generate_report, OutputFormat, ThemeAudit};
use std::path::Path;
use tempfile::TempDir;

fn audit_fixture(path: &str, theme: &str) -> ThemeAudit {
    let config = load_config(Path::new(path)).expect("fixture should load");
    let report = config
        .theme(theme)
        .expect("theme should exist")
        .audit()
        .expect("audit should succeed");
    ThemeAudit::new(theme, report)
}

#[test]
fn test_dark_site_theme_passes() {
    let audit = audit_fixture("tests/fixtures/site.toml", "dark");
    let report = &audit.report;

    assert_eq!(report.total(), 8);
    assert_eq!(report.fail_count(), 0);
    assert_eq!(report.aaa_count(), 6);
    assert_eq!(report.aa_count(), 2);
    assert_eq!(report.grade(), Grade::APlus);
    assert_eq!(report.best().description(), "Primary text on primary background");
    assert_eq!(report.worst().description(), "Border on primary background");
    assert_eq!(report.worst().tier(), Tier::AA);
}

#[test]
fn test_fixture_min_grade() {
    let config = load_config(Path::new("tests/fixtures/site.toml")).unwrap();
    assert_eq!(config.min_grade, Some(Grade::B));
}

#[test]
fn test_light_yaml_theme_flags_accent() {
    let audit = audit_fixture("tests/fixtures/light.yaml", "light");
    let report = &audit.report;

    assert_eq!(report.pass_count(), 3);
    assert_eq!(report.fail_count(), 1);
    assert_eq!(report.pass_rate(), 75.0);
    assert_eq!(report.grade(), Grade::C);

    let failures: Vec<_> = report.failures().map(|r| r.foreground_token()).collect();
    assert_eq!(failures, ["accent"]);

    // The caption pair only clears the large-text threshold
    let caption = &report.results()[3];
    assert!(caption.large_text());
    assert_eq!(caption.tier(), Tier::AA);
}

#[test]
fn test_undefined_token_aborts_theme() {
    let config = load_config(Path::new("tests/fixtures/broken.yml")).unwrap();
    let err = config.theme("broken").unwrap().audit().unwrap_err();
    assert!(
        matches!(&err, ContrastError::UnknownColorToken { name } if name == "link"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_reports_for_multiple_themes() {
    let audits = [
        audit_fixture("tests/fixtures/site.toml", "dark"),
        audit_fixture("tests/fixtures/light.yaml", "light"),
    ];

    let text = generate_report(&audits, OutputFormat::Text);
    assert!(text.contains("--- Theme: dark ---"));
    assert!(text.contains("--- Theme: light ---"));
    assert!(text.contains("RESULT: FAIL"));

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&audits, OutputFormat::Json)).expect("valid JSON");
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["report"]["grade"], "C");

    let sarif: serde_json::Value =
        serde_json::from_str(&generate_report(&audits, OutputFormat::Sarif)).expect("valid JSON");
    assert_eq!(sarif["runs"][0]["tool"]["driver"]["name"], "contrastbot");
    let levels: Vec<_> = sarif["runs"][0]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels.iter().filter(|l| *l == "error").count(), 1);
}

#[test]
fn test_fleet_findings_block_release_only_on_failure() {
    let dark = audit_fixture("tests/fixtures/site.toml", "dark");
    let light = audit_fixture("tests/fixtures/light.yaml", "light");

    let dark_findings = findings_from_report(&dark.theme, &dark.report);
    assert!(!dark_findings.blocks_release());
    assert_eq!(dark_findings.warnings().len(), 2);

    let light_findings = findings_from_report(&light.theme, &light.report);
    assert!(light_findings.blocks_release());
}

#[test]
fn test_default_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contrastbot.toml");
    write_default_config(&path).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.theme_names(), ["dark", "light"]);
}

#[test]
fn test_body_copy_scenario() {
    let palette = Palette::from_hex_pairs([("text", "#ffffff"), ("bg", "#0a0a0a")]).unwrap();
    let report = audit(&palette, &[ContrastAssertion::new("text", "bg", "body copy")]).unwrap();
    let result = &report.results()[0];

    assert!((result.ratio() - 19.6).abs() < 0.25, "got {:.3}", result.ratio());
    assert_eq!(result.tier(), Tier::AAA);
    assert!(result.passed());
}

#[test]
fn test_link_scenario() {
    let palette = Palette::from_hex_pairs([("accent", "#b8941f"), ("bg", "#f9f5ee")]).unwrap();
    let link = ContrastAssertion::new("accent", "bg", "link");
    let report = audit(&palette, &[link]).unwrap();

    assert_eq!(report.results()[0].tier(), Tier::Fail);
    assert!(!report.results()[0].passed());
    assert_eq!(report.grade(), Grade::C);
}
