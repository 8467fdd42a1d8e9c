// SPDX-License-Identifier: PMPL-1.0-or-later
//! Fleet integration types for gitbot-fleet shared-context compatibility.
//!
//! A compliance report is turned into findings the fleet coordinator
//! understands: failing pairs block the release, pairs that only reach AA
//! are reported as warnings against the enhanced (AAA) criterion.

use crate::auditor::{ComplianceReport, ContrastResult, Tier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity levels for findings (mirrors gitbot-shared-context::Severity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical issue - blocks release
    Error,
    /// Should be addressed
    Warning,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Impact assessment: who is affected by an accessibility issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    /// Affects low-vision users
    pub low_vision: bool,
    /// Affects users with color vision deficiencies
    pub color_blind: bool,
}

impl ImpactAssessment {
    /// Contrast problems hit low-vision and color-blind readers alike
    pub fn contrast() -> Self {
        Self { low_vision: true, color_blind: true }
    }

    /// Describe affected groups
    pub fn affected_groups(&self) -> Vec<&'static str> {
        let mut groups = Vec::new();
        if self.low_vision { groups.push("low-vision"); }
        if self.color_blind { groups.push("color-blind"); }
        groups
    }
}

/// A finding produced from a contrast result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Source bot identifier
    pub source: String,
    /// Rule/check identifier (e.g., "WCAG-1.4.3-contrast-aa")
    pub rule_id: String,
    /// Human-readable rule name
    pub rule_name: String,
    /// Severity level
    pub severity: Severity,
    /// Detailed message
    pub message: String,
    /// Category (e.g., "accessibility/wcag-aa")
    pub category: String,
    /// Theme the pair belongs to
    pub theme: Option<String>,
    /// Token pair involved, as "foreground on background"
    pub element: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
    /// When this finding was created
    pub created_at: DateTime<Utc>,
    /// WCAG criterion reference
    pub wcag_criterion: Option<String>,
    /// WCAG conformance level
    pub wcag_level: Option<WcagLevel>,
    /// Impact assessment
    pub impact: Option<ImpactAssessment>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: "contrastbot".to_string(),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: String::new(),
            theme: None,
            element: None,
            suggestion: None,
            created_at: Utc::now(),
            wcag_criterion: None,
            wcag_level: None,
            impact: None,
        }
    }

    /// Set the WCAG criterion and level
    pub fn with_wcag(mut self, criterion: &str, level: WcagLevel) -> Self {
        self.wcag_criterion = Some(criterion.to_string());
        self.wcag_level = Some(level);
        self.category = match level {
            WcagLevel::AA => "accessibility/wcag-aa".to_string(),
            WcagLevel::AAA => "accessibility/wcag-aaa".to_string(),
        };
        self
    }

    /// Set the rule name
    pub fn with_rule_name(mut self, name: &str) -> Self {
        self.rule_name = name.to_string();
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme = Some(theme.to_string());
        self
    }

    /// Set the token pair
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    /// Set suggestion
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    /// Set impact assessment
    pub fn with_impact(mut self, impact: ImpactAssessment) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.theme, &self.element) {
            (Some(t), Some(e)) => format!("{}: {}", t, e),
            (Some(t), None) => t.clone(),
            (None, Some(e)) => e.clone(),
            _ => "<unknown>".to_string(),
        }
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSet {
    /// All findings
    pub findings: Vec<Finding>,
}

impl FindingSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend with findings from an iterator
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Get findings by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Finding for a single result, or `None` when it reaches AAA
pub fn finding_for_result(theme: &str, result: &ContrastResult) -> Option<Finding> {
    let element = format!("{} on {}", result.foreground_token(), result.background_token());
    let size = if result.large_text() { "large" } else { "normal" };

    let finding = match result.tier() {
        Tier::AAA => return None,
        Tier::Fail => Finding::new(
            "WCAG-1.4.3-contrast-aa",
            Severity::Error,
            &format!(
                "{}: contrast ratio {:.2}:1 ({} on {}) is below the WCAG AA minimum ({}:1) for {} text",
                result.description(),
                result.ratio(),
                result.foreground(),
                result.background(),
                result.threshold(),
                size
            ),
        )
        .with_wcag("1.4.3", WcagLevel::AA)
        .with_rule_name("Contrast (Minimum)")
        .with_suggestion(&format!(
            "Increase contrast between {} and {} to at least {}:1",
            result.foreground_token(),
            result.background_token(),
            result.threshold()
        )),
        Tier::AA => {
            let aaa = result.aaa_threshold();
            Finding::new(
                "WCAG-1.4.6-contrast-aaa",
                Severity::Warning,
                &format!(
                    "{}: contrast ratio {:.2}:1 ({} on {}) is below the WCAG AAA requirement ({}:1) for {} text",
                    result.description(),
                    result.ratio(),
                    result.foreground(),
                    result.background(),
                    aaa,
                    size
                ),
            )
            .with_wcag("1.4.6", WcagLevel::AAA)
            .with_rule_name("Contrast (Enhanced)")
            .with_suggestion(&format!(
                "Increase contrast to at least {}:1 for AAA compliance",
                aaa
            ))
        }
    };

    Some(
        finding
            .with_theme(theme)
            .with_element(&element)
            .with_impact(ImpactAssessment::contrast()),
    )
}

/// Convert a theme's compliance report into fleet findings
pub fn findings_from_report(theme: &str, report: &ComplianceReport) -> FindingSet {
    let mut findings = FindingSet::new();
    findings.extend(
        report
            .results()
            .iter()
            .filter_map(|result| finding_for_result(theme, result)),
    );
    findings
}
