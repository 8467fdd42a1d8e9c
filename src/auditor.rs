// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrast auditor - WCAG 1.4.3 Contrast (Minimum) / 1.4.6 Contrast (Enhanced)
//!
//! Evaluates foreground/background assertions against a palette and
//! aggregates them into a graded compliance report.
//! - AA: 4.5:1 for normal text, 3:1 for large text
//! - AAA: 7:1 for normal text, 4.5:1 for large text

use crate::color::{contrast_ratio, Rgb};
use crate::error::{ContrastError, Result};
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// AA minimum for normal text
pub const AA_NORMAL: f64 = 4.5;
/// AA minimum for large text
pub const AA_LARGE: f64 = 3.0;
/// AAA minimum for normal text
pub const AAA_NORMAL: f64 = 7.0;
/// AAA minimum for large text
pub const AAA_LARGE: f64 = 4.5;

/// A request to check one foreground/background pair of a palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContrastAssertion {
    /// Foreground token name
    pub foreground: String,
    /// Background token name
    pub background: String,
    /// Human-readable role, e.g. "Body copy on card"
    pub description: String,
    /// Large text is held to the relaxed thresholds
    #[serde(default)]
    pub large_text: bool,
}

impl ContrastAssertion {
    /// Assertion for normal-size text
    pub fn new(foreground: &str, background: &str, description: &str) -> Self {
        Self {
            foreground: foreground.to_string(),
            background: background.to_string(),
            description: description.to_string(),
            large_text: false,
        }
    }

    /// Hold this assertion to the large-text thresholds
    pub fn large_text(mut self, large_text: bool) -> Self {
        self.large_text = large_text;
        self
    }

    /// (AA, AAA) thresholds that apply to this assertion
    pub fn thresholds(&self) -> (f64, f64) {
        thresholds(self.large_text)
    }
}

/// (AA, AAA) thresholds for normal or large text
pub fn thresholds(large_text: bool) -> (f64, f64) {
    if large_text {
        (AA_LARGE, AAA_LARGE)
    } else {
        (AA_NORMAL, AAA_NORMAL)
    }
}

/// Conformance tier reached by a single result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "FAIL")]
    Fail,
    AA,
    AAA,
}

impl Tier {
    /// Classify a ratio for normal or large text
    pub fn classify(ratio: f64, large_text: bool) -> Self {
        let (aa, aaa) = thresholds(large_text);
        if ratio >= aaa {
            Tier::AAA
        } else if ratio >= aa {
            Tier::AA
        } else {
            Tier::Fail
        }
    }

    pub fn passes(&self) -> bool {
        !matches!(self, Tier::Fail)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Fail => write!(f, "FAIL"),
            Tier::AA => write!(f, "AA"),
            Tier::AAA => write!(f, "AAA"),
        }
    }
}

/// Outcome of evaluating one assertion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastResult {
    description: String,
    foreground_token: String,
    background_token: String,
    foreground: Rgb,
    background: Rgb,
    large_text: bool,
    ratio: f64,
    threshold: f64,
    tier: Tier,
    pass: bool,
}

impl ContrastResult {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn foreground_token(&self) -> &str {
        &self.foreground_token
    }

    pub fn background_token(&self) -> &str {
        &self.background_token
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn large_text(&self) -> bool {
        self.large_text
    }

    /// Contrast ratio, always >= 1.0
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// AA threshold this result was held to
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// AAA threshold for the same text size
    pub fn aaa_threshold(&self) -> f64 {
        thresholds(self.large_text).1
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn passed(&self) -> bool {
        self.pass
    }
}

/// Letter grade derived from the pass rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    C,
    B,
    #[serde(rename = "B+")]
    BPlus,
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// Grade a pass rate given as a percentage. Each band includes its lower bound.
    pub fn from_pass_rate(pass_rate: f64) -> Self {
        if pass_rate >= 95.0 {
            Grade::APlus
        } else if pass_rate >= 90.0 {
            Grade::A
        } else if pass_rate >= 85.0 {
            Grade::BPlus
        } else if pass_rate >= 80.0 {
            Grade::B
        } else {
            Grade::C
        }
    }

    /// Grade from exact counts, avoiding float rounding at band edges
    fn from_counts(passed: usize, total: usize) -> Self {
        let (passed, total) = (passed as u128 * 100, total as u128);
        if passed >= 95 * total {
            Grade::APlus
        } else if passed >= 90 * total {
            Grade::A
        } else if passed >= 85 * total {
            Grade::BPlus
        } else if passed >= 80 * total {
            Grade::B
        } else {
            Grade::C
        }
    }

    /// Qualifier shown next to the letter in reports
    pub fn qualifier(&self) -> &'static str {
        match self {
            Grade::APlus => "Excellent",
            Grade::A => "Outstanding",
            Grade::BPlus => "Very Good",
            Grade::B => "Good",
            Grade::C => "Needs Improvement",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::APlus => write!(f, "A+"),
            Grade::A => write!(f, "A"),
            Grade::BPlus => write!(f, "B+"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            other => Err(format!("Unknown grade: {}", other)),
        }
    }
}

/// Aggregated outcome of one audit run. Results keep input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    results: Vec<ContrastResult>,
    pass_count: usize,
    fail_count: usize,
    aa_count: usize,
    aaa_count: usize,
    best_index: usize,
    worst_index: usize,
    pass_rate: f64,
    grade: Grade,
}

impl ComplianceReport {
    fn from_results(results: Vec<ContrastResult>) -> Result<Self> {
        let Some(first) = results.first() else {
            return Err(ContrastError::EmptyAssertionSet);
        };

        let (mut best_index, mut worst_index) = (0, 0);
        let (mut best, mut worst) = (first.ratio, first.ratio);
        let (mut fail_count, mut aa_count, mut aaa_count) = (0, 0, 0);

        for (idx, result) in results.iter().enumerate() {
            // Strict comparisons keep the earliest entry on ties
            if result.ratio > best {
                best = result.ratio;
                best_index = idx;
            }
            if result.ratio < worst {
                worst = result.ratio;
                worst_index = idx;
            }
            match result.tier {
                Tier::Fail => fail_count += 1,
                Tier::AA => aa_count += 1,
                Tier::AAA => aaa_count += 1,
            }
        }

        let total = results.len();
        let pass_count = total - fail_count;

        Ok(Self {
            pass_count,
            fail_count,
            aa_count,
            aaa_count,
            best_index,
            worst_index,
            pass_rate: pass_count as f64 / total as f64 * 100.0,
            grade: Grade::from_counts(pass_count, total),
            results,
        })
    }

    pub fn results(&self) -> &[ContrastResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    /// Results that met AA but not AAA
    pub fn aa_count(&self) -> usize {
        self.aa_count
    }

    pub fn aaa_count(&self) -> usize {
        self.aaa_count
    }

    /// Count of results in `tier`
    pub fn tier_count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Fail => self.fail_count,
            Tier::AA => self.aa_count,
            Tier::AAA => self.aaa_count,
        }
    }

    /// Highest ratio; the first one on ties
    pub fn best(&self) -> &ContrastResult {
        &self.results[self.best_index]
    }

    /// Lowest ratio; the first one on ties
    pub fn worst(&self) -> &ContrastResult {
        &self.results[self.worst_index]
    }

    /// Passing share of results, as a percentage
    pub fn pass_rate(&self) -> f64 {
        self.pass_rate
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn has_failures(&self) -> bool {
        self.fail_count > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ContrastResult> {
        self.results.iter().filter(|r| !r.pass)
    }
}

/// Evaluate a single assertion against a palette
pub fn evaluate(palette: &Palette, assertion: &ContrastAssertion) -> Result<ContrastResult> {
    let foreground = palette.resolve(&assertion.foreground)?;
    let background = palette.resolve(&assertion.background)?;

    let ratio = contrast_ratio(foreground, background);
    let (threshold, _) = assertion.thresholds();
    let tier = Tier::classify(ratio, assertion.large_text);

    debug!(
        description = %assertion.description,
        foreground = %foreground,
        background = %background,
        ratio,
        tier = %tier,
        "Evaluated contrast assertion"
    );

    Ok(ContrastResult {
        description: assertion.description.clone(),
        foreground_token: assertion.foreground.clone(),
        background_token: assertion.background.clone(),
        foreground,
        background,
        large_text: assertion.large_text,
        ratio,
        threshold,
        tier,
        pass: tier.passes(),
    })
}

/// Evaluate every assertion and aggregate a compliance report.
///
/// The first unresolvable token aborts the whole run; a partial report is
/// never produced.
pub fn audit(palette: &Palette, assertions: &[ContrastAssertion]) -> Result<ComplianceReport> {
    if assertions.is_empty() {
        return Err(ContrastError::EmptyAssertionSet);
    }

    let results = assertions
        .iter()
        .map(|assertion| evaluate(palette, assertion))
        .collect::<Result<Vec<_>>>()?;

    let report = ComplianceReport::from_results(results)?;

    info!(
        total = report.total(),
        passed = report.pass_count(),
        failed = report.fail_count(),
        pass_rate = report.pass_rate(),
        grade = %report.grade(),
        "Contrast audit complete"
    );

    Ok(report)
}
