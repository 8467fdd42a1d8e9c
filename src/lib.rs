// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrastbot - WCAG Contrast Compliance Auditor
//!
//! Part of the gitbot-fleet ecosystem. Contrastbot audits the color palettes
//! of a website's themes against the WCAG contrast criteria and grades each
//! theme on how many of its foreground/background pairs pass.
//!
//! ## Pipeline
//!
//! - **Color** (`color`): 6-digit hex to relative luminance and contrast ratio
//! - **Palette** (`palette`): named color tokens of one theme
//! - **Auditor** (`auditor`): assertions to results to a graded report
//!   (1.4.3 Contrast (Minimum) / 1.4.6 Contrast (Enhanced))
//! - **Report** (`report`): text, JSON and SARIF rendering
//! - **Fleet** (`fleet`): findings for the fleet coordinator

pub mod auditor;
pub mod color;
pub mod config;
pub mod error;
pub mod fleet;
pub mod palette;
pub mod report;

pub use auditor::{audit, evaluate, ComplianceReport, ContrastAssertion, ContrastResult, Grade, Tier};
pub use color::{contrast_ratio, parse_color, relative_luminance, ColorToken, Rgb};
pub use config::Config;
pub use error::{ContrastError, Result};
pub use palette::Palette;
