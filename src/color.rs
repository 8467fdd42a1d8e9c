// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color model - WCAG 2.x relative luminance and contrast ratio
//!
//! Converts 6-digit sRGB hex values into relative luminance and computes
//! the contrast ratio between two colors.
//! <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>

use crate::error::{ContrastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linearization breakpoint of the sRGB transfer function, as WCAG 2.x states it
const SRGB_LINEAR_THRESHOLD: f64 = 0.03928;

/// Ambient flare term added to both luminances in the contrast ratio
const FLARE: f64 = 0.05;

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance of this color, in [0, 1]
    pub fn luminance(&self) -> f64 {
        relative_luminance(*self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ContrastError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ContrastError;

    fn try_from(value: String) -> Result<Self> {
        parse_color(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// A named color within a palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub color: Rgb,
}

impl ColorToken {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Parse `value` as a hex color and bind it to `name`
    pub fn parse(name: impl Into<String>, value: &str) -> Result<Self> {
        Ok(Self::new(name, parse_color(value)?))
    }
}

/// Parse a 6-digit hex color, with or without a leading `#`.
///
/// Shorthand (`#fff`), alpha channels and named colors are rejected; callers
/// resolve those to `#rrggbb` first.
pub fn parse_color(value: &str) -> Result<Rgb> {
    let hex = value.strip_prefix('#').unwrap_or(value);

    // Checking ASCII first keeps the byte slicing below on char boundaries
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ContrastError::invalid_color(value));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ContrastError::invalid_color(value))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// sRGB channel (0-255) to linear light
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= SRGB_LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x: 0.2126 R + 0.7152 G + 0.0722 B over
/// linearized channels
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors.
/// Returns a ratio in [1.0, 21.0]; argument order does not matter.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + FLARE) / (la.min(lb) + FLARE)
}
