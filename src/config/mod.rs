// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for contrastbot
//!
//! A configuration file lists themes; each theme carries its palette and the
//! foreground/background checks to audit. TOML and YAML are both accepted,
//! selected by file extension.

use crate::auditor::{audit, ComplianceReport, ContrastAssertion, Grade};
use crate::error::{ContrastError, Result};
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lowest acceptable grade per theme; unset means only failures count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_grade: Option<Grade>,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default = "default_themes")]
    pub themes: Vec<ThemeConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// One theme: its palette and the pairs to check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    /// Token name to `#rrggbb`
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub checks: Vec<ContrastAssertion>,
}

impl ThemeConfig {
    /// Build the theme palette, failing on the first malformed color
    pub fn palette(&self) -> Result<Palette> {
        Palette::from_hex_pairs(self.colors.iter().map(|(name, value)| (name.as_str(), value)))
    }

    pub fn assertions(&self) -> &[ContrastAssertion] {
        &self.checks
    }

    /// Audit every check of this theme
    pub fn audit(&self) -> Result<ComplianceReport> {
        debug!(theme = %self.name, checks = self.checks.len(), "Auditing theme");
        audit(&self.palette()?, &self.checks)
    }
}

impl Config {
    /// Look up a theme by name
    pub fn theme(&self, name: &str) -> Result<&ThemeConfig> {
        self.themes
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ContrastError::UnknownTheme {
                name: name.to_string(),
            })
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_grade: None,
            log: LogConfig::default(),
            themes: default_themes(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn colors(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// The site's dark and light themes
fn default_themes() -> Vec<ThemeConfig> {
    vec![
        ThemeConfig {
            name: "dark".to_string(),
            colors: colors(&[
                ("bg-primary", "#0a0a0a"),
                ("bg-secondary", "#1a1a1a"),
                ("bg-tertiary", "#2a2a2a"),
                ("bg-card", "#1e1916"),
                ("text-primary", "#ffffff"),
                ("text-secondary", "#e0e0e0"),
                ("text-muted", "#b0b0b0"),
                ("accent", "#e6c547"),
            ]),
            checks: vec![
                ContrastAssertion::new("text-primary", "bg-primary", "Primary text on dark background"),
                ContrastAssertion::new("text-secondary", "bg-primary", "Secondary text on dark background"),
                ContrastAssertion::new("text-muted", "bg-primary", "Muted text on dark background"),
                ContrastAssertion::new("accent", "bg-primary", "Accent heading on dark background")
                    .large_text(true),
                ContrastAssertion::new("text-primary", "bg-card", "Primary text on dark card"),
            ],
        },
        ThemeConfig {
            name: "light".to_string(),
            colors: colors(&[
                ("bg-primary", "#f9f5ee"),
                ("bg-secondary", "#f0e6d9"),
                ("bg-tertiary", "#e8dcc8"),
                ("bg-card", "#ffffff"),
                ("text-primary", "#1a1a1a"),
                ("text-secondary", "#4a4a4a"),
                ("text-muted", "#666666"),
                ("accent", "#b8941f"),
            ]),
            checks: vec![
                ContrastAssertion::new("text-primary", "bg-primary", "Primary text on light background"),
                ContrastAssertion::new("text-secondary", "bg-primary", "Secondary text on light background"),
                ContrastAssertion::new("text-muted", "bg-primary", "Muted text on light background"),
                ContrastAssertion::new("accent", "bg-primary", "Accent heading on light background")
                    .large_text(true),
                ContrastAssertion::new("text-primary", "bg-card", "Primary text on light card"),
            ],
        },
    ]
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contrastbot")
        .join("config.toml")
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if is_toml(path) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    if config.themes.is_empty() {
        return Err(ContrastError::Config(format!(
            "{} defines no themes",
            path.display()
        )));
    }

    debug!(themes = ?config.theme_names(), "Loaded configuration");
    Ok(config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if is_toml(path) {
        toml::to_string_pretty(&config)
            .map_err(|e| ContrastError::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
