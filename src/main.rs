// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrastbot CLI - WCAG Contrast Compliance Auditor
//!
//! Part of the gitbot-fleet ecosystem.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use contrastbot::auditor::{evaluate, ContrastAssertion, Grade};
use contrastbot::config::{self, Config};
use contrastbot::fleet::{findings_from_report, FindingSet};
use contrastbot::palette::Palette;
use contrastbot::report::{generate_report, OutputFormat, ThemeAudit};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// WCAG contrast compliance auditor for website theme palettes
#[derive(Parser)]
#[command(name = "contrastbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the configured themes
    Check {
        /// Theme configuration file (TOML or YAML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Only audit these themes (repeatable)
        #[arg(long)]
        theme: Vec<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fail when a theme grades below this (A+, A, B+, B, C)
        #[arg(long)]
        min_grade: Option<Grade>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Contrast ratio and tier of two hex colors
    Ratio {
        /// Foreground color, e.g. "#767676"
        foreground: String,

        /// Background color, e.g. "#ffffff"
        background: String,

        /// Apply the large-text thresholds
        #[arg(long)]
        large_text: bool,
    },

    /// Write the default configuration file
    Init {
        /// Destination (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run as a fleet member (machine-readable findings)
    Fleet {
        /// Theme configuration file (TOML or YAML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter used until the config file is read. `RUST_LOG` and `--verbose` pin
/// it; otherwise the configured level replaces it after loading.
fn startup_filter(verbose: bool, from_env: Option<EnvFilter>) -> (EnvFilter, bool) {
    match from_env {
        Some(filter) => (filter, true),
        None if verbose => (EnvFilter::new("contrastbot=debug"), true),
        None => (EnvFilter::new("contrastbot=warn"), false),
    }
}

fn level_filter(level: &str) -> Option<EnvFilter> {
    EnvFilter::try_new(format!("contrastbot={}", level)).ok()
}

/// Install the subscriber before any config is read, so config loading logs
fn init_logging(verbose: bool) -> Option<FilterHandle> {
    let (filter, pinned) = startup_filter(verbose, EnvFilter::try_from_default_env().ok());
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    (!pinned).then_some(handle)
}

/// Switch to the `[log] level` from the config unless the filter is pinned
fn apply_log_level(handle: Option<FilterHandle>, level: &str) {
    let Some(handle) = handle else {
        return;
    };
    match level_filter(level) {
        Some(filter) => {
            if let Err(e) = handle.reload(filter) {
                warn!(error = %e, "Could not apply configured log level");
            }
        }
        None => warn!(level, "Ignoring invalid log level in config"),
    }
}

fn load(config: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = config.unwrap_or_else(config::default_config_path);
    config::load_config(&path).with_context(|| format!("loading {}", path.display()))
}

/// Audit the selected themes, or all of them when none are named
fn audit_themes(config: &Config, only: &[String]) -> anyhow::Result<Vec<ThemeAudit>> {
    let themes = if only.is_empty() {
        config.themes.iter().collect::<Vec<_>>()
    } else {
        only.iter()
            .map(|name| config.theme(name))
            .collect::<contrastbot::Result<Vec<_>>>()?
    };

    themes
        .into_iter()
        .map(|theme| -> anyhow::Result<ThemeAudit> {
            let report = theme
                .audit()
                .with_context(|| format!("auditing theme {:?}", theme.name))?;
            if report.has_failures() {
                warn!(
                    theme = %theme.name,
                    failed = report.fail_count(),
                    grade = %report.grade(),
                    "Theme has failing contrast combinations"
                );
            }
            Ok(ThemeAudit::new(&theme.name, report))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            config,
            theme,
            format,
            output,
            min_grade,
            verbose,
        } => {
            let log_handle = init_logging(verbose);
            let config = load(config)?;
            apply_log_level(log_handle, &config.log.level);

            let audits = audit_themes(&config, &theme)?;
            let report = generate_report(&audits, format.into());
            write_output(&report, output.as_deref())?;

            let min_grade = min_grade.or(config.min_grade);
            let below_grade = min_grade
                .is_some_and(|min| audits.iter().any(|a| a.report.grade() < min));

            if below_grade || audits.iter().any(|a| a.report.has_failures()) {
                std::process::exit(1);
            }
        }

        Commands::Ratio {
            foreground,
            background,
            large_text,
        } => {
            let palette = Palette::from_hex_pairs([
                ("foreground", foreground.as_str()),
                ("background", background.as_str()),
            ])?;
            let assertion = ContrastAssertion::new("foreground", "background", "pair")
                .large_text(large_text);
            let result = evaluate(&palette, &assertion)?;

            println!("{} on {}", result.foreground(), result.background());
            println!("Ratio: {:.2}:1", result.ratio());
            println!(
                "Tier: {} ({} text, AA {}:1, AAA {}:1)",
                result.tier(),
                if large_text { "large" } else { "normal" },
                result.threshold(),
                result.aaa_threshold()
            );

            if !result.passed() {
                std::process::exit(1);
            }
        }

        Commands::Init { path, force } => {
            let path = path.unwrap_or_else(config::default_config_path);
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            config::write_default_config(&path)?;
            eprintln!("Configuration written to {}", path.display());
        }

        Commands::Fleet { config, verbose } => {
            let log_handle = init_logging(verbose);
            let config = load(config)?;
            apply_log_level(log_handle, &config.log.level);

            let mut findings = FindingSet::new();
            for audit in audit_themes(&config, &[])? {
                findings.extend(findings_from_report(&audit.theme, &audit.report).findings);
            }
            println!("{}", serde_json::to_string_pretty(&findings)?);

            if findings.blocks_release() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_filter_defaults_to_warn_and_reloadable() {
        let (filter, pinned) = startup_filter(false, None);
        assert_eq!(filter.to_string(), "contrastbot=warn");
        assert!(!pinned);
    }

    #[test]
    fn test_startup_filter_verbose_is_pinned() {
        let (filter, pinned) = startup_filter(true, None);
        assert_eq!(filter.to_string(), "contrastbot=debug");
        assert!(pinned);
    }

    #[test]
    fn test_startup_filter_env_wins_over_verbose() {
        let (filter, pinned) = startup_filter(true, Some(EnvFilter::new("contrastbot=trace")));
        assert_eq!(filter.to_string(), "contrastbot=trace");
        assert!(pinned);
    }

    #[test]
    fn test_level_filter_from_config() {
        let filter = level_filter("info").expect("valid level");
        assert_eq!(filter.to_string(), "contrastbot=info");
    }
}
