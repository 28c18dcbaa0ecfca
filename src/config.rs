//! Configuration management for theme-check.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML config file
//! - Layering both over the built-in defaults

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::runner::AnalyzerCommand;
use crate::validation::{OptionOverrides, Options, ValidatorKind};

/// Command-line arguments for theme-check
#[derive(Debug, Parser)]
#[command(name = "theme-check")]
#[command(about = "Run the theme analyzer and report normalized results")]
#[command(version)]
pub struct Args {
    /// Theme directory to check
    pub dir: PathBuf,

    /// Validators to run; repeat to select several (default: all known)
    #[arg(long = "validator", value_name = "KIND")]
    pub validator: Vec<ValidatorKind>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub prettify: bool,

    /// Don't report warnings in the summary
    #[arg(long)]
    pub no_warning: bool,

    /// Program used to run the analyzer
    #[arg(long, help = "Analyzer program (default: php)")]
    pub analyzer: Option<PathBuf>,

    /// Script handed to the analyzer program
    #[arg(long, help = "Analyzer script (default: php-scripts/validators/validator.php)")]
    pub script: Option<PathBuf>,

    /// Config file to use instead of the user config
    #[arg(long, help = "Path to a theme-check TOML config file")]
    pub config: Option<PathBuf>,

    /// Log level for theme-check
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

impl Args {
    fn option_overrides(&self) -> OptionOverrides {
        OptionOverrides {
            validator: (!self.validator.is_empty()).then(|| self.validator.clone()),
            prettify: self.prettify.then_some(true),
            warning: self.no_warning.then_some(false),
        }
    }
}

/// Contents of a theme-check config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub analyzer: Option<PathBuf>,
    pub script: Option<PathBuf>,
    /// `validator`, `prettify` and `warning`
    #[serde(flatten)]
    pub options: OptionOverrides,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Default location: `<config dir>/theme-check/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("theme-check").join("config.toml"))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme directory to check
    pub theme_dir: PathBuf,
    /// How to launch the analyzer
    pub analyzer: AnalyzerCommand,
    /// Merged check options
    pub options: Options,
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let (file, config_path) = match &args.config {
            Some(path) => (ConfigFile::load(path)?, Some(path.clone())),
            None => match ConfigFile::default_path() {
                Some(path) if path.is_file() => (ConfigFile::load(&path)?, Some(path)),
                _ => (ConfigFile::default(), None),
            },
        };

        let mut config = Self::resolve(args, file);
        config.config_path = config_path;
        Ok(config)
    }

    /// Layer arguments over a config file over the defaults
    pub fn resolve(args: Args, file: ConfigFile) -> Self {
        let options = Options::merged(file.options.or(args.option_overrides()));

        let program = args
            .analyzer
            .or(file.analyzer)
            .unwrap_or_else(|| PathBuf::from(AnalyzerCommand::DEFAULT_PROGRAM));
        let script = args
            .script
            .or(file.script)
            .unwrap_or_else(|| PathBuf::from(AnalyzerCommand::DEFAULT_SCRIPT));

        Config {
            theme_dir: args.dir,
            analyzer: AnalyzerCommand::new(program).with_script(script),
            options,
            config_path: None,
            log_level: args.log_level,
        }
    }
}
