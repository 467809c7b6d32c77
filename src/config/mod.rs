pub mod toml_config;

use crate::adapters::http::DEFAULT_API_PREFIX;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_route_prefix,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_OUTPUT_PATH: &str = "./dashboard.html";
pub const DEFAULT_TITLE: &str = "Developer Portal";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "devportal-dashboard")]
#[command(about = "Loads the developer portal dashboard and writes it as an HTML page")]
pub struct CliConfig {
    #[arg(long, help = "Backend origin, e.g. http://localhost:8080")]
    pub base_url: Option<String>,

    #[arg(long, help = "Route prefix of the portal API")]
    pub api_prefix: Option<String>,

    #[arg(long, help = "Where to write the generated page")]
    pub output: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<std::path::PathBuf>,

    #[arg(long, help = "Transport timeout per request, in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings: defaults, overlaid by the config file, overlaid by
/// command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub base_url: String,
    pub api_prefix: String,
    pub timeout_seconds: Option<u64>,
    pub output_path: String,
    pub title: String,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_seconds: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            title: DEFAULT_TITLE.to_string(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl DashboardSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self {
            base_url: config.backend.base_url.clone(),
            timeout_seconds: config.backend.timeout_seconds,
            ..Self::default()
        };

        if let Some(prefix) = &config.backend.api_prefix {
            settings.api_prefix = prefix.clone();
        }
        if let Some(output) = &config.output {
            if let Some(path) = &output.path {
                settings.output_path = path.clone();
            }
            if let Some(title) = &output.title {
                settings.title = title.clone();
            }
        }
        if let Some(logging) = &config.logging {
            settings.log_format = logging.format.unwrap_or_default();
            settings.verbose = logging.verbose.unwrap_or(false);
        }

        settings
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Self::from_toml(&file)
            }
            None => Self::default(),
        };
        settings.apply_cli(cli);
        Ok(settings)
    }

    #[cfg(feature = "cli")]
    pub fn apply_cli(&mut self, cli: &CliConfig) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(prefix) = &cli.api_prefix {
            self.api_prefix = prefix.clone();
        }
        if let Some(output) = &cli.output {
            self.output_path = output.clone();
        }
        if cli.timeout_secs.is_some() {
            self.timeout_seconds = cli.timeout_secs;
        }
        if let Some(format) = cli.log_format {
            self.log_format = format;
        }
        self.verbose |= cli.verbose;
    }
}

impl ConfigProvider for DashboardSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn page_title(&self) -> &str {
        &self.title
    }
}

impl Validate for DashboardSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_route_prefix("api_prefix", &self.api_prefix)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("title", &self.title)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}
