pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, page::Page, storage::LocalStorage};
pub use config::{toml_config::TomlConfig, DashboardSettings, LogFormat};
pub use core::dashboard::Dashboard;
pub use domain::model::{RegionId, RegionState};
pub use utils::error::{DashboardError, Result};
