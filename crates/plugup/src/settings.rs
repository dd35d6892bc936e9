use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use plugup_core::{
    DEFAULT_BRANCH, DEFAULT_MAX_REDIRECTS, DEFAULT_ORGANIZATION, HttpOptions, PluginDescriptor,
    RAW_CONTENT_HOST, RepositoryLayout, WEB_HOST,
};
use plugup_platform::AppPaths;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_organization")]
    pub organization: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_raw_host")]
    pub raw_host: String,

    #[serde(default = "default_web_host")]
    pub web_host: String,

    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginDescriptor>,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_max_concurrent_checks")]
    pub max_concurrent_checks: usize,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_organization() -> String {
    DEFAULT_ORGANIZATION.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_raw_host() -> String {
    RAW_CONTENT_HOST.to_string()
}

fn default_web_host() -> String {
    WEB_HOST.to_string()
}

fn default_plugins() -> Vec<PluginDescriptor> {
    [
        ("plugin-update-checker", "plugin-update-checker.php"),
        ("a-to-z-plugin", "a-to-z-plugin.php"),
        ("home-hero-plugin", "home-hero-plugin.php"),
        ("degree-search-plugin", "degree-search-plugin.php"),
        ("custom-search-template-plugin", "custom-search-template.php"),
        ("vision-page-plugin", "vision-page-plugin.php"),
        ("ut-alert-plugin", "ut-alert.php"),
        ("dynamic-content-plugin", "dynamic-content-plugin.php"),
    ]
    .into_iter()
    .map(|(directory, entry_file)| PluginDescriptor::new(directory, entry_file))
    .collect()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_max_concurrent_checks() -> usize {
    4
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            branch: default_branch(),
            raw_host: default_raw_host(),
            web_host: default_web_host(),
            plugins: default_plugins(),
            http_timeout_secs: default_http_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_redirects: default_max_redirects(),
            max_concurrent_checks: default_max_concurrent_checks(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl Settings {
    /// Loads settings from the platform config directory, falling back to
    /// defaults when no settings file exists yet.
    pub fn load(paths: &AppPaths) -> Result<Self, AppError> {
        if paths.settings_file.exists() {
            Self::load_from(&paths.settings_file)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads settings from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::settings_load_failed(display.clone(), e))?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::settings_load_failed(display, e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.organization.trim().is_empty() {
            return Err(AppError::settings_invalid("organization must not be empty"));
        }
        if self.branch.trim().is_empty() {
            return Err(AppError::settings_invalid("branch must not be empty"));
        }
        for (name, host) in [("raw_host", &self.raw_host), ("web_host", &self.web_host)] {
            if !(host.starts_with("https://") || host.starts_with("http://")) {
                return Err(AppError::settings_invalid(format!(
                    "{name} must be an http(s) URL"
                )));
            }
        }
        if self.http_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(AppError::settings_invalid("timeouts must be at least one second"));
        }
        if self.max_redirects == 0 || self.max_redirects > DEFAULT_MAX_REDIRECTS {
            return Err(AppError::settings_invalid(format!(
                "max_redirects must be between 1 and {DEFAULT_MAX_REDIRECTS}"
            )));
        }
        if self.max_concurrent_checks == 0 {
            return Err(AppError::settings_invalid(
                "max_concurrent_checks must be at least 1",
            ));
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if plugin.directory.is_empty() || plugin.entry_file.is_empty() {
                return Err(AppError::settings_invalid(format!(
                    "plugin entry \"{}\" is incomplete",
                    plugin.slug()
                )));
            }
            if !seen.insert(plugin.slug()) {
                return Err(AppError::settings_invalid(format!(
                    "plugin {} is listed more than once",
                    plugin.slug()
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn layout(&self) -> RepositoryLayout {
        RepositoryLayout::new(self.organization.clone())
            .with_branch(self.branch.clone())
            .with_hosts(self.raw_host.clone(), self.web_host.clone())
    }

    #[must_use]
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: Duration::from_secs(self.http_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirects: self.max_redirects,
            ..HttpOptions::default()
        }
    }
}
