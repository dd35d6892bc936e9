use serde::{Deserialize, Serialize};

pub const DEFAULT_ORGANIZATION: &str = "utkwdn";
pub const DEFAULT_BRANCH: &str = "main";
pub const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";
pub const WEB_HOST: &str = "https://github.com";

/// A GitHub-hosted plugin: its repository directory and main plugin file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    pub directory: String,
    pub entry_file: String,
}

impl PluginDescriptor {
    pub fn new(directory: impl Into<String>, entry_file: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            entry_file: entry_file.into(),
        }
    }

    /// Key the host uses for this plugin, `{directory}/{entry_file}`.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.directory, self.entry_file)
    }
}

/// Where plugin repositories live and which branch carries `package.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    pub organization: String,
    pub branch: String,
    pub raw_host: String,
    pub web_host: String,
}

impl RepositoryLayout {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Points both hosts somewhere else, e.g. a local mirror.
    #[must_use]
    pub fn with_hosts(mut self, raw_host: impl Into<String>, web_host: impl Into<String>) -> Self {
        self.raw_host = raw_host.into();
        self.web_host = web_host.into();
        self
    }

    #[must_use]
    pub fn metadata_url(&self, plugin: &PluginDescriptor) -> String {
        format!(
            "{}/{}/{}/refs/heads/{}/package.json",
            self.raw_host.trim_end_matches('/'),
            self.organization,
            plugin.directory,
            self.branch
        )
    }

    #[must_use]
    pub fn repository_url(&self, plugin: &PluginDescriptor) -> String {
        format!(
            "{}/{}/{}/",
            self.web_host.trim_end_matches('/'),
            self.organization,
            plugin.directory
        )
    }

    #[must_use]
    pub fn package_url(&self, plugin: &PluginDescriptor, version: &str) -> String {
        format!(
            "{}releases/download/v{version}/{}.zip",
            self.repository_url(plugin),
            plugin.directory
        )
    }
}

impl Default for RepositoryLayout {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            raw_host: RAW_CONTENT_HOST.to_string(),
            web_host: WEB_HOST.to_string(),
        }
    }
}
