use std::collections::BTreeMap;

use futures_util::StreamExt;
use futures_util::stream;
use log::{debug, info, warn};
use serde::Serialize;

use crate::descriptor::{PluginDescriptor, RepositoryLayout};
use crate::source::ReleaseHost;
use crate::version::is_newer_version;

/// Installed plugin versions keyed by slug, as recorded by the host.
pub type InstalledVersions = BTreeMap<String, String>;

const ARTIFACT_OK: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOffer {
    pub slug: String,
    pub directory: String,
    pub new_version: String,
    pub url: String,
    pub package: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Offered(UpdateOffer),
    SkippedNoInstalledVersion,
    SkippedMetadataFetchFailed { reason: String },
    SkippedArtifactMissing { package: String, reason: String },
    SkippedNoNewerVersion { installed: String, remote: String },
}

impl ScanOutcome {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offered(_) => "update available",
            Self::SkippedNoInstalledVersion => "not installed",
            Self::SkippedMetadataFetchFailed { .. } => "metadata unavailable",
            Self::SkippedArtifactMissing { .. } => "release archive missing",
            Self::SkippedNoNewerVersion { .. } => "up to date",
        }
    }

    #[must_use]
    pub fn offer(&self) -> Option<&UpdateOffer> {
        match self {
            Self::Offered(offer) => Some(offer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorReport {
    pub slug: String,
    pub outcome: ScanOutcome,
}

/// Result of one scan, one report per descriptor in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub reports: Vec<DescriptorReport>,
}

impl ScanReport {
    /// Collapses the report to the host-facing `slug -> offer` mapping.
    #[must_use]
    pub fn offers(&self) -> BTreeMap<String, UpdateOffer> {
        self.reports
            .iter()
            .filter_map(|report| {
                report
                    .outcome
                    .offer()
                    .map(|offer| (report.slug.clone(), offer.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn offer_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome.offer().is_some())
            .count()
    }

    #[must_use]
    pub fn outcome_for(&self, slug: &str) -> Option<&ScanOutcome> {
        self.reports
            .iter()
            .find(|report| report.slug == slug)
            .map(|report| &report.outcome)
    }
}

pub struct Scanner<H> {
    host: H,
    layout: RepositoryLayout,
    max_concurrent_checks: usize,
}

impl<H: ReleaseHost> Scanner<H> {
    pub fn new(host: H, layout: RepositoryLayout) -> Self {
        Self {
            host,
            layout,
            max_concurrent_checks: 1,
        }
    }

    /// Lets up to `limit` descriptors be checked at once. Each descriptor's
    /// two requests stay sequential and the report keeps input order.
    #[must_use]
    pub fn with_max_concurrent_checks(mut self, limit: usize) -> Self {
        self.max_concurrent_checks = limit.max(1);
        self
    }

    /// Checks every descriptor for a newer published release.
    ///
    /// Never fails: each descriptor that cannot be confirmed ends up as a
    /// skipped outcome in the report.
    pub async fn scan(
        &self,
        descriptors: &[PluginDescriptor],
        installed: &InstalledVersions,
    ) -> ScanReport {
        if installed.is_empty() {
            debug!(
                "No installed versions recorded, skipping {} plugin(s)",
                descriptors.len()
            );
            return ScanReport {
                reports: descriptors
                    .iter()
                    .map(|plugin| DescriptorReport {
                        slug: plugin.slug(),
                        outcome: ScanOutcome::SkippedNoInstalledVersion,
                    })
                    .collect(),
            };
        }

        let reports: Vec<DescriptorReport> = stream::iter(descriptors)
            .map(|plugin| self.check(plugin, installed))
            .buffered(self.max_concurrent_checks)
            .collect()
            .await;

        let report = ScanReport { reports };
        info!(
            "Scanned {} plugin(s), {} update(s) available",
            report.reports.len(),
            report.offer_count()
        );
        report
    }

    async fn check(
        &self,
        plugin: &PluginDescriptor,
        installed: &InstalledVersions,
    ) -> DescriptorReport {
        let slug = plugin.slug();
        let outcome = self.check_outcome(plugin, &slug, installed).await;

        match &outcome {
            ScanOutcome::Offered(offer) => info!(
                "{slug}: update available {} -> {}",
                installed.get(&slug).map_or("?", String::as_str),
                offer.new_version
            ),
            ScanOutcome::SkippedMetadataFetchFailed { reason } => {
                warn!("{slug}: skipped, metadata unavailable: {reason}");
            }
            ScanOutcome::SkippedArtifactMissing { reason, .. } => {
                warn!("{slug}: skipped, release archive missing: {reason}");
            }
            ScanOutcome::SkippedNoInstalledVersion => {
                debug!("{slug}: skipped, no installed version recorded");
            }
            ScanOutcome::SkippedNoNewerVersion { installed, remote } => {
                debug!("{slug}: up to date (installed {installed}, remote {remote})");
            }
        }

        DescriptorReport { slug, outcome }
    }

    async fn check_outcome(
        &self,
        plugin: &PluginDescriptor,
        slug: &str,
        installed: &InstalledVersions,
    ) -> ScanOutcome {
        let metadata_url = self.layout.metadata_url(plugin);
        let metadata = match self.host.fetch_metadata(&metadata_url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                return ScanOutcome::SkippedMetadataFetchFailed {
                    reason: e.to_string(),
                };
            }
        };

        let Some(remote) = metadata.version() else {
            return ScanOutcome::SkippedMetadataFetchFailed {
                reason: format!("{metadata_url} has no version"),
            };
        };

        let package = self.layout.package_url(plugin, remote);
        match self.host.probe_artifact(&package).await {
            Ok(ARTIFACT_OK) => {}
            Ok(status) => {
                return ScanOutcome::SkippedArtifactMissing {
                    reason: format!("HTTP {status}"),
                    package,
                };
            }
            Err(e) => {
                return ScanOutcome::SkippedArtifactMissing {
                    reason: e.to_string(),
                    package,
                };
            }
        }

        let Some(current) = installed.get(slug) else {
            return ScanOutcome::SkippedNoInstalledVersion;
        };

        if !is_newer_version(remote, current) {
            return ScanOutcome::SkippedNoNewerVersion {
                installed: current.clone(),
                remote: remote.to_string(),
            };
        }

        ScanOutcome::Offered(UpdateOffer {
            slug: slug.to_string(),
            directory: plugin.directory.clone(),
            new_version: remote.to_string(),
            url: self.layout.repository_url(plugin),
            package,
        })
    }
}
