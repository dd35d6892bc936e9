//! Core update detection for GitHub-hosted WordPress plugins.
//!
//! This crate holds everything that is independent of the command line:
//! - Plugin descriptors and the GitHub URL layout derived from them.
//! - `package.json` metadata parsing and lenient version ordering.
//! - The [`ReleaseHost`] capability and its reqwest implementation.
//! - The [`Scanner`], which turns descriptors and installed versions into a
//!   tagged [`ScanReport`].
//! - The host transient model that scan results are merged into.

mod descriptor;
mod metadata;
mod scan;
mod source;
mod transient;
mod version;

/// Plugin descriptors and repository URL layout.
pub use descriptor::{
    DEFAULT_BRANCH, DEFAULT_ORGANIZATION, PluginDescriptor, RAW_CONTENT_HOST, RepositoryLayout,
    WEB_HOST,
};
/// Remote `package.json` model.
pub use metadata::PackageMetadata;
/// Update scanner and its per-plugin outcomes.
pub use scan::{DescriptorReport, InstalledVersions, ScanOutcome, ScanReport, Scanner, UpdateOffer};
/// Remote capability trait and the HTTP-backed implementation.
pub use source::{DEFAULT_MAX_REDIRECTS, HttpOptions, HttpReleaseHost, ReleaseHost, SourceError};
/// Host transient model and merge.
pub use transient::{PluginUpdateRecord, UpdateTransient};
/// Version ordering helpers.
pub use version::{is_newer_version, parse_version};
