//! Platform-specific locations for plugup's settings and log files.

mod paths;

pub use paths::{AppPaths, AppPathsError};
