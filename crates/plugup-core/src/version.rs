use semver::Version;

/// Returns `true` when `latest` orders strictly after `current`.
///
/// Both sides accept an optional leading `v` and short forms such as `1` or
/// `1.2`. If either side cannot be read as a version the answer is `false`,
/// so an unreadable tag never produces an offer.
#[must_use]
pub fn is_newer_version(latest: &str, current: &str) -> bool {
    match (parse_version(latest), parse_version(current)) {
        (Some(latest), Some(current)) => latest > current,
        _ => false,
    }
}

/// Parses a release version leniently into a [`Version`].
#[must_use]
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);

    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    let (core, suffix) = split_core_and_suffix(version);
    let mut parts = core.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next().map(str::parse::<u64>).transpose().ok()?;
    let patch = parts.next().map(str::parse::<u64>).transpose().ok()?;

    if parts.next().is_some() {
        return None;
    }

    let normalized = match (minor, patch) {
        (None, None) => format!("{major}.0.0{suffix}"),
        (Some(minor), None) => format!("{major}.{minor}.0{suffix}"),
        (Some(minor), Some(patch)) => format!("{major}.{minor}.{patch}{suffix}"),
        (None, Some(_)) => return None,
    };

    Version::parse(&normalized).ok()
}

fn split_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison() {
        assert!(is_newer_version("1.3.0", "1.2.0"));
        assert!(is_newer_version("1.0.1", "1.0.0"));
        assert!(is_newer_version("2.0.0", "1.9.9"));
        assert!(is_newer_version("1.10.0", "1.9.0"));
        assert!(is_newer_version("1.2", "1.1.9"));
        assert!(is_newer_version("1", "0.99.0"));
        assert!(is_newer_version("1.0.0", "1.0.0-beta.2"));
        assert!(!is_newer_version("1.3.0", "1.3.0"));
        assert!(!is_newer_version("1.2", "1.2.0"));
        assert!(!is_newer_version("1.0.0-beta.2", "1.0.0-beta.10"));
        assert!(!is_newer_version("1.0.0", "1.0.1"));
        assert!(!is_newer_version("0.9.0", "1.0.0"));
    }

    #[test]
    fn leading_v_is_ignored() {
        assert!(is_newer_version("v1.3.0", "1.2.0"));
        assert!(is_newer_version("1.3.0", "v1.2.0"));
        assert!(!is_newer_version("v1.3.0", "1.3.0"));
    }

    #[test]
    fn unreadable_versions_are_never_newer() {
        assert!(!is_newer_version("latest", "1.0.0"));
        assert!(!is_newer_version("2.0.0", "unknown"));
        assert!(!is_newer_version("1.2.3.4", "1.0.0"));
        assert!(!is_newer_version("", "1.0.0"));
    }

    #[test]
    fn parse_version_normalizes_short_forms() {
        assert_eq!(parse_version("2"), Some(Version::new(2, 0, 0)));
        assert_eq!(parse_version("2.4"), Some(Version::new(2, 4, 0)));
        assert_eq!(parse_version(" v2.4.1 "), Some(Version::new(2, 4, 1)));
        assert_eq!(
            parse_version("2.4-rc.1").map(|v| v.to_string()),
            Some("2.4.0-rc.1".to_string())
        );
        assert!(parse_version("2.x").is_none());
    }
}
