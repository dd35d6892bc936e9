use serde::Deserialize;

/// The part of a plugin's `package.json` the scanner cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageMetadata {
    /// Parses a `package.json` body. Unknown fields are ignored.
    ///
    /// # Errors
    /// Returns an error when the body is not a JSON object or `version` is
    /// present but not a string.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// The advertised version exactly as published. Blank values and values
    /// padded with whitespace are treated as absent.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .filter(|version| !version.is_empty() && version.trim() == *version)
    }
}

#[cfg(test)]
mod tests {
    use super::PackageMetadata;

    #[test]
    fn reads_version_and_ignores_other_fields() {
        let metadata = PackageMetadata::from_json(
            r#"{"name": "a-to-z-plugin", "version": "1.3.0", "scripts": {"build": "wp-scripts build"}}"#,
        )
        .expect("package.json should parse");

        assert_eq!(metadata.version(), Some("1.3.0"));
    }

    #[test]
    fn missing_or_blank_version_is_none() {
        let missing = PackageMetadata::from_json(r#"{"name": "x"}"#).expect("object parses");
        let blank = PackageMetadata::from_json(r#"{"version": "  "}"#).expect("object parses");
        let null = PackageMetadata::from_json(r#"{"version": null}"#).expect("object parses");

        assert_eq!(missing.version(), None);
        assert_eq!(blank.version(), None);
        assert_eq!(null.version(), None);
    }

    #[test]
    fn padded_version_is_none() {
        let padded =
            PackageMetadata::from_json(r#"{"version": " 1.3.0\n"}"#).expect("object parses");

        assert_eq!(padded.version(), None);
    }

    #[test]
    fn rejects_non_json_and_non_string_versions() {
        assert!(PackageMetadata::from_json("404: Not Found").is_err());
        assert!(PackageMetadata::from_json(r#"{"version": 3}"#).is_err());
        assert!(PackageMetadata::from_json(r#""1.3.0""#).is_err());
    }
}
