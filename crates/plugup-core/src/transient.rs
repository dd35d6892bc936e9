//! The host's `update_plugins` transient, as exchanged with the integration
//! layer, and the merge of scan results into it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::scan::{InstalledVersions, ScanReport, UpdateOffer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Installed versions exactly as the host wrote them. Scans read them
    /// through [`Self::installed`].
    #[serde(default, deserialize_with = "deserialize_object")]
    pub checked: Map<String, Value>,

    #[serde(default, deserialize_with = "deserialize_object")]
    pub response: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the transient's `response` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginUpdateRecord {
    pub slug: String,
    pub plugin: String,
    pub new_version: String,
    pub url: String,
    pub package: String,
}

impl PluginUpdateRecord {
    fn into_value(self) -> Value {
        let mut record = Map::new();
        record.insert("slug".to_string(), Value::String(self.slug));
        record.insert("plugin".to_string(), Value::String(self.plugin));
        record.insert("new_version".to_string(), Value::String(self.new_version));
        record.insert("url".to_string(), Value::String(self.url));
        record.insert("package".to_string(), Value::String(self.package));
        Value::Object(record)
    }
}

impl From<&UpdateOffer> for PluginUpdateRecord {
    fn from(offer: &UpdateOffer) -> Self {
        Self {
            slug: offer.directory.clone(),
            plugin: offer.slug.clone(),
            new_version: offer.new_version.clone(),
            url: offer.url.clone(),
            package: offer.package.clone(),
        }
    }
}

impl UpdateTransient {
    /// The `slug -> version` view of `checked` used for scanning.
    ///
    /// Numeric versions are read as their decimal text. Entries holding any
    /// other kind of value are left out.
    #[must_use]
    pub fn installed(&self) -> InstalledVersions {
        self.checked
            .iter()
            .filter_map(|(slug, version)| match version {
                Value::String(version) => Some((slug.clone(), version.clone())),
                Value::Number(number) => Some((slug.clone(), number.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Writes every offer in `report` into `response`, keyed by slug.
    ///
    /// Existing entries for other plugins, `checked`, and unknown fields are
    /// left as they are. Returns the number of entries written.
    pub fn apply(&mut self, report: &ScanReport) -> usize {
        let offers = report.offers();
        let written = offers.len();
        for (slug, offer) in offers {
            self.response
                .insert(slug, PluginUpdateRecord::from(&offer).into_value());
        }
        written
    }

    #[must_use]
    pub fn record_for(&self, slug: &str) -> Option<PluginUpdateRecord> {
        self.response
            .get(slug)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

// PHP encodes an empty associative array as `[]`.
fn deserialize_object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}
