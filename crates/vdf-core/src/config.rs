//! Decoder configuration: which coercions to apply to raw integers and objects.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::format::DATE_PROPERTIES;

/// Controls the semantic coercions applied while decoding.
///
/// The raw format only knows objects, strings and 32-bit integers. The
/// decoder reinterprets some of them:
///
/// - integers under a key in `date_properties` become timestamps (a raw `0`
///   becomes `false`),
/// - integers equal to `0` or `1` become booleans when `convert_booleans` is set,
/// - objects whose keys all start with a digit become arrays when
///   `convert_arrays` is set.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use vdf_core::DecoderConfig;
///
/// let config: DecoderConfig = serde_json::from_str(r#"{"convert_booleans": false}"#).unwrap();
/// assert!(!config.convert_booleans);
/// assert!(config.convert_arrays);
/// assert!(config.is_date_property("LastPlayTime"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub date_properties: BTreeSet<String>,
    pub convert_booleans: bool,
    pub convert_arrays: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            date_properties: DATE_PROPERTIES.iter().map(|p| p.to_string()).collect(),
            convert_booleans: true,
            convert_arrays: true,
        }
    }
}

impl DecoderConfig {
    /// A configuration with every coercion turned off: the decoded tree
    /// mirrors the raw stream (objects, strings and integers only).
    pub fn raw() -> Self {
        Self {
            date_properties: BTreeSet::new(),
            convert_booleans: false,
            convert_arrays: false,
        }
    }

    /// Replace the set of date properties.
    pub fn with_date_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn convert_booleans(mut self, enabled: bool) -> Self {
        self.convert_booleans = enabled;
        self
    }

    pub fn convert_arrays(mut self, enabled: bool) -> Self {
        self.convert_arrays = enabled;
        self
    }

    pub fn is_date_property(&self, key: &str) -> bool {
        self.date_properties.contains(key)
    }
}
