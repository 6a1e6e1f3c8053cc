// Settings loader: the JSON file holding the wiki domain, credentials and
// the space/parent page every note is created under.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Keys of the settings object as written in the config files.
const KEYS: [&str; 5] = ["Domain", "Email", "APIToken", "SpaceID", "ParentPageID"];

/// Immutable connection settings. Field names on disk keep the casing
/// of the original config files (`Domain`, `APIToken`, ...), though keys
/// match regardless of case. Missing keys decode to empty strings; the
/// remote API rejects them later.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "APIToken")]
    pub api_token: String,
    #[serde(rename = "SpaceID")]
    pub space_id: String,
    #[serde(rename = "ParentPageID")]
    pub parent_page_id: String,
}

impl Settings {
    /// Read and decode the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), settings = ?settings, "loaded settings");
        Ok(settings)
    }

    /// Decode settings from a JSON object. Anything but an object is
    /// rejected. Keys are matched case-insensitively; an exact match wins
    /// over a folded one.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(data)?;
        let mut fields = Map::new();
        for (key, value) in raw {
            match KEYS.iter().find(|k| k.eq_ignore_ascii_case(&key)) {
                Some(k) if *k == key => {
                    fields.insert(key, value);
                }
                Some(k) => {
                    fields.entry(k.to_string()).or_insert(value);
                }
                None => {}
            }
        }
        Settings::deserialize(Value::Object(fields))
    }
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("domain", &self.domain)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("space_id", &self.space_id)
            .field("parent_page_id", &self.parent_page_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_all_fields_with_original_casing() {
        let file = write_config(
            r#"{"Domain":"x.atlassian.net","Email":"me@x.io","APIToken":"t0k","SpaceID":"42","ParentPageID":"7"}"#,
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.domain, "x.atlassian.net");
        assert_eq!(settings.email, "me@x.io");
        assert_eq!(settings.api_token, "t0k");
        assert_eq!(settings.space_id, "42");
        assert_eq!(settings.parent_page_id, "7");
    }

    #[test]
    fn missing_fields_are_empty() {
        let file = write_config(r#"{"Domain":"x.atlassian.net","SpaceID":"42"}"#);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.space_id, "42");
        assert!(settings.email.is_empty());
        assert!(settings.api_token.is_empty());
        assert!(settings.parent_page_id.is_empty());
    }

    #[test]
    fn keys_match_regardless_of_case() {
        let file = write_config(
            r#"{"domain":"d","spaceId":"9","apitoken":"t","PARENTPAGEID":"3","EMAIL":"e"}"#,
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.domain, "d");
        assert_eq!(settings.space_id, "9");
        assert_eq!(settings.api_token, "t");
        assert_eq!(settings.parent_page_id, "3");
        assert_eq!(settings.email, "e");
    }

    #[test]
    fn exact_key_wins_over_folded_key() {
        let settings = Settings::from_json(r#"{"SpaceID":"exact","spaceid":"folded"}"#).unwrap();
        assert_eq!(settings.space_id, "exact");
        let settings = Settings::from_json(r#"{"spaceid":"folded","SpaceID":"exact"}"#).unwrap();
        assert_eq!(settings.space_id, "exact");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings = Settings::from_json(r#"{"Domain":"d","Theme":"dark"}"#).unwrap();
        assert_eq!(settings.domain, "d");
    }

    #[test]
    fn unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let file = write_config("{not json");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let file = write_config(r#"["an", "array"]"#);
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        for data in [r#""just a string""#, "42", "null", r#"{"SpaceID": 42}"#] {
            assert!(Settings::from_json(data).is_err(), "accepted {}", data);
        }
    }

    #[test]
    fn debug_output_hides_token() {
        let settings = Settings {
            api_token: "secret".into(),
            ..Settings::default()
        };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
