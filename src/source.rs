//! Contract with the external item source.
//!
//! Command modules only see decoded [`Record`]s; how they are produced (the
//! `wp` binary, a fixture in tests) lives behind [`ItemSource`].

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("could not decode output of `{command}`: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Short text suitable for a one-line message dialog.
    #[must_use]
    pub fn summary(&self) -> String {
        let text = self.to_string();
        text.lines().next().unwrap_or_default().trim().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    Active,
    Inactive,
    Parent,
    MustUse,
    Dropin,
    #[serde(other)]
    Unknown,
}

impl Activation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Activation::Active => "active",
            Activation::Inactive => "inactive",
            Activation::Parent => "parent",
            Activation::MustUse => "must-use",
            Activation::Dropin => "dropin",
            Activation::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoUpdate {
    On,
    Off,
    #[serde(other)]
    Unknown,
}

impl AutoUpdate {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AutoUpdate::On => "on",
            AutoUpdate::Off => "off",
            AutoUpdate::Unknown => "",
        }
    }
}

fn default_auto_update() -> AutoUpdate {
    AutoUpdate::Unknown
}

/// One installed item as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub name: String,
    pub status: Activation,
    #[serde(default)]
    pub version: String,
    /// `available` when an update exists; anything else (usually `none`) means no update.
    #[serde(default)]
    pub update: String,
    #[serde(default = "default_auto_update")]
    pub auto_update: AutoUpdate,
}

impl Record {
    #[must_use]
    pub fn update_available(&self) -> bool {
        self.update == "available"
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Activation::Active
    }
}

/// Synchronous access to the external item source.
pub trait ItemSource {
    /// Run `args` and decode the resulting record list.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the call fails or its output is not a record list.
    fn invoke(&mut self, args: &[&str]) -> Result<Vec<Record>, SourceError>;

    /// Run a mutation whose output is not needed.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the call fails.
    fn invoke_and_discard(&mut self, args: &[&str]) -> Result<(), SourceError>;
}

/// Decode the JSON list printed by `--format=json`.
///
/// # Errors
/// Returns [`SourceError::Decode`] when `raw` is not a JSON array of records.
pub fn decode_records(command: &str, raw: &str) -> Result<Vec<Record>, SourceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|source| SourceError::Decode {
        command: command.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wp_cli_plugin_list() {
        let raw = r#"[
            {"name":"akismet","status":"inactive","update":"available",
             "version":"5.3","auto_update":"off"},
            {"name":"hello","status":"must-use","update":"none",
             "version":"1.7.2","auto_update":"on"}
        ]"#;
        let records = decode_records("plugin list", raw).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].update_available());
        assert_eq!(records[0].status, Activation::Inactive);
        assert_eq!(records[1].status, Activation::MustUse);
        assert_eq!(records[1].auto_update, AutoUpdate::On);
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let raw = r#"[{"name":"x","status":"network-active","version":"1"}]"#;
        let records = decode_records("plugin list", raw).unwrap();
        assert_eq!(records[0].status, Activation::Unknown);
        assert_eq!(records[0].auto_update, AutoUpdate::Unknown);
    }

    #[test]
    fn empty_output_is_an_empty_list() {
        assert!(decode_records("theme list", "  \n").unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_records("theme list", "Error: not a wp install").unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
        assert!(err.summary().starts_with("could not decode output of `theme list`"));
    }
}
