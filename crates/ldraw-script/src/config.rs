// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Emission settings.
//!
//! Hosts usually keep these next to their own tool config; [`ScriptConfig`]
//! round-trips through JSON and every field has a default, so a partial file
//! is fine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for [`crate::Builder::to_text_with`] and
/// [`crate::Builder::to_bytes_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Run [`crate::format_script`] over the compact text.
    pub pretty: bool,
    /// Indent unit for pretty text.
    pub indent: String,
    /// Initial capacity of the binary output buffer.
    pub byte_capacity: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_owned(),
            byte_capacity: 256,
        }
    }
}

impl ScriptConfig {
    /// Config producing indented text.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Parses a JSON config; absent keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON was malformed or had the wrong shape.
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
}
