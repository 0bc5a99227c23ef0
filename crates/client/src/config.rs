//! Terminal host configuration.

use std::env;

/// How events are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub format: OutputFormat,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EVENT_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("EVENT_FORMAT") {
            match raw.parse() {
                Ok(format) => config.format = format,
                Err(_) => tracing::warn!("ignoring unknown EVENT_FORMAT {raw:?}"),
            }
        }

        config
    }
}
