//! Tracing/logging initialization.

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// `[log]` section of the service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogSettings {
    /// `RUST_LOG` wins over the configured directive; a bad directive falls back to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(settings: &LogSettings) {
    let filter = settings.env_filter();

    let _ = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .with_target(true)
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_info_json() {
        let s = LogSettings::default();
        assert_eq!(s.filter, "info");
        assert_eq!(s.format, LogFormat::Json);
    }

    #[test]
    fn settings_deserialize_partially() {
        let s: LogSettings = serde_json::from_str(r#"{"format":"pretty"}"#).unwrap();
        assert_eq!(s.format, LogFormat::Pretty);
        assert_eq!(s.filter, "info");
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        init_with(&LogSettings::default());
        init_with(&LogSettings {
            filter: "debug".into(),
            format: LogFormat::Pretty,
        });
    }
}
