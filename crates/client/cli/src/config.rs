//! Console configuration loaded from environment variables.
use std::env;
use std::path::PathBuf;

use runtime::SaveFormat;

#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Content directory; the bundled catalogs when unset.
    pub data_dir: Option<PathBuf>,
    /// Save directory; the platform data directory when unset.
    pub save_dir: Option<PathBuf>,
    pub save_format: SaveFormat,
    pub session_id: Option<String>,
    pub event_buffer: Option<usize>,
    /// Problems found while reading the environment, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CAMPAIGN_DATA_DIR` - Content directory (default: bundled content)
    /// - `CAMPAIGN_SAVE_DIR` - Directory for save slots (default: platform-specific)
    /// - `CAMPAIGN_SAVE_FORMAT` - `json` or `bincode` (default: json)
    /// - `CAMPAIGN_SESSION_ID` - Log session name (default: timestamp)
    /// - `CAMPAIGN_EVENT_BUFFER` - Per-topic event buffer (default: runtime default)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            data_dir: lookup("CAMPAIGN_DATA_DIR").map(PathBuf::from),
            save_dir: lookup("CAMPAIGN_SAVE_DIR").map(PathBuf::from),
            session_id: lookup("CAMPAIGN_SESSION_ID"),
            ..Self::default()
        };

        if let Some(format) = lookup("CAMPAIGN_SAVE_FORMAT") {
            match parse_format(&format) {
                Some(parsed) => config.save_format = parsed,
                None => config
                    .warnings
                    .push(format!("Unknown CAMPAIGN_SAVE_FORMAT '{format}', using json")),
            }
        }

        if let Some(size) = lookup("CAMPAIGN_EVENT_BUFFER") {
            match size.trim().parse::<usize>() {
                Ok(size) => config.event_buffer = Some(size.max(1)),
                Err(_) => config.warnings.push(format!(
                    "Invalid CAMPAIGN_EVENT_BUFFER '{size}', using the runtime default"
                )),
            }
        }

        config
    }
}

fn parse_format(value: &str) -> Option<SaveFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "json" => Some(SaveFormat::Json),
        "bincode" | "bin" => Some(SaveFormat::Bincode),
        _ => None,
    }
}
