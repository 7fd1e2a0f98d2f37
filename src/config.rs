use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::schema::DashboardSchema;

// ---------------------------------------------------------------------------
// Out-of-band configuration (credentials + schema)
// ---------------------------------------------------------------------------

/// Environment variable naming the config file to load.
pub const CONFIG_ENV_VAR: &str = "CONTACT_DASH_CONFIG";

/// Fallback config file next to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "contact-dash.json";

/// Where and how to reach the remote contact sheet. The API key lives here —
/// in a config file supplied out of band — never in source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
    /// A1-notation range to pull; first row must be the header row.
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_range() -> String {
    "A1:Z".to_string()
}

fn default_endpoint() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}

impl SheetConfig {
    /// Values-endpoint URL for this sheet. Contains the API key, so it is
    /// never logged.
    pub fn values_url(&self) -> String {
        format!(
            "{}/{}/values/{}?key={}",
            self.endpoint.trim_end_matches('/'),
            self.spreadsheet_id,
            self.range,
            self.api_key
        )
    }
}

/// Full dashboard configuration: optional remote sheet plus the declared
/// column schema (defaults to the contact-sheet schema).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub sheet: Option<SheetConfig>,
    #[serde(default)]
    pub schema: DashboardSchema,
}

impl DashboardConfig {
    /// Parse a config file; declared column names are normalized so a
    /// hand-edited schema with stray whitespace matches the loaded table.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: DashboardConfig =
            serde_json::from_str(&text).context("parsing config JSON")?;
        config.schema = config.schema.normalized();
        Ok(config)
    }

    /// Load from `$CONTACT_DASH_CONFIG`, else `contact-dash.json`, else fall
    /// back to defaults (no remote sheet, built-in contact schema).
    pub fn load_or_default() -> Self {
        let path = std::env::var(CONFIG_ENV_VAR)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|_| std::path::PathBuf::from(DEFAULT_CONFIG_FILE));

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "No usable config at {} ({e:#}); remote fetch disabled",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_sheet_config_fills_defaults() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{ "sheet": { "spreadsheet_id": "abc123", "api_key": "k" } }"#,
        )
        .unwrap();

        let sheet = config.sheet.unwrap();
        assert_eq!(sheet.range, "A1:Z");
        assert_eq!(
            sheet.values_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/A1:Z?key=k"
        );
        // schema falls back to the built-in contact schema
        assert_eq!(config.schema.columns.len(), 5);
    }

    #[test]
    fn schema_override_is_normalized_on_load() {
        let dir = std::env::temp_dir().join("contact-dash-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{ "schema": [ { "name": "Sector o industria ", "filterable": true } ] }"#,
        )
        .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.schema.columns.len(), 1);
        assert_eq!(config.schema.columns[0].name, "Sector o industria");
        assert!(config.sheet.is_none());
    }
}
