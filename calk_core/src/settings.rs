//! # Settings
//!
//! Display and output preferences for front ends (the CLI, a web layer).
//! Settings only affect how results are rendered; they never change what
//! [`crate::evaluate`] computes.
//!
//! Settings files are human-readable JSON:
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "precision": 4,
//!   "output": "text"
//! }
//! ```
//!
//! Missing fields take their defaults.
//!
//! ## Example
//!
//! ```rust
//! use calk_core::settings::Settings;
//!
//! let settings = Settings { precision: Some(2), ..Settings::default() };
//! assert_eq!(settings.format_value(std::f64::consts::PI), "3.14");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Current schema version for settings files
pub const SETTINGS_VERSION: &str = "0.1.0";

/// Largest supported number of displayed decimals
pub const MAX_PRECISION: usize = 17;

/// How a front end should print results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain number or error message
    #[default]
    Text,
    /// `OperationResult` as JSON
    Json,
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Number of decimals to display; `None` prints the shortest
    /// representation that round-trips
    pub precision: Option<usize>,

    /// Output format
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: SETTINGS_VERSION.to_string(),
            precision: None,
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Render a value for display.
    pub fn format_value(&self, value: f64) -> String {
        match self.precision {
            Some(p) if value.is_finite() => format!("{:.*}", p, value),
            _ => value.to_string(),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        validate_version(&self.version)?;
        if let Some(p) = self.precision {
            if p > MAX_PRECISION {
                return Err(CalcError::SerializationError {
                    reason: format!("precision {} exceeds maximum of {}", p, MAX_PRECISION),
                });
            }
        }
        Ok(())
    }
}

/// Load settings from a JSON file.
///
/// # Errors
///
/// - `FileError` if the file cannot be read
/// - `SerializationError` for invalid JSON or out-of-range values
/// - `VersionMismatch` for an incompatible schema version
pub fn load_settings(path: &Path) -> CalcResult<Settings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: Settings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    settings.validate()?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SETTINGS_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SETTINGS_VERSION);

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor is not readable
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_value() {
        let shortest = Settings::default();
        assert_eq!(shortest.format_value(5.0), "5");
        assert_eq!(shortest.format_value(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(shortest.format_value(f64::INFINITY), "inf");

        let fixed = Settings { precision: Some(3), ..Settings::default() };
        assert_eq!(fixed.format_value(2.0 / 3.0), "0.667");
        assert_eq!(fixed.format_value(f64::NAN), "NaN");
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"precision": 2}"#).unwrap();
        assert_eq!(settings.precision, Some(2));
        assert_eq!(settings.output, OutputFormat::Text);
        assert_eq!(settings.version, SETTINGS_VERSION);
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calk.json");
        fs::write(&path, r#"{"version": "0.1.0", "precision": 6, "output": "json"}"#).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(
            loaded,
            Settings {
                precision: Some(6),
                output: OutputFormat::Json,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_settings(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_rejects_excessive_precision() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("precise.json");
        fs::write(&path, r#"{"precision": 40}"#).unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SETTINGS_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
