//! Journey data configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct JourneyConfig {
    /// Procedures JSON; a missing or invalid file falls back to built-in rules
    #[serde(default = "default_procedures_file")]
    pub procedures_file: Option<PathBuf>,
}

impl JourneyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.procedures_file {
            Some(path) if path.as_os_str().is_empty() => {
                Err(ValidationError::MissingRequired("JOURNEY__PROCEDURES_FILE"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            procedures_file: default_procedures_file(),
        }
    }
}

fn default_procedures_file() -> Option<PathBuf> {
    Some(PathBuf::from("data/procedures.on.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_bundled_file() {
        let config = JourneyConfig::default();
        assert_eq!(
            config.procedures_file,
            Some(PathBuf::from("data/procedures.on.json"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_path_fails() {
        let config = JourneyConfig {
            procedures_file: Some(PathBuf::new()),
        };
        assert!(config.validate().is_err());
    }
}
