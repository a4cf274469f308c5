use crate::domain::model::{Course, CourseLevel};
use crate::utils::error::{RegisterError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
    pub catalog: Option<Vec<CourseConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub name: String,
    pub level: CourseLevel,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegisterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegisterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders with environment values. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegisterError::Internal {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_file(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|s| s.data_file.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn catalog(&self) -> Option<Vec<Course>> {
        self.catalog.as_ref().map(|entries| {
            entries
                .iter()
                .map(|c| Course::new(c.name.clone(), c.level))
                .collect()
        })
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.data_file() {
            validation::validate_path("storage.data_file", path)?;
        }
        if let Some(entries) = &self.catalog {
            for entry in entries {
                validation::validate_non_empty_string("catalog.name", &entry.name)?;
            }
            validation::validate_unique_names(
                "catalog.name",
                entries.iter().map(|c| c.name.as_str()),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_file = "data/register.csv"

[logging]
level = "info"

[[catalog]]
name = "Rust co ban"
level = "Beginner"

[[catalog]]
name = "Rust nang cao"
level = "Advanced"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_file(), Some("data/register.csv"));
        assert_eq!(config.log_level(), Some("info"));
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].level(), CourseLevel::Advanced);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.data_file().is_none());
        assert!(config.catalog().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_REGISTER_TEST_FILE", "env.csv");

        let toml_content = r#"
[storage]
data_file = "${COURSE_REGISTER_TEST_FILE}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_file(), Some("env.csv"));

        std::env::remove_var("COURSE_REGISTER_TEST_FILE");
    }

    #[test]
    fn test_unknown_level_is_a_parse_error() {
        let toml_content = r#"
[[catalog]]
name = "X"
level = "Expert"
"#;
        assert!(FileConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_duplicate_catalog_names_fail_validation() {
        let toml_content = r#"
[[catalog]]
name = "X"
level = "Beginner"

[[catalog]]
name = "X"
level = "Advanced"
"#;
        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_file = \"file.csv\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_file(), Some("file.csv"));
    }
}
