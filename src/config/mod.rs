#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::registry::default_catalog;
use crate::domain::model::Course;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::FileConfig;

pub const DEFAULT_DATA_FILE: &str = "students.csv";

/// Settings the register runs with after file and flag overrides are applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: String,
    pub catalog: Vec<Course>,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            catalog: default_catalog(),
            log_level: None,
        }
    }
}

impl AppConfig {
    pub fn from_file_config(file: &FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_file: file
                .data_file()
                .map(str::to_string)
                .unwrap_or(defaults.data_file),
            catalog: file.catalog().unwrap_or(defaults.catalog),
            log_level: file.log_level().map(str::to_string),
        }
    }

    pub fn with_data_file(mut self, data_file: Option<String>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        self
    }
}

impl ConfigProvider for AppConfig {
    fn data_file(&self) -> &str {
        &self.data_file
    }

    fn catalog(&self) -> Vec<Course> {
        self.catalog.clone()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_file", &self.data_file)?;
        for course in &self.catalog {
            validation::validate_non_empty_string("catalog.name", course.name())?;
        }
        validation::validate_unique_names("catalog.name", self.catalog.iter().map(|c| c.name()))
    }
}
