use crate::config::toml_config::FileConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-register")]
#[command(about = "Interactive course enrollment register")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Persistence file used by export and import")]
    pub data_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the optional config file and applies flag overrides on top.
    pub fn resolve(&self) -> Result<AppConfig> {
        let config = match &self.config {
            Some(path) => {
                let file = FileConfig::from_file(path)?;
                file.validate()?;
                AppConfig::from_file_config(&file)
            }
            None => AppConfig::default(),
        };
        let config = config.with_data_file(self.data_file.clone());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_flags_gives_defaults() {
        let cli = CliConfig::parse_from(["course-register"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_file(), "students.csv");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flag_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_file = \"from-file.csv\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "course-register",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--data-file",
            "from-flag.csv",
        ]);
        assert_eq!(cli.resolve().unwrap().data_file(), "from-flag.csv");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from(["course-register", "--config", "/nonexistent/x.toml"]);
        assert!(cli.resolve().is_err());
    }
}
