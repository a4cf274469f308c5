pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::AppConfig;
pub use crate::core::{console::Console, registry::Registry};
pub use domain::model::{Course, CourseLevel, Enrollment, Grade, Person, Student};
pub use domain::ports::{ConfigProvider, Storage};
pub use domain::services::{Learner, User};
pub use utils::error::{ErrorCategory, RegisterError, Result};
