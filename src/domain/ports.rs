use crate::domain::model::Course;
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
}

pub trait ConfigProvider {
    /// Path of the persistence file, relative to the storage root.
    fn data_file(&self) -> &str;
    /// Courses the registry starts with.
    fn catalog(&self) -> Vec<Course>;
}
