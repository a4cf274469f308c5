use crate::domain::ports::Storage;
use crate::utils::error::{RegisterError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory `Storage` keyed by path.
#[derive(Default)]
pub struct MockStorage {
    files: RefCell<HashMap<String, Vec<u8>>>,
}

impl MockStorage {
    pub fn get_file(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|d| String::from_utf8_lossy(d).into_owned())
    }
}

impl Storage for MockStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            RegisterError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }
}
