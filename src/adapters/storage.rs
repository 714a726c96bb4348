use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("briefs/austin/brief.json", b"{}")
            .await
            .unwrap();

        let data = fs::read(temp_dir.path().join("briefs/austin/brief.json")).unwrap();
        assert_eq!(data, b"{}");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("sources.csv", b"old").await.unwrap();
        storage.write_file("sources.csv", b"new").await.unwrap();

        let data = fs::read(temp_dir.path().join("sources.csv")).unwrap();
        assert_eq!(data, b"new");
    }

    #[tokio::test]
    async fn test_write_into_file_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        storage.write_file("brief.json", b"{}").await.unwrap();

        let err = storage
            .write_file("brief.json/sources.csv", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::utils::error::SleftError::IoError(_)));
    }
}
