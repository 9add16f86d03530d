use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "dashui.log";

/// Files `clear_all` removes.
const CACHE_FILES: &[&str] = &[LOG_FILE_NAME];

/// Manages cache directory and cache file operations
#[derive(Clone)]
pub struct CacheManager {
    pub(crate) cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(app_name: &str) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| eyre!("Could not determine cache directory"))?
            .join(app_name);
        Ok(Self { cache_dir })
    }

    /// Create a CacheManager with a custom cache directory (primarily for testing)
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cache_file(&self, filename: &str) -> PathBuf {
        self.cache_dir.join(filename)
    }

    pub fn log_file(&self) -> PathBuf {
        self.cache_file(LOG_FILE_NAME)
    }

    pub fn ensure_cache_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Remove every known cache file. Returns how many were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for filename in CACHE_FILES {
            let file_path = self.cache_file(filename);
            if file_path.exists() {
                match fs::remove_file(&file_path) {
                    Ok(()) => removed += 1,
                    Err(e) => eprintln!("Warning: Could not remove cache file {}: {}", filename, e),
                }
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_all_removes_log() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = CacheManager::with_dir(dir.path().join("dashui"));
        assert_eq!(cache.clear_all().unwrap(), 0);
        cache.ensure_cache_dir().unwrap();
        fs::write(cache.log_file(), "line\n").unwrap();
        fs::write(cache.cache_file("keep.txt"), "x").unwrap();
        assert_eq!(cache.clear_all().unwrap(), 1);
        assert!(!cache.log_file().exists());
        assert!(cache.cache_file("keep.txt").exists());
    }
}
