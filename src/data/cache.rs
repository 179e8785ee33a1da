use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use super::loader::load_file;
use super::model::Dataset;
use crate::error::LoadError;

/// Load-once, read-only holder for the dataset behind one file path.
///
/// The file is read on the first call to [`DatasetCache::dataset`]; later
/// calls return the same value. A failed load leaves the cache empty.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Dataset>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn dataset(&self) -> Result<&Dataset, LoadError> {
        if let Some(ds) = self.cell.get() {
            return Ok(ds);
        }
        let ds = load_file(&self.path)?;
        if ds.is_empty() {
            log::warn!("{} contains no rows", self.path.display());
        } else if let Some((first, last)) = ds.span() {
            log::info!(
                "Loaded {} days ({first} … {last}) from {}",
                ds.len(),
                self.path.display()
            );
        }
        Ok(self.cell.get_or_init(|| ds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_once_and_serves_the_cached_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dteday,weathersit,temp,cnt").unwrap();
        writeln!(file, "2011-01-01,1,0.3,985").unwrap();
        drop(file);

        let cache = DatasetCache::new(&path);
        assert!(!cache.is_loaded());
        assert_eq!(cache.dataset().unwrap().len(), 1);
        assert!(cache.is_loaded());

        // The file is not consulted again once cached.
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cache.dataset().unwrap().len(), 1);
    }

    #[test]
    fn header_only_file_loads_as_an_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.csv");
        std::fs::write(&path, "dteday,weathersit,temp,cnt\n").unwrap();

        let cache = DatasetCache::new(&path);
        let ds = cache.dataset().unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.span(), None);
        assert!(cache.is_loaded());
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().join("missing.csv"));
        assert!(cache.dataset().is_err());
        assert!(!cache.is_loaded());
        assert_eq!(cache.path(), dir.path().join("missing.csv"));
    }
}
