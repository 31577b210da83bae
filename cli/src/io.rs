use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use image_resizer_core::EncodeFormat;

use crate::error::ProcessingError;

/// Collect every supported image file under `input`, recursively.
///
/// `exclude` prunes a subtree from the walk (the output directory when it
/// lives inside the input). Results are sorted by path.
pub fn collect_files(input: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, ProcessingError> {
    if !input.is_dir() {
        return Err(ProcessingError::ReadFile {
            path: input.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let files: Result<Vec<_>, _> = WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match exclude {
            Some(excluded) => entry.depth() == 0 || entry.path() != excluded,
            None => true,
        })
        .filter_map(|entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => return Some(Err(ProcessingError::from(e))),
            };
            if !entry.file_type().is_file() {
                return None;
            }
            let path = entry.into_path();
            if EncodeFormat::from_path(&path).is_some() {
                Some(Ok(path))
            } else {
                log::trace!("Ignoring {}", path.display());
                None
            }
        })
        .collect();

    files
}

/// Read file contents.
pub fn read_file(path: &Path) -> Result<Vec<u8>, ProcessingError> {
    fs::read(path).map_err(|e| ProcessingError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write file contents, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), ProcessingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ProcessingError::WriteFile {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, data).map_err(|e| ProcessingError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
