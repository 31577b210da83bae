//! Output path derivation and task planning.
//!
//! Every discovered file keeps its relative location under the output root.
//! Planning happens once, up front, so colliding outputs are reported before
//! any image is decoded.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{OutputOptions, Variant};
use crate::error::PlanError;
use crate::format::{self, EncodeFormat};

pub const MIRROR_SUFFIX: &str = "_mirror";

/// One unit of work: a single rendition of a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub source: PathBuf,
    pub relative: PathBuf,
    pub variant: Variant,
    pub output: PathBuf,
    pub format: EncodeFormat,
}

#[derive(Debug, Clone)]
pub struct PathMapper {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl PathMapper {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Output path for `relative` with its extension replaced by `extension`.
    ///
    /// Mirror renditions get [`MIRROR_SUFFIX`] appended to the file stem.
    pub fn map(&self, relative: &Path, variant: Variant, extension: &str) -> PathBuf {
        let mut name = OsString::from(relative.file_stem().unwrap_or_default());
        if variant.is_mirror() {
            name.push(MIRROR_SUFFIX);
        }
        name.push(".");
        name.push(extension);

        let mut output = self.output_root.join(relative);
        output.set_file_name(name);
        output
    }

    /// Turn discovered files into tasks, one per requested variant.
    ///
    /// Fails if two tasks would write the same output, or if the output root
    /// is the input root itself. Paths are compared case-insensitively.
    pub fn plan(&self, files: &[PathBuf], options: &OutputOptions) -> Result<Vec<FileTask>, PlanError> {
        if self.output_root == self.input_root {
            return Err(PlanError::OutputIsInput(self.output_root.clone()));
        }

        let variants = options.variants();
        let mut tasks = Vec::with_capacity(files.len() * variants.len());
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for source in files {
            let relative = source
                .strip_prefix(&self.input_root)
                .map_err(|_| PlanError::OutsideRoot {
                    path: source.clone(),
                    root: self.input_root.clone(),
                })?
                .to_path_buf();

            let source_format = EncodeFormat::from_path(source)
                .ok_or_else(|| PlanError::UnsupportedSource(source.clone()))?;
            let (encode_format, extension) = format::resolve(options.format, source_format);

            for &variant in variants {
                let output = self.map(&relative, variant, extension);
                let key = output.to_string_lossy().to_lowercase();
                if let Some(first) = claimed.get(&key) {
                    return Err(PlanError::Collision {
                        output,
                        first: first.clone(),
                        second: source.clone(),
                    });
                }
                claimed.insert(key, source.clone());

                tasks.push(FileTask {
                    source: source.clone(),
                    relative: relative.clone(),
                    variant,
                    output,
                    format: encode_format,
                });
            }
        }

        log::debug!(
            "Planned {} task(s) for {} file(s) into {}",
            tasks.len(),
            files.len(),
            self.output_root.display()
        );

        Ok(tasks)
    }
}
