//! Generate Use Case
//!
//! Regenerates a Python module from its UI descriptor when the descriptor
//! is newer than the output. The generator writes to a staging file next
//! to the output, which replaces the output only on success, so a failed
//! run never leaves a fresh-looking partial file behind.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::domain::entities::SourceFile;
use crate::domain::ports::{FileSystem, Generator};
use crate::domain::value_objects::parent_dir;
use crate::error::{StampError, StampResult};

/// Options for the generate operation
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Regenerate even when the output is up to date
    pub force: bool,
}

/// What a generate run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    UpToDate,
    Generated,
    /// Generator failed; previous output untouched
    Failed { exit_code: i32 },
}

impl GenerateOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, GenerateOutcome::Failed { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateOutcome::Failed { exit_code } => *exit_code,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerateOutcome::UpToDate => "up_to_date",
            GenerateOutcome::Generated => "generated",
            GenerateOutcome::Failed { .. } => "failed",
        }
    }
}

/// Result of the generate operation
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub outcome: GenerateOutcome,
    pub duration: Duration,
}

/// Generate Use Case
pub struct GenerateUseCase<F: FileSystem, G: Generator> {
    fs: F,
    generator: G,
}

impl<F: FileSystem, G: Generator> GenerateUseCase<F, G> {
    pub fn new(fs: F, generator: G) -> Self {
        Self { fs, generator }
    }

    /// Whether `output` is at least as new as `descriptor`
    pub fn is_up_to_date(&self, descriptor: &Path, output: &Path) -> StampResult<bool> {
        let descriptor = SourceFile::observe(&self.fs, descriptor)?;
        let output = SourceFile::observe(&self.fs, output)?;
        Ok(match (descriptor.modified(), output.modified()) {
            (Some(d), Some(o)) => o >= d,
            _ => false,
        })
    }

    pub fn execute(
        &self,
        descriptor: &Path,
        output: &Path,
        options: GenerateOptions,
    ) -> StampResult<GenerateReport> {
        let start = Instant::now();

        if !self.fs.exists(descriptor) {
            return Err(StampError::DescriptorNotFound {
                path: descriptor.to_path_buf(),
            });
        }

        let outcome = if !options.force && self.is_up_to_date(descriptor, output)? {
            debug!(output = %output.display(), "up to date");
            GenerateOutcome::UpToDate
        } else {
            info!(descriptor = %descriptor.display(), output = %output.display(), "generating");
            self.generate(descriptor, output)?
        };

        Ok(GenerateReport {
            outcome,
            duration: start.elapsed(),
        })
    }

    fn generate(&self, descriptor: &Path, output: &Path) -> StampResult<GenerateOutcome> {
        self.fs.create_dir_all(&parent_dir(output))?;
        let staging = staging_path(output);

        let status = match self.generator.generate(descriptor, &staging) {
            Ok(status) => status,
            Err(e) => {
                self.fs.remove_file(&staging)?;
                return Err(e);
            }
        };

        if status.is_success() {
            self.fs.rename(&staging, output)?;
            Ok(GenerateOutcome::Generated)
        } else {
            self.fs.remove_file(&staging)?;
            Ok(GenerateOutcome::Failed {
                exit_code: status.exit_code(),
            })
        }
    }
}

/// Hidden sibling of `output`, unique per process
fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent_dir(output).join(format!(".{}.{}.tmp", name, std::process::id()))
}
