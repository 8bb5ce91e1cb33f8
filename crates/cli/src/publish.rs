//! Copy built console assets into the backend's static directory

use crate::config::BuildConfig;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("source directory {0} does not exist; build the console first")]
    MissingSource(PathBuf),

    #[error("output directory {out} overlaps source directory {source_dir}")]
    Overlap { source_dir: PathBuf, out: PathBuf },

    #[error("{path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

impl PublishError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |error| Self::Io {
            path: path.to_path_buf(),
            error,
        }
    }
}

/// Outcome of a publish run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub out_dir: PathBuf,
    pub files: usize,
    pub bytes: u64,
    /// Entries removed from `out_dir` beforehand
    pub removed: usize,
}

/// Copy `source` into `config.out_dir`
pub fn publish(source: &Path, config: &BuildConfig) -> Result<PublishReport, PublishError> {
    if !source.is_dir() {
        return Err(PublishError::MissingSource(source.to_path_buf()));
    }
    let out_dir = &config.out_dir;
    std::fs::create_dir_all(out_dir).map_err(PublishError::io(out_dir))?;

    let source_abs = source.canonicalize().map_err(PublishError::io(source))?;
    let out_abs = out_dir.canonicalize().map_err(PublishError::io(out_dir))?;
    if source_abs.starts_with(&out_abs) || out_abs.starts_with(&source_abs) {
        return Err(PublishError::Overlap {
            source_dir: source_abs,
            out: out_abs,
        });
    }

    let removed = if config.empty_out_dir {
        empty_dir(out_dir)?
    } else {
        0
    };

    let mut report = PublishReport {
        out_dir: out_abs,
        files: 0,
        bytes: 0,
        removed,
    };
    copy_tree(source, out_dir, &mut report)?;

    info!(
        "Published {} files ({} bytes) to {}",
        report.files,
        report.bytes,
        report.out_dir.display()
    );
    Ok(report)
}

fn empty_dir(dir: &Path) -> Result<usize, PublishError> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(PublishError::io(dir))? {
        let path = entry.map_err(PublishError::io(dir))?.path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path).map_err(PublishError::io(&path))?;
        } else {
            std::fs::remove_file(&path).map_err(PublishError::io(&path))?;
        }
        removed += 1;
    }
    debug!("Removed {removed} entries from {}", dir.display());
    Ok(removed)
}

fn copy_tree(from: &Path, to: &Path, report: &mut PublishReport) -> Result<(), PublishError> {
    std::fs::create_dir_all(to).map_err(PublishError::io(to))?;

    for entry in std::fs::read_dir(from).map_err(PublishError::io(from))? {
        let entry = entry.map_err(PublishError::io(from))?;
        let src = entry.path();
        let dst = to.join(entry.file_name());

        if src.is_dir() {
            copy_tree(&src, &dst, report)?;
        } else {
            report.bytes += std::fs::copy(&src, &dst).map_err(PublishError::io(&src))?;
            report.files += 1;
        }
    }
    Ok(())
}
