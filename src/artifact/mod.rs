// ABOUTME: Local artifact classification and source-directory packaging.
// ABOUTME: Produces the tar.gz archive uploaded for build-service deploys.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::deploy::DeployError;
use crate::diagnostics::{Diagnostics, Warning};

/// What kind of package a local path (or config) describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A prebuilt archive (jar/war/zip) uploaded as-is.
    PrebuiltArchive,
    /// A source directory that must be compressed before upload.
    SourceDirectory,
    /// A custom container image; nothing is uploaded.
    Container,
}

impl ArtifactKind {
    /// Classify a local package by its declared shape.
    pub fn classify(path: &Path) -> Self {
        if path.is_dir() {
            ArtifactKind::SourceDirectory
        } else {
            ArtifactKind::PrebuiltArchive
        }
    }
}

static ARCHIVE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Compress a source directory into a freshly named `.tar.gz` in the
/// system temp directory and return the archive path.
///
/// Entries are rooted at the directory itself, not a contained subfolder,
/// so the build service sees the project root at the archive root.
/// Unreadable special files are skipped with a warning; real I/O errors
/// fail the packaging. Cleanup of the archive is the caller's concern.
pub fn compress_source(dir: &Path, diag: &mut Diagnostics) -> Result<PathBuf, DeployError> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let unique = ARCHIVE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let archive_path = std::env::temp_dir().join(format!("slipway-src-{stamp}-{unique}.tar.gz"));

    tracing::debug!(dir = %dir.display(), archive = %archive_path.display(), "packaging source");

    build_archive(dir, &archive_path, diag).map_err(|e| {
        let _ = std::fs::remove_file(&archive_path);
        DeployError::CompressionFailed(e.to_string())
    })?;

    Ok(archive_path)
}

fn build_archive(
    dir: &Path,
    archive_path: &Path,
    diag: &mut Diagnostics,
) -> std::io::Result<()> {
    let file = std::fs::File::create(archive_path)?;
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    append_dir(&mut builder, dir, Path::new(""), diag)?;

    builder.into_inner()?.finish()?;
    Ok(())
}

fn append_dir(
    builder: &mut tar::Builder<flate2::write::GzEncoder<std::fs::File>>,
    dir: &Path,
    prefix: &Path,
    diag: &mut Diagnostics,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = prefix.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            builder.append_dir(&name, &path)?;
            append_dir(builder, &path, &name, diag)?;
        } else if file_type.is_file() {
            builder.append_path_with_name(&path, &name)?;
        } else {
            // Sockets, fifos and dangling symlinks are not useful to the
            // build service; skipping them must not fail the deploy.
            diag.warn(Warning::packaging(format!(
                "skipping non-regular file {}",
                path.display()
            )));
        }
    }
    Ok(())
}
