//! Staged writes and the output directory swap.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// A page ready to be written, named relative to the output directory.
#[derive(Debug, Clone)]
pub(crate) struct RenderedPage {
    pub file_name: String,
    pub html: String,
}

/// Parent directory and file name of the output directory.
pub(crate) fn split_output(output_dir: &Path) -> Result<(PathBuf, String), BuildError> {
    let name = output_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| BuildError::WriteFailure {
            path: output_dir.to_path_buf(),
            message: "output path must end in a directory name".to_string(),
        })?;

    let parent = match output_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((parent, name.to_string()))
}

/// Advisory lock held while the output directory is being replaced.
///
/// The lock file sits next to the output directory and is created with
/// create-new semantics, so a second build fails instead of racing.
#[derive(Debug)]
pub(crate) struct BuildLock {
    path: PathBuf,
}

impl BuildLock {
    pub fn acquire(output_dir: &Path) -> Result<Self, BuildError> {
        let (parent, name) = split_output(output_dir)?;
        fs::create_dir_all(&parent).map_err(|e| write_failure(&parent, e))?;

        let path = parent.join(format!(".{}.lock", name));
        match File::create_new(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(BuildError::WriteFailure {
                path,
                message: "another build is writing this site (remove the lock file if it is stale)"
                    .to_string(),
            }),
            Err(e) => Err(write_failure(&path, e)),
        }
    }
}

impl Drop for BuildLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove lock {}: {}", self.path.display(), e);
        }
    }
}

/// Replace the output directory with exactly `pages`.
///
/// Pages are written to a staging directory next to the output directory,
/// which is then renamed into place. Until the rename succeeds the previous
/// output is untouched; if the rename fails it is restored.
pub(crate) fn replace_dir(output_dir: &Path, pages: &[RenderedPage]) -> Result<(), BuildError> {
    let (parent, name) = split_output(output_dir)?;
    fs::create_dir_all(&parent).map_err(|e| write_failure(&parent, e))?;

    // Dropped (and deleted) on any early return below
    let staging = tempfile::Builder::new()
        .prefix(&format!(".{}.staging-", name))
        .tempdir_in(&parent)
        .map_err(|e| write_failure(&parent, e))?;

    for page in pages {
        let path = staging.path().join(&page.file_name);
        fs::write(&path, &page.html).map_err(|e| write_failure(&path, e))?;
        tracing::debug!("Staged {}", page.file_name);
    }

    let staged = staging.keep();
    let previous = parent.join(format!(".{}.previous", name));

    swap(&staged, output_dir, &previous)
}

fn swap(staged: &Path, output_dir: &Path, previous: &Path) -> Result<(), BuildError> {
    // Leftover from an interrupted build
    if previous.exists() {
        remove_path(previous).map_err(|e| abandon(staged, previous, e))?;
    }

    let had_output = output_dir.exists();
    if had_output {
        fs::rename(output_dir, previous).map_err(|e| abandon(staged, output_dir, e))?;
    }

    if let Err(e) = fs::rename(staged, output_dir) {
        if had_output {
            if let Err(restore) = fs::rename(previous, output_dir) {
                tracing::error!(
                    "Failed to restore previous output from {}: {}",
                    previous.display(),
                    restore
                );
            }
        }
        return Err(abandon(staged, output_dir, e));
    }

    if had_output {
        if let Err(e) = remove_path(previous) {
            tracing::warn!(
                "Failed to remove previous output {}: {}",
                previous.display(),
                e
            );
        }
    }

    Ok(())
}

/// Delete the staging directory and describe the failure.
fn abandon(staged: &Path, path: &Path, err: std::io::Error) -> BuildError {
    if let Err(e) = fs::remove_dir_all(staged) {
        tracing::warn!("Failed to remove staging {}: {}", staged.display(), e);
    }
    write_failure(path, err)
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn write_failure(path: &Path, err: std::io::Error) -> BuildError {
    BuildError::WriteFailure {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn page(name: &str, html: &str) -> RenderedPage {
        RenderedPage {
            file_name: name.to_string(),
            html: html.to_string(),
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn creates_output_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("site").join("dist");

        replace_dir(&out, &[page("index.html", "<p>home</p>")]).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("index.html")).unwrap(),
            "<p>home</p>"
        );
        assert_eq!(entries(&temp.path().join("site")), vec!["dist"]);
    }

    #[test]
    fn replaces_previous_contents() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.html"), "old").unwrap();

        replace_dir(&out, &[page("2025-01-01.html", "new")]).unwrap();

        assert_eq!(entries(&out), vec!["2025-01-01.html"]);
        assert_eq!(entries(temp.path()), vec!["dist"]);
    }

    #[test]
    fn clears_leftover_previous_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir_all(temp.path().join(".dist.previous")).unwrap();
        fs::create_dir_all(&out).unwrap();

        replace_dir(&out, &[]).unwrap();

        assert!(entries(&out).is_empty());
        assert_eq!(entries(temp.path()), vec!["dist"]);
    }

    #[test]
    fn lock_is_exclusive_and_released() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let lock = BuildLock::acquire(&out).unwrap();
        assert!(temp.path().join(".dist.lock").exists());

        let second = BuildLock::acquire(&out);
        assert!(matches!(second, Err(BuildError::WriteFailure { .. })));

        drop(lock);
        assert!(!temp.path().join(".dist.lock").exists());
        assert!(BuildLock::acquire(&out).is_ok());
    }

    #[test]
    fn splits_relative_output() {
        let (parent, name) = split_output(Path::new("dist")).unwrap();
        assert_eq!(parent, PathBuf::from("."));
        assert_eq!(name, "dist");

        assert!(split_output(Path::new("..")).is_err());
    }
}
