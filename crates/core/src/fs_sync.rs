//! Replacing an output directory with a copy of another tree.
//!
//! The sequence is remove, recreate, copy. Each step assumes the previous one
//! finished; copying expects an existing, empty destination.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source and destination of a directory sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySpec {
    /// Tree whose contents are copied.
    #[serde(alias = "src")]
    pub source: PathBuf,
    /// Directory that is wiped and refilled.
    #[serde(alias = "dest")]
    pub destination: PathBuf,
}

impl CopySpec {
    /// Creates a spec from two paths.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Fails with [`io::ErrorKind::InvalidInput`] when `spec.destination` is
/// `spec.source` or lies inside it.
///
/// Copying a tree into itself would walk into the copy being written. A source
/// that does not exist is left for the copy step to report.
pub fn check_destination(spec: &CopySpec) -> io::Result<()> {
    let source = match fs::canonicalize(&spec.source) {
        Ok(source) => source,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    let destination = resolve(&spec.destination)?;
    if destination.starts_with(&source) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "cannot copy {} to a subdirectory of itself, {}",
                spec.source.display(),
                spec.destination.display()
            ),
        ));
    }
    Ok(())
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the rest.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    for ancestor in absolute.ancestors() {
        if let Ok(real) = fs::canonicalize(ancestor) {
            let rest = absolute.strip_prefix(ancestor).map_err(io::Error::other)?;
            return Ok(real.join(rest));
        }
    }
    Ok(absolute)
}

/// Removes `path` and everything under it. A missing path is not an error.
pub fn remove_destination(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Creates `path` as a directory, including missing parents.
pub fn recreate_destination(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Copies the contents of `source` into the existing directory `destination`.
///
/// Directories are recreated, files copied, and symlinks recreated as
/// symlinks where the platform allows it. A `source` that is a single file is
/// copied into `destination` under its own name. Returns the number of files
/// copied.
pub fn copy_tree(source: &Path, destination: &Path) -> io::Result<u64> {
    let metadata = fs::metadata(source)?;
    if !metadata.is_dir() {
        let name = source.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("source has no file name: {}", source.display()),
            )
        })?;
        fs::copy(source, destination.join(name))?;
        return Ok(1);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> io::Result<()> {
    let points_to = fs::read_link(link)?;
    std::os::unix::fs::symlink(points_to, target)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> io::Result<()> {
    if fs::metadata(link)?.is_dir() {
        fs::create_dir_all(target)?;
        copy_tree(link, target).map(|_| ())
    } else {
        fs::copy(link, target).map(|_| ())
    }
}

/// Runs the full remove, recreate, copy sequence on the calling thread.
///
/// A destination inside the source is rejected before anything is removed.
pub fn sync_directory(spec: &CopySpec) -> io::Result<u64> {
    check_destination(spec)?;
    log::debug!("removing {}", spec.destination.display());
    remove_destination(&spec.destination)?;
    log::debug!("creating {}", spec.destination.display());
    recreate_destination(&spec.destination)?;
    log::debug!(
        "copying {} into {}",
        spec.source.display(),
        spec.destination.display()
    );
    copy_tree(&spec.source, &spec.destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn listing(root: &Path) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .map(|entry| {
                let entry = entry.unwrap();
                entry
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn replaces_stale_destination_contents() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("dist");
        let destination = tmp.path().join("public");
        write(&source.join("a.txt"), "X");
        write(&destination.join("b.txt"), "stale");

        let copied = sync_directory(&CopySpec::new(&source, &destination)).unwrap();

        assert_eq!(copied, 1);
        assert_eq!(listing(&destination), vec!["a.txt"]);
        assert_eq!(fs::read_to_string(destination.join("a.txt")).unwrap(), "X");
    }

    #[test]
    fn creates_missing_destination_with_parents() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("dist");
        let destination = tmp.path().join("deploy/site/www");
        write(&source.join("index.html"), "<html></html>");
        write(&source.join("assets/app.js"), "console.log(1)");

        let copied = sync_directory(&CopySpec::new(&source, &destination)).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            listing(&destination),
            vec!["assets", "assets/app.js", "index.html"]
        );
    }

    #[test]
    fn missing_source_fails_after_recreating_destination() {
        let tmp = TempDir::new().unwrap();
        let destination = tmp.path().join("public");
        write(&destination.join("old.txt"), "old");

        let err = sync_directory(&CopySpec::new(tmp.path().join("nope"), &destination))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(destination.is_dir());
        assert!(listing(&destination).is_empty());
    }

    #[test]
    fn destination_inside_source_is_rejected_up_front() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("dist");
        write(&source.join("a.txt"), "X");

        let err = sync_directory(&CopySpec::new(&source, source.join("mirror"))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(listing(&source), vec!["a.txt"]);

        let err = sync_directory(&CopySpec::new(&source, &source)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(fs::read_to_string(source.join("a.txt")).unwrap(), "X");
    }

    #[test]
    fn nested_check_sees_through_dot_segments() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("dist");
        write(&source.join("a.txt"), "X");
        fs::create_dir_all(tmp.path().join("other")).unwrap();

        let sneaky = tmp.path().join("other/../dist/deep/out");
        let err = check_destination(&CopySpec::new(&source, sneaky)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        check_destination(&CopySpec::new(&source, tmp.path().join("dist-copy"))).unwrap();
        check_destination(&CopySpec::new(tmp.path().join("missing"), &source)).unwrap();
    }

    #[test]
    fn remove_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gone");
        remove_destination(&path).unwrap();
        remove_destination(&path).unwrap();

        write(&path, "a file, not a directory");
        remove_destination(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn single_file_source_lands_under_its_name() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("robots.txt");
        let destination = tmp.path().join("out");
        write(&source, "User-agent: *");

        sync_directory(&CopySpec::new(&source, &destination)).unwrap();

        assert_eq!(listing(&destination), vec!["robots.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_recreated() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("dist");
        let destination = tmp.path().join("out");
        write(&source.join("real.txt"), "real");
        std::os::unix::fs::symlink("real.txt", source.join("link.txt")).unwrap();

        let copied = sync_directory(&CopySpec::new(&source, &destination)).unwrap();

        assert_eq!(copied, 1);
        assert_eq!(
            fs::read_link(destination.join("link.txt")).unwrap(),
            PathBuf::from("real.txt")
        );
        assert_eq!(
            fs::read_to_string(destination.join("link.txt")).unwrap(),
            "real"
        );
    }

    #[test]
    fn copy_spec_accepts_short_keys() {
        let spec: CopySpec =
            serde_json::from_str(r#"{ "src": "dist", "dest": "public" }"#).unwrap();
        assert_eq!(spec, CopySpec::new("dist", "public"));

        let spec: CopySpec =
            serde_json::from_str(r#"{ "source": "dist", "destination": "public" }"#).unwrap();
        assert_eq!(spec, CopySpec::new("dist", "public"));

        assert!(serde_json::from_str::<CopySpec>(r#"{ "src": "dist" }"#).is_err());
    }
}
