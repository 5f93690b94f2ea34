//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::util::errors::{GenerateError, Result};

/// Destination that means "write to standard output".
pub const STDOUT_SENTINEL: &str = "-";

/// Where a generated artifact goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output
    Stdout,
    /// A file path
    File(PathBuf),
}

impl Destination {
    /// Interpret a command-line destination, honoring the `-` sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write an artifact followed by a single newline.
///
/// Files are written to a temporary sibling and renamed into place, so a
/// failed write never leaves a partial artifact behind.
pub fn write_artifact(dest: &Destination, contents: &str) -> Result<()> {
    match dest {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            writeln!(lock, "{}", contents)
                .and_then(|_| lock.flush())
                .map_err(|source| GenerateError::Write {
                    path: PathBuf::from(STDOUT_SENTINEL),
                    source,
                })
        }
        Destination::File(path) => write_atomic(path, &format!("{}\n", contents)),
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: io::Error| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_destination_parse() {
        assert_eq!(Destination::parse("-"), Destination::Stdout);
        assert_eq!(
            Destination::parse("out/symbols.json"),
            Destination::File(PathBuf::from("out/symbols.json"))
        );
    }

    #[test]
    fn test_write_artifact_appends_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("out.h");

        write_artifact(&Destination::File(path.clone()), "int x;").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "int x;\n");
    }

    #[test]
    fn test_write_artifact_replaces_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        fs::write(&path, "stale").unwrap();

        write_artifact(&Destination::File(path.clone()), "[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_artifact_into_file_parent_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write_artifact(&Destination::File(blocker.join("out.h")), "x").unwrap_err();
        assert!(matches!(err, GenerateError::Write { .. }));
    }
}
