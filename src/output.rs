//! Saving computed results as plain text.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while saving a result.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("No output file name given")]
    EmptyPath,

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `content` verbatim to `path` as UTF-8 text.
///
/// An existing file is overwritten.
pub fn save_text<P: AsRef<Path>>(path: P, content: &str) -> Result<(), OutputError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(OutputError::EmptyPath);
    }
    fs::write(path, content).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rna.txt");

        save_text(&path, "AUGCAUGC").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "AUGCAUGC");

        save_text(&path, "GG").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "GG");
    }

    #[test]
    fn test_save_empty_path() {
        assert!(matches!(save_text("", "ACGT"), Err(OutputError::EmptyPath)));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.txt");
        let err = save_text(&path, "ACGT").unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
        assert!(err.to_string().contains("out.txt"));
    }
}
