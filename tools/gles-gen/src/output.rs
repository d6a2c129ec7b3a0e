//! Writing rendered files to disk

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{GenError, Result};

/// A fully rendered output file, held in memory until the whole run succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }

    /// Whether the file on disk already holds exactly these contents.
    pub fn is_fresh(&self) -> Result<bool> {
        match fs::read(&self.path) {
            Ok(existing) => Ok(existing == self.contents.as_bytes()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GenError::io(&self.path, e)),
        }
    }
}

/// Write every file, each one atomically.
///
/// Outputs are unconditionally overwritten.
pub fn write_all(files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        write_atomic(&file.path, file.contents.as_bytes())?;
        tracing::info!(path = %file.path.display(), "wrote generated file");
    }
    Ok(())
}

/// Paths of the files whose on-disk contents differ from the rendered ones.
pub fn stale_files(files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    for file in files {
        if !file.is_fresh()? {
            stale.push(file.path.clone());
        }
    }
    Ok(stale)
}

/// Write `contents` to `<path>.tmp` and rename it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = match path.file_name() {
        Some(name) => {
            let mut tmp_name = OsString::from(name);
            tmp_name.push(".tmp");
            path.with_file_name(tmp_name)
        }
        None => {
            return Err(GenError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name"),
            ));
        }
    };

    let result = (|| {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(contents)?;
        f.sync_all()?;
        drop(f);

        #[cfg(windows)]
        {
            if path.exists() {
                // Windows rename fails if destination exists.
                fs::remove_file(path)?;
            }
        }

        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(GenError::io(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_all_overwrites_and_leaves_no_tmp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.h");
        fs::write(&path, "old").unwrap();

        let file = GeneratedFile::new(&path, "new contents\n".to_string());
        write_all(std::slice::from_ref(&file)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents\n");
        assert!(!dir.path().join("out.h.tmp").exists());
        assert!(file.is_fresh().unwrap());
    }

    #[test]
    fn test_stale_files_reports_missing_and_changed() {
        let dir = tempdir().unwrap();
        let same = dir.path().join("same.c");
        let changed = dir.path().join("changed.c");
        let missing = dir.path().join("missing.c");
        fs::write(&same, "a").unwrap();
        fs::write(&changed, "b").unwrap();

        let files = vec![
            GeneratedFile::new(&same, "a".to_string()),
            GeneratedFile::new(&changed, "c".to_string()),
            GeneratedFile::new(&missing, "d".to_string()),
        ];

        assert_eq!(stale_files(&files).unwrap(), vec![changed, missing]);
    }

    #[test]
    fn test_unwritable_path_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.c");
        let err = write_all(&[GeneratedFile::new(&path, String::new())]).unwrap_err();
        assert!(err.to_string().contains("no_such_dir"));
    }
}
