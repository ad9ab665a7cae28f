//! Loading and saving files.

use std::fs;
use std::io;
use std::path::Path;

/// Read `path` as lines.
///
/// Returns `Ok(None)` if the file does not exist. Line endings (`\n` or
/// `\r\n`) are stripped and invalid UTF-8 is replaced.
pub fn load(path: impl AsRef<Path>) -> io::Result<Option<Vec<String>>> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "io", file = %path.display(), "new_file");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();
    tracing::info!(target: "io", file = %path.display(), lines = lines.len(), bytes = bytes.len(), "loaded");
    Ok(Some(lines))
}

/// Write `text` to `path`, replacing its contents. Returns the bytes written.
pub fn save(path: impl AsRef<Path>, text: &str) -> io::Result<usize> {
    let path = path.as_ref();
    fs::write(path, text)?;
    tracing::info!(target: "io", file = %path.display(), bytes = text.len(), "saved");
    Ok(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path().join("absent.txt")).unwrap(), None);
    }

    #[test]
    fn test_load_strips_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        fs::write(&path, "one\r\ntwo\n\nthree").unwrap();
        assert_eq!(
            load(&path).unwrap(),
            Some(vec!["one".to_string(), "two".to_string(), String::new(), "three".to_string()])
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        assert_eq!(save(&path, "a\nbc\n").unwrap(), 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nbc\n");
        assert_eq!(load(&path).unwrap(), Some(vec!["a".to_string(), "bc".to_string()]));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save(dir.path().join("no/such/dir.txt"), "x").is_err());
    }
}
