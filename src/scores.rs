use std::fs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "highscore.txt";

/// Best score, kept in a text file holding one decimal integer.
#[derive(Clone, Debug)]
pub struct HighScore {
    value: u32,
    path: Option<PathBuf>,
}

impl HighScore {
    /// Reads the score at `path`. A missing or unreadable file counts as 0.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let value = Self::read_file(&path);
        tracing::debug!(path = %path.display(), value, "loaded highscore");
        Self {
            value,
            path: Some(path),
        }
    }

    /// A store that never touches the disk.
    pub fn in_memory(value: u32) -> Self {
        Self { value, path: None }
    }

    /// Default location: next to the executable.
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(FILE_NAME);
            }
        }
        PathBuf::from(FILE_NAME)
    }

    fn read_file(path: &Path) -> u32 {
        let Ok(text) = fs::read_to_string(path) else {
            return 0;
        };
        match text.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable highscore: {e}");
                0
            }
        }
    }

    fn write_file(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = fs::write(path, self.value.to_string()) {
            tracing::warn!(path = %path.display(), "failed to save highscore: {e}");
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records `score` if it beats the stored value, writing it out straight
    /// away. Returns true on a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        self.write_file();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let scores = HighScore::load(dir.path().join("nope.txt"));
        assert_eq!(scores.value(), 0);
    }

    #[test]
    fn garbage_loads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScore::load(&path).value(), 0);
    }

    #[test]
    fn submit_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let mut scores = HighScore::load(&path);
        assert!(scores.submit(1200));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1200");
        assert!(!scores.submit(900));
        assert!(!scores.submit(1200));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1200");
        assert_eq!(HighScore::load(&path).value(), 1200);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "4500\n").unwrap();
        assert_eq!(HighScore::load(&path).value(), 4500);
    }

    #[test]
    fn in_memory_store_keeps_the_best() {
        let mut scores = HighScore::in_memory(100);
        assert!(scores.path().is_none());
        assert!(scores.submit(300));
        assert_eq!(scores.value(), 300);
    }
}
