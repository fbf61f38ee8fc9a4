// 🔍 Duplicate-import detection
// Append-only log of every sales file path that was imported successfully

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ImportedFileLog {
    path: PathBuf,
}

impl ImportedFileLog {
    pub fn new(path: &Path) -> Self {
        ImportedFileLog {
            path: path.to_path_buf(),
        }
    }

    /// Every logged path, in import order. A missing log is empty.
    pub fn entries(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub fn already_imported(&self, file_path: &Path) -> io::Result<bool> {
        let wanted = file_path.display().to_string();
        Ok(self.entries()?.iter().any(|entry| *entry == wanted))
    }

    pub fn add_imported_file(&self, file_path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", file_path.display())?;

        debug!(log = %self.path.display(), file = %file_path.display(), "recorded import");
        Ok(())
    }
}
