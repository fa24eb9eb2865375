//! Rotating log file with size-based rotation and backup retention.
//!
//! The panel runs unattended for weeks on small SD cards, so the log file is
//! capped: once it grows past the threshold it is renamed with a timestamp
//! suffix and a fresh file is started. Only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MiB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened lazily on the first write.
    file: Option<File>,
    written: u64,
}

/// Thread-safe rotating file writer.
///
/// Clones share the same file handle, which is what
/// [`MakeWriter`] hands out for every event.
///
/// # Rotation Strategy
///
/// 1. Before each write, compare the current size against the threshold
/// 2. If exceeded, rename `<name>` to `<name>.<timestamp>`
/// 3. Remove all but the newest backups
///
/// # Example
///
/// ```
/// use octopanel::observability::RotatingFileWriter;
/// use std::io::Write;
///
/// let dir = std::env::temp_dir();
/// let mut writer = RotatingFileWriter::new(dir.join("octopanel-doc.log"));
/// writeln!(writer, "panel started")?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RotatingFileWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RotatingFileWriter {
    /// Creates a writer with the default 10 MiB threshold and 3 backups.
    ///
    /// The file is not opened until the first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                path,
                max_bytes,
                max_backups,
                file: None,
                written: 0,
            })),
        }
    }

    /// Path of the live log file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.inner
            .lock()
            .map(|inner| inner.path.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))
    }
}

impl Inner {
    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            self.written = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))
    }

    fn rotate_if_needed(&mut self) -> io::Result<()> {
        if self.file.is_some() && self.written <= self.max_bytes {
            return Ok(());
        }
        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if size <= self.max_bytes {
            return Ok(());
        }

        self.file = None;
        self.written = 0;

        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.path, PathBuf::from(backup))?;

        cleanup_old_backups(&self.path, self.max_backups)
    }
}

/// Lists `<name>.*` siblings of `path`, newest first.
fn backups_of(path: &Path) -> io::Result<Vec<PathBuf>> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|s| s.to_str())
        .map(|name| format!("{name}."))
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

    let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect();

    // Timestamp suffixes sort lexicographically.
    backups.sort_by(|a, b| b.cmp(a));
    Ok(backups)
}

fn cleanup_old_backups(path: &Path, keep: usize) -> io::Result<()> {
    for old in backups_of(path)?.iter().skip(keep) {
        let _ = fs::remove_file(old);
    }
    Ok(())
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock()?;
        inner.rotate_if_needed()?;
        let n = inner.open()?.write(buf)?;
        inner.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.lock()?;
        match inner.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.log");
        fs::write(&path, "old\n").unwrap();

        let mut writer = RotatingFileWriter::new(path.clone());
        writer.write_all(b"new\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn rotates_past_threshold_and_keeps_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.log");
        let mut writer = RotatingFileWriter::with_limits(path.clone(), 8, 2);

        for i in 0..5 {
            writer.write_all(format!("line {i} xx\n").as_bytes()).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line 4 xx\n");
        let backups = backups_of(&path).unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "line 3 xx\n");
    }

    #[test]
    fn clones_share_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.log");
        let writer = RotatingFileWriter::new(path.clone());

        writer.make_writer().write_all(b"a").unwrap();
        writer.make_writer().write_all(b"b").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ab");
        assert_eq!(writer.path(), path);
    }
}
