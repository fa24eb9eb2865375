//! Printable files stored on the printer server.

use chrono::{Local, TimeZone};

const GCODE_SUFFIX: &str = ".gcode";

/// A file available for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name as stored on the server, including its extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload time as a Unix timestamp.
    pub date: i64,
}

impl FileEntry {
    /// Name without the `.gcode` suffix.
    ///
    /// ```
    /// use octopanel::domain::FileEntry;
    ///
    /// let file = FileEntry { name: "benchy.gcode".into(), size: 0, date: 0 };
    /// assert_eq!(file.short_name(), "benchy");
    /// ```
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.strip_suffix(GCODE_SUFFIX).unwrap_or(&self.name)
    }

    /// Size in megabytes (10^6 bytes).
    #[must_use]
    pub fn size_mb(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let size = self.size as f64;
        size / 1_000_000.0
    }

    /// Upload time rendered in local time, or an empty string if out of range.
    #[must_use]
    pub fn local_date(&self) -> String {
        Local
            .timestamp_opt(self.date, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    /// One-line description used by the file list.
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{}  {:.1} MB  {}", self.short_name(), self.size_mb(), self.local_date())
    }
}

/// Formats a duration in seconds as `H:MM:SS`.
///
/// ```
/// use octopanel::domain::files::format_duration;
///
/// assert_eq!(format_duration(0), "0:00:00");
/// assert_eq!(format_duration(3725), "1:02:05");
/// ```
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
