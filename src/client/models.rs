//! Wire models for the printer server's JSON responses.
//!
//! These types mirror the server schema and are kept separate from the domain
//! types. Nearly every field is optional: the server omits or nulls values
//! freely depending on printer state, and normalizing them is the client's
//! job, not serde's.

use serde::Deserialize;

/// Actual and target reading of a single heater.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaterReading {
    pub actual: Option<f64>,
    pub target: Option<f64>,
}

/// Heater readings keyed by heater name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemperatureData {
    pub tool0: Option<HeaterReading>,
    pub bed: Option<HeaterReading>,
}

/// Response of `GET /api/printer`.
///
/// Older server versions report temperatures under `temps`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrinterResponse {
    #[serde(alias = "temps")]
    pub temperature: Option<TemperatureData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFile {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobInfo {
    pub file: Option<JobFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProgress {
    pub completion: Option<f64>,
    pub print_time_left: Option<f64>,
}

/// Response of `GET /api/job`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobResponse {
    pub job: Option<JobInfo>,
    pub progress: Option<JobProgress>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConnection {
    pub state: Option<String>,
}

/// Response of `GET /api/connection`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionResponse {
    pub current: Option<CurrentConnection>,
}

/// A node of the file tree returned by `GET /api/files`.
///
/// Folders carry `children`; machine code files carry `size` and `date`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileNode {
    pub name: String,
    /// Path relative to the storage root, including folders.
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub origin: Option<String>,
    pub size: Option<u64>,
    pub date: Option<i64>,
    #[serde(default)]
    pub children: Vec<FileNode>,
}

/// Response of `GET /api/files`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub files: Vec<FileNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_response_accepts_legacy_key() {
        let body = r#"{"temps": {"tool0": {"actual": 21.5, "target": null}, "bed": {"actual": 20.0, "target": 0}}}"#;
        let parsed: PrinterResponse = serde_json::from_str(body).unwrap();
        let temps = parsed.temperature.unwrap();
        assert_eq!(temps.tool0.unwrap().actual, Some(21.5));
        assert_eq!(temps.bed.unwrap().target, Some(0.0));
    }

    #[test]
    fn job_response_tolerates_nulls() {
        let body = r#"{"job": {"file": {"name": null}}, "progress": {"completion": null, "printTimeLeft": null}, "state": "Operational"}"#;
        let parsed: JobResponse = serde_json::from_str(body).unwrap();
        let progress = parsed.progress.unwrap();
        assert!(progress.completion.is_none());
        assert!(progress.print_time_left.is_none());
    }

    #[test]
    fn files_response_keeps_folders() {
        let body = r#"{"files": [
            {"name": "a.gcode", "type": "machinecode", "origin": "local", "size": 10, "date": 1},
            {"name": "parts", "type": "folder", "origin": "local", "children": [
                {"name": "b.gcode", "type": "machinecode", "origin": "local", "size": 20, "date": 2}
            ]}
        ]}"#;
        let parsed: FilesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(parsed.files[1].children[0].name, "b.gcode");
    }
}
