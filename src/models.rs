//! Shapes of the shared data document.
//!
//! The document is produced by an external job, so every shape here is read
//! leniently from a [`serde_json::Value`]: fields with an unexpected type are
//! treated as absent instead of failing the whole document.

use serde::Serialize;
use serde_json::Value;

/// One observation in the single-metric document.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: Option<String>,
    pub download_count: Option<i64>,
}

impl HistoryEntry {
    pub fn from_value(value: &Value) -> Self {
        Self {
            timestamp: string_field(value, "timestamp"),
            download_count: value.get("downloadCount").and_then(integer),
        }
    }
}

/// One observation in a project's history. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSample {
    pub download_display: Option<String>,
    pub download_approx: Option<f64>,
    pub timestamp: Option<String>,
}

impl ProjectSample {
    pub fn from_value(value: &Value) -> Self {
        Self {
            download_display: string_field(value, "downloadDisplay"),
            download_approx: value.get("downloadApprox").and_then(Value::as_f64),
            timestamp: string_field(value, "timestamp"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub curseforge_url: Option<String>,
    pub logo_url: Option<String>,
    pub history: Vec<ProjectSample>,
}

impl ProjectEntry {
    pub fn from_value(value: &Value) -> Self {
        let history = value
            .get("history")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ProjectSample::from_value).collect())
            .unwrap_or_default();

        Self {
            name: string_field(value, "name"),
            kind: string_field(value, "type"),
            curseforge_url: string_field(value, "curseforgeUrl"),
            logo_url: string_field(value, "logoUrl"),
            history,
        }
    }
}

/// The multi-project form of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsDocument {
    pub last_updated: Option<String>,
    pub projects: Vec<ProjectEntry>,
}

impl ProjectsDocument {
    /// Reads the top-level object. Returns `None` for JSON `null`, which
    /// cannot be dereferenced; any other value without a usable `projects`
    /// array yields an empty document.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }

        let projects = value
            .get("projects")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ProjectEntry::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            last_updated: string_field(value, "lastUpdated"),
            projects,
        })
    }
}

/// A row of the single-metric history table, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub label: usize,
    pub timestamp: String,
    pub download_count: String,
    pub delta: i64,
    pub delta_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResponse {
    pub current_count: String,
    pub last_updated: String,
    pub rows: Vec<HistoryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub name: String,
    pub kind: String,
    pub display_value: String,
    pub delta: Option<f64>,
    pub delta_text: String,
    pub link: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsResponse {
    pub last_updated: String,
    pub projects: Vec<ProjectCard>,
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    value
        .as_f64()
        .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
        .map(|number| number as i64)
}
