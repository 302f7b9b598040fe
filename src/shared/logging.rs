use chrono::{SecondsFormat, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LEVEL_INFO: &str = "info";
pub const LEVEL_WARN: &str = "warn";
pub const LEVEL_ERROR: &str = "error";

pub fn wizard_log_line(level: &str, event: &str, message: &str) -> Option<String> {
    let payload = serde_json::json!({
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "level": level,
        "event": event,
        "message": message,
    });
    serde_json::to_string(&payload).ok()
}

/// Appends one JSON line. Failures are swallowed; logging never ends a session.
pub fn append_wizard_log(path: &Path, level: &str, event: &str, message: &str) {
    let Some(line) = wizard_log_line(level, event, message) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

#[derive(Debug, Clone, Default)]
pub struct WizardLog {
    path: Option<PathBuf>,
}

impl WizardLog {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append(LEVEL_INFO, event, message);
    }

    pub fn warn(&self, event: &str, message: &str) {
        self.append(LEVEL_WARN, event, message);
    }

    pub fn error(&self, event: &str, message: &str) {
        self.append(LEVEL_ERROR, event, message);
    }

    fn append(&self, level: &str, event: &str, message: &str) {
        if let Some(path) = &self.path {
            append_wizard_log(path, level, event, message);
        }
    }
}
