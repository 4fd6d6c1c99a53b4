//! JSON-lines wheel traces
//!
//! One record per line, either a wheel event at a viewport pixel or a bare
//! clock tick that lets pending timers fire:
//!
//! ```text
//! {"type": "wheel", "time": 0, "pixel": [410, 290], "deltaY": -120}
//! {"type": "wheel", "time": 16, "pixel": [410, 290], "deltaY": -3, "deltaMode": "line"}
//! {"type": "poll", "time": 400}
//! ```

use crate::error::{CliError, CliResult};
use hict_map::{DeltaMode, Millis, Pixel};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceRecord {
    Wheel {
        time: Millis,
        pixel: Pixel,
        #[serde(rename = "deltaY")]
        delta_y: f64,
        #[serde(rename = "deltaMode", default)]
        delta_mode: DeltaMode,
    },
    Poll {
        time: Millis,
    },
}

impl TraceRecord {
    pub fn time(&self) -> Millis {
        match self {
            TraceRecord::Wheel { time, .. } | TraceRecord::Poll { time } => *time,
        }
    }
}

pub fn load_trace(path: &Path) -> CliResult<Vec<TraceRecord>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content, &path.display().to_string())
}

/// Parse trace lines, skipping blanks and `#` comments; times must not go backwards
pub fn parse_trace(content: &str, file: &str) -> CliResult<Vec<TraceRecord>> {
    let mut records = Vec::new();
    let mut last_time = 0;
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(line)
            .map_err(|e| CliError::parse(file.to_string(), format!("line {}: {}", index + 1, e)))?;
        if record.time() < last_time {
            return Err(CliError::parse(
                file.to_string(),
                format!("line {}: time {} is before {}", index + 1, record.time(), last_time),
            ));
        }
        last_time = record.time();
        records.push(record);
    }
    Ok(records)
}
