//! Instrument option enums for sequencing runs and wells.
//!
//! These values travel as strings through the API and the database; the
//! enums here are the single place where the accepted spellings live.

use std::fmt;

use serde::{Deserialize, Serialize};

/// PacBio "Generate HiFi Reads" well option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerateHiFi {
    #[serde(rename = "In SMRT Link")]
    InSmrtLink,
    #[serde(rename = "On Instrument")]
    OnInstrument,
    #[serde(rename = "Do Not Generate")]
    DoNotGenerate,
}

impl GenerateHiFi {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerateHiFi::InSmrtLink => "In SMRT Link",
            GenerateHiFi::OnInstrument => "On Instrument",
            GenerateHiFi::DoNotGenerate => "Do Not Generate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In SMRT Link" => Some(GenerateHiFi::InSmrtLink),
            "On Instrument" => Some(GenerateHiFi::OnInstrument),
            "Do Not Generate" => Some(GenerateHiFi::DoNotGenerate),
            _ => None,
        }
    }
}

impl fmt::Display for GenerateHiFi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a CCS analysis output value.
///
/// The instrument accepts `"Yes"` or `"No"`; a blank value is stored
/// as `"No"`.
pub fn normalize_ccs_analysis_output(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some("Yes") => "Yes".to_string(),
        _ => "No".to_string(),
    }
}

/// Lifecycle state of a sequencing run (both pipelines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Pending,
    Started,
    Completed,
    Cancelled,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Pending => "pending",
            RunState::Started => "started",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(RunState::Pending),
            "started" => Some(RunState::Started),
            "completed" => Some(RunState::Completed),
            "cancelled" => Some(RunState::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
