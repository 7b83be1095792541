//! Journey value types.
//!
//! Field names serialize in camelCase to match what the web client renders.

use serde::{Deserialize, Serialize};

/// Link to an official form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRef {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
}

/// One procedural step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStep {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub forms: Vec<FormRef>,
    #[serde(default)]
    pub prereqs: Vec<String>,
    #[serde(default)]
    pub who: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub deadline_tip: String,
}

/// Ordered steps for one (province, venue, issue).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalJourney {
    pub province: String,
    pub venue: String,
    pub issue_code: String,
    pub confidence: f64,
    #[serde(default)]
    pub steps: Vec<JourneyStep>,
}

/// Where a journey came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneySource {
    /// The procedures data file loaded at start-up.
    DataFile,
    /// Rules compiled into the service, including the generic fallback.
    StaticTable,
}

/// Tagged result of a journey lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyLookup {
    pub source: JourneySource,
    pub journey: LegalJourney,
}
