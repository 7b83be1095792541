//! Deterministic journey rules.
//!
//! Lookup order: procedures data file, then the compiled rule table, then a
//! one-step generic journey. A journey is therefore never empty.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{FormRef, JourneyLookup, JourneySource, JourneyStep, LegalJourney};

/// Confidence attached to journeys built from compiled rules.
pub const STATIC_CONFIDENCE: f64 = 0.65;

const LTB_FORMS_URL: &str = "https://tribunalsontario.ca/ltb/forms/";
const HRTO_FORMS_URL: &str = "https://tribunalsontario.ca/hrto/forms-and-filing/#otherforms";

/// Data-driven procedures: province -> venue -> issue -> journey.
pub type ProceduresTable = HashMap<String, HashMap<String, HashMap<String, LegalJourney>>>;

struct StaticRule {
    province: &'static str,
    venue: &'static str,
    issues: &'static [&'static str],
    steps: Vec<JourneyStep>,
}

fn step(
    title: &str,
    summary: &str,
    actions: &[&str],
    forms: Vec<FormRef>,
    who: &str,
    venue: &str,
    deadline_tip: &str,
) -> JourneyStep {
    JourneyStep {
        title: title.to_string(),
        summary: summary.to_string(),
        actions: actions.iter().map(|a| a.to_string()).collect(),
        forms,
        prereqs: Vec::new(),
        who: who.to_string(),
        venue: venue.to_string(),
        deadline_tip: deadline_tip.to_string(),
    }
}

fn form(id: &str, name: &str, url: &str) -> FormRef {
    FormRef {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        fee: None,
    }
}

static STATIC_RULES: Lazy<Vec<StaticRule>> = Lazy::new(|| {
    vec![
        StaticRule {
            province: "ON",
            venue: "LTB",
            issues: &["tenant_repairs", "harassment"],
            steps: vec![
                step(
                    "Document issues and notify the landlord",
                    "Collect proof and give written notice with a reasonable time to fix.",
                    &[
                        "Collect photos/videos, maintenance requests, and responses.",
                        "Send/keep a dated written notice to the landlord.",
                    ],
                    Vec::new(),
                    "Tenant",
                    "LTB",
                    "ASAP: you'll need proof you asked for repairs before filing.",
                ),
                step(
                    "File the LTB application",
                    "Start an application for tenant rights/maintenance (commonly T2/T6).",
                    &[
                        "Complete LTB forms (T2: Tenant Rights; T6: Maintenance).",
                        "Attach evidence and your detailed timeline.",
                    ],
                    vec![
                        form(
                            "ON-LTB-T2",
                            "LTB T2 - Application about Tenant Rights",
                            LTB_FORMS_URL,
                        ),
                        form(
                            "ON-LTB-T6",
                            "LTB T6 - Tenant Application about Maintenance",
                            LTB_FORMS_URL,
                        ),
                    ],
                    "Tenant",
                    "LTB",
                    "Some remedies are time-sensitive. File promptly.",
                ),
                step(
                    "Serve and prepare for the hearing",
                    "Proper service and a clean evidence package matter.",
                    &[
                        "Serve as required; keep proof of service.",
                        "Organize exhibits, paginate, and prepare a short fact summary.",
                    ],
                    Vec::new(),
                    "Tenant",
                    "LTB",
                    "Follow service rules exactly.",
                ),
            ],
        },
        StaticRule {
            province: "ON",
            venue: "HRTO",
            issues: &["discrimination"],
            steps: vec![
                step(
                    "Write down what happened and when",
                    "Map events, protected grounds, and adverse impacts.",
                    &[
                        "List dates, people involved, and witnesses.",
                        "Identify protected grounds (e.g., disability, family status).",
                    ],
                    Vec::new(),
                    "Applicant",
                    "HRTO",
                    "HRTO has limitation periods. Do not wait.",
                ),
                step(
                    "Start your HRTO application",
                    "File Form 1 and Schedule A with facts and remedies sought.",
                    &[
                        "Complete the core application and attach Schedule A.",
                        "Describe remedies (monetary and non-monetary).",
                    ],
                    vec![form("ON-HRTO-F1", "HRTO - Form 1 (Application)", HRTO_FORMS_URL)],
                    "Applicant",
                    "HRTO",
                    "File before the deadline; extensions are discretionary.",
                ),
            ],
        },
    ]
});

static GENERIC_STEPS: Lazy<Vec<JourneyStep>> = Lazy::new(|| {
    vec![step(
        "Clarify the legal issue and venue",
        "We couldn't match a province/venue rule. Lock this down to proceed.",
        &[
            "Confirm your province and tribunal/court.",
            "List the outcome you want (repairs, compensation, order to stop, etc.).",
        ],
        Vec::new(),
        "Applicant",
        "Unknown",
        "Some remedies are time-limited.",
    )]
});

/// Normalized lookup keys: province and venue upper-cased, all three trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyKey {
    pub province: String,
    pub venue: String,
    pub issue: String,
}

impl JourneyKey {
    pub fn normalize(province: &str, venue: &str, issue: &str) -> Self {
        Self {
            province: province.trim().to_uppercase(),
            venue: venue.trim().to_uppercase(),
            issue: issue.trim().to_string(),
        }
    }
}

/// Builds the journey for a key. Never fails and never returns zero steps.
pub fn build_journey(
    procedures: Option<&ProceduresTable>,
    province: &str,
    venue: &str,
    issue: &str,
) -> JourneyLookup {
    let key = JourneyKey::normalize(province, venue, issue);

    if let Some(journey) = procedures.and_then(|table| find_in_procedures(table, &key)) {
        return JourneyLookup {
            source: JourneySource::DataFile,
            journey,
        };
    }

    let steps = STATIC_RULES
        .iter()
        .find(|rule| {
            rule.province == key.province
                && rule.venue == key.venue
                && rule.issues.contains(&key.issue.as_str())
        })
        .map(|rule| rule.steps.clone())
        .unwrap_or_else(|| GENERIC_STEPS.clone());

    JourneyLookup {
        source: JourneySource::StaticTable,
        journey: LegalJourney {
            province: key.province,
            venue: key.venue,
            issue_code: key.issue,
            confidence: STATIC_CONFIDENCE,
            steps,
        },
    }
}

fn find_in_procedures(table: &ProceduresTable, key: &JourneyKey) -> Option<LegalJourney> {
    table
        .get(&key.province)?
        .get(&key.venue)?
        .get(&key.issue)
        .filter(|journey| !journey.steps.is_empty())
        .cloned()
}
