//! Procedures JSON loader.
//!
//! The file is read once at start-up. A missing or malformed file only costs
//! the data-driven journeys; the compiled rules still answer.

use std::path::Path;

use crate::domain::journey::ProceduresTable;

/// Parses a procedures document (`province -> venue -> issue -> journey`).
pub fn parse_procedures(json: &str) -> Result<ProceduresTable, serde_json::Error> {
    serde_json::from_str(json)
}

/// Loads the procedures table, logging and discarding any failure.
pub fn load_procedures(path: &Path) -> Option<ProceduresTable> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "procedures file unavailable, using built-in rules");
            return None;
        }
    };

    match parse_procedures(&json) {
        Ok(table) => {
            let journeys: usize = table
                .values()
                .flat_map(|venues| venues.values())
                .map(|issues| issues.len())
                .sum();
            tracing::info!(path = %path.display(), journeys, "procedures file loaded");
            Some(table)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "procedures file invalid, using built-in rules");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journey::{build_journey, JourneySource};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "ON": { "LTB": { "tenant_repairs": {
            "province": "ON", "venue": "LTB", "issueCode": "tenant_repairs",
            "confidence": 0.7,
            "steps": [{ "title": "From file", "summary": "s", "actions": [], "forms": [] }]
        } } }
    }"#;

    #[test]
    fn parsed_table_feeds_journey_lookup() {
        let table = parse_procedures(SAMPLE).unwrap();
        let lookup = build_journey(Some(&table), "on", "ltb", "tenant_repairs");

        assert_eq!(lookup.source, JourneySource::DataFile);
        assert_eq!(lookup.journey.steps[0].title, "From file");
        assert_eq!(lookup.journey.confidence, 0.7);
    }

    #[test]
    fn bundled_ontario_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/procedures.on.json");
        let table = load_procedures(&path).unwrap();

        assert!(table["ON"]["LTB"].contains_key("tenant_repairs"));
        assert!(table["ON"]["HRTO"].contains_key("discrimination"));
    }

    #[test]
    fn missing_file_is_ignored() {
        assert!(load_procedures(Path::new("/nonexistent/procedures.json")).is_none());
    }

    #[test]
    fn invalid_file_is_ignored() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(load_procedures(file.path()).is_none());
    }
}
