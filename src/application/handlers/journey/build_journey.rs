//! BuildJourneyHandler - Query handler for procedural journeys.

use std::sync::Arc;

use crate::domain::journey::{build_journey, JourneyLookup, ProceduresTable};

/// Query for the journey matching a (province, venue, issue) triple.
#[derive(Debug, Clone, Default)]
pub struct BuildJourneyQuery {
    pub province: String,
    pub venue: String,
    pub issue: String,
}

/// Handler for journey lookups. Infallible: the generic fallback always applies.
pub struct BuildJourneyHandler {
    procedures: Option<Arc<ProceduresTable>>,
}

impl BuildJourneyHandler {
    pub fn new(procedures: Option<Arc<ProceduresTable>>) -> Self {
        Self { procedures }
    }

    pub fn handle(&self, query: BuildJourneyQuery) -> JourneyLookup {
        let lookup = build_journey(
            self.procedures.as_deref(),
            &query.province,
            &query.venue,
            &query.issue,
        );
        tracing::debug!(
            province = %lookup.journey.province,
            venue = %lookup.journey.venue,
            issue = %lookup.journey.issue_code,
            source = ?lookup.source,
            steps = lookup.journey.steps.len(),
            "Journey built"
        );
        lookup
    }
}
