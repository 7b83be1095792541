//! Journey domain module.
//!
//! Turns a (province, venue, issue) triple into ordered procedural steps.
//! Pure: the optional procedures table is loaded elsewhere and passed in.

mod rules;
mod types;

pub use rules::{build_journey, JourneyKey, ProceduresTable, STATIC_CONFIDENCE};
pub use types::{FormRef, JourneyLookup, JourneySource, JourneyStep, LegalJourney};
