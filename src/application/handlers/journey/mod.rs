//! Journey handlers.

mod build_journey;

pub use build_journey::{BuildJourneyHandler, BuildJourneyQuery};
