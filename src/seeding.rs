//! Fixtures, `loaddata` and initial data producers.

pub use seedling_seeding::*;
