//! Core domain model for taxamatch name resolution.
//!
//! Provides the types shared by every other crate in the workspace:
//! - [`RankType`]: the ordered taxonomic rank vocabulary
//! - [`Classification`]: the named-rank tuple attached to a record or query
//! - [`ParsedName`]: the tagged outcome of parsing a scientific name
//! - [`IndexRecord`]: one taxon concept persisted in the reference index
//! - [`MatchResult`]: the outcome of a resolution attempt

mod classification;
mod name;
mod rank;
mod record;
mod result;

pub use classification::Classification;
pub use name::{ParsedName, PhraseName, ScientificName};
pub use rank::RankType;
pub use record::{IndexRecord, TaxonomicStatus};
pub use result::{MatchResult, MatchType, NameQuality};
