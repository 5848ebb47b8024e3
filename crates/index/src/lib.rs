//! Index construction: the field schema, the source-dataset model and the
//! builder that turns prioritised datasets into a committed document store.

pub mod builder;
pub mod schema;
pub mod source;

pub use builder::{build_name_complete, BuildError, BuildReport, IndexBuilder, SkippedRow};
pub use source::{PriorityConfig, SourceDataset, SourceRow};
