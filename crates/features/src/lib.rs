//! Pure text functions shared by the index builder and the resolver.
//!
//! - [`clean`]: the three-stage Unicode cleaner applied to every name
//!   before it is indexed or searched
//! - [`phonetic`]: the taxonomic sound-alike key
//! - [`distance`]: edit distance and the close-match predicate used for
//!   kingdom tie-breaks
//!
//! Everything here is deterministic and allocation-only; no I/O, no state.

pub mod clean;
pub mod distance;
pub mod phonetic;

pub use clean::CleanedName;
pub use distance::{edit_distance, is_close_match};
pub use phonetic::{phonetic_key, treat_word};
