//! Field vocabulary of the taxon index.
//!
//! Every document carries the searchable fields below plus [`RECORD`], the
//! stored JSON of the full [`taxamatch_model::IndexRecord`]. Search code
//! addresses fields through these constants only.

/// Numeric record identifier.
pub const ID: &str = "id";
/// Stable identifier from the source dataset.
pub const LSID: &str = "lsid";
/// Accepted-concept identifier, synonyms only.
pub const ACCEPTED_LSID: &str = "accepted_lsid";
/// The supplied name and, when different, the complete name. Repeated.
pub const NAME: &str = "name";
/// Alternate spellings: cleaned forms, canonical form, synonym strings.
pub const OTHER_NAMES: &str = "other_names";
/// Phonetic key of the cleaned canonical name.
pub const PHONETIC: &str = "phonetic";
/// Treated key of the genus or monomial component.
pub const PHONETIC_GENUS: &str = "phonetic_genus";
/// Treated key of the specific epithet, with gendered endings folded.
pub const PHONETIC_EPITHET: &str = "phonetic_epithet";

pub const KINGDOM: &str = "kingdom";
pub const PHYLUM: &str = "phylum";
pub const CLASS: &str = "class";
pub const ORDER: &str = "order";
pub const FAMILY: &str = "family";
pub const GENUS: &str = "genus";
pub const SPECIES: &str = "species";

pub const RANK: &str = "rank";
pub const RANK_ID: &str = "rank_id";
pub const AUTHOR: &str = "author";
/// Clean phrase component, phrase taxa only.
pub const PHRASE: &str = "phrase";
/// Clean voucher component, phrase taxa only.
pub const VOUCHER: &str = "voucher";
pub const DATASET_ID: &str = "dataset_id";
pub const STATUS: &str = "status";
/// `"true"` when the name is a cross-kingdom homonym.
pub const HOMONYM: &str = "homonym";
pub const PRIORITY: &str = "priority";
/// Nested-set bounds, accepted taxa only.
pub const LEFT: &str = "left";
pub const RIGHT: &str = "right";
/// Vernacular names. Repeated.
pub const COMMON_NAME: &str = "common_name";
/// Stored JSON of the full index record.
pub const RECORD: &str = "record";
