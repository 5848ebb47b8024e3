//! Persisted taxon concepts.

use crate::classification::Classification;
use crate::rank::RankType;
use serde::{Deserialize, Serialize};

/// How a name relates to the accepted taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomicStatus {
    Accepted,
    Synonym,
    /// A name applied to the wrong taxon in some treatments.
    Misapplied,
    /// Deliberately excluded from the national checklist.
    Excluded,
}

impl TaxonomicStatus {
    pub fn from_term(term: &str) -> TaxonomicStatus {
        let t = term.trim().to_lowercase();
        if t.contains("misapplied") {
            TaxonomicStatus::Misapplied
        } else if t.contains("excluded") {
            TaxonomicStatus::Excluded
        } else if t.contains("synonym") {
            TaxonomicStatus::Synonym
        } else {
            TaxonomicStatus::Accepted
        }
    }

    pub fn is_synonym(&self) -> bool {
        matches!(self, TaxonomicStatus::Synonym | TaxonomicStatus::Misapplied)
    }
}

/// One taxon concept as stored in the reference index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Identifier assigned at build time, unique within one index.
    pub id: u64,
    /// Stable identifier from the source dataset.
    pub lsid: String,
    /// Identifier of the accepted concept when this record is a synonym.
    pub accepted_lsid: Option<String>,
    /// The name as supplied, without authorship.
    pub name: String,
    /// Name merged with authorship for display.
    pub name_complete: String,
    pub authorship: Option<String>,
    pub rank: RankType,
    pub status: TaxonomicStatus,
    pub classification: Classification,
    /// Other spellings and synonym strings that should resolve here.
    pub other_names: Vec<String>,
    /// Phrase-name components, populated only for phrase taxa.
    pub phrase: Option<String>,
    pub voucher: Option<String>,
    /// Source dataset identifier, used for priority tie-breaks.
    pub dataset_id: String,
    pub priority: i32,
    /// Nested-set bounds. Synonyms carry none.
    pub left: Option<u64>,
    pub right: Option<u64>,
    /// Set when another record shares this name in a different kingdom.
    pub homonym: bool,
}

impl IndexRecord {
    pub fn is_synonym(&self) -> bool {
        self.status.is_synonym()
    }

    /// True if `other` lies inside this record's nested-set interval,
    /// i.e. this record is an ancestor of `other`.
    pub fn contains(&self, other: &IndexRecord) -> bool {
        match (self.left, self.right, other.left, other.right) {
            (Some(l), Some(r), Some(ol), Some(or)) => l < ol && or < r,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_source_terms() {
        assert_eq!(TaxonomicStatus::from_term("accepted"), TaxonomicStatus::Accepted);
        assert_eq!(TaxonomicStatus::from_term("heterotypicSynonym"), TaxonomicStatus::Synonym);
        assert_eq!(TaxonomicStatus::from_term("misapplied"), TaxonomicStatus::Misapplied);
        assert_eq!(TaxonomicStatus::from_term("excluded"), TaxonomicStatus::Excluded);
    }

    #[test]
    fn containment_requires_nested_bounds() {
        let mut parent = record("Plantae");
        let mut child = record("Acacia");
        assert!(!parent.contains(&child));
        parent.left = Some(1);
        parent.right = Some(10);
        child.left = Some(4);
        child.right = Some(5);
        assert!(parent.contains(&child));
        assert!(!child.contains(&parent));
    }

    fn record(name: &str) -> IndexRecord {
        IndexRecord {
            id: 0,
            lsid: format!("urn:lsid:test:{name}"),
            accepted_lsid: None,
            name: name.to_string(),
            name_complete: name.to_string(),
            authorship: None,
            rank: RankType::Unranked,
            status: TaxonomicStatus::Accepted,
            classification: Classification::default(),
            other_names: Vec::new(),
            phrase: None,
            voucher: None,
            dataset_id: "dr0".into(),
            priority: 0,
            left: None,
            right: None,
            homonym: false,
        }
    }
}
