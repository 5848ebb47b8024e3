//! Resolution outcomes.

use crate::record::IndexRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a match was obtained, ordered from most to least reliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// The supplied string matched a stored name verbatim.
    Exact,
    /// The canonical form produced by the parser matched.
    Canonical,
    /// Matched through phrase-name components.
    Phrase,
    /// Matched through phonetic keys.
    Phonetic,
    /// Matched through a vernacular name.
    Vernacular,
    /// The name itself failed but a higher level of the supplied
    /// classification matched.
    HigherClassification,
    /// Looked up directly by taxon identifier.
    TaxonId,
}

impl MatchType {
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Exact => "exactMatch",
            MatchType::Canonical => "canonicalMatch",
            MatchType::Phrase => "phraseMatch",
            MatchType::Phonetic => "phoneticMatch",
            MatchType::Vernacular => "vernacularMatch",
            MatchType::HigherClassification => "higherMatch",
            MatchType::TaxonId => "taxonIdMatch",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caveats noticed while interpreting the supplied name. These never stop a
/// match; they qualify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameQuality {
    /// `spp.` marker: the query covers multiple species.
    SpeciesPlural,
    /// `sp.` with no epithet; identification is indeterminate.
    IndeterminateSpecies,
    /// A `?` in the name puts the determination in doubt.
    QuestionSpecies,
    /// `aff.` marker: affinity with, but not identical to, the named taxon.
    AffinitySpecies,
    /// `cf.` marker: compare with the named taxon.
    ConferSpecies,
    /// The matched record is flagged as a cross-kingdom homonym.
    Homonym,
    /// The match landed on an excluded concept.
    Excluded,
    /// The matched synonym points at its own parent taxon.
    ParentChildSynonym,
    /// The matched name is recorded as misapplied.
    Misapplied,
}

impl NameQuality {
    pub fn label(&self) -> &'static str {
        match self {
            NameQuality::SpeciesPlural => "speciesPlural",
            NameQuality::IndeterminateSpecies => "indeterminateSpecies",
            NameQuality::QuestionSpecies => "questionSpecies",
            NameQuality::AffinitySpecies => "affinitySpecies",
            NameQuality::ConferSpecies => "conferSpecies",
            NameQuality::Homonym => "homonym",
            NameQuality::Excluded => "excludedSpecies",
            NameQuality::ParentChildSynonym => "parentChildSynonym",
            NameQuality::Misapplied => "misappliedName",
        }
    }
}

/// The outcome of one resolution attempt. An empty result is a valid
/// outcome; errors are reserved for conditions the caller must arbitrate,
/// such as unresolvable homonyms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub record: Option<IndexRecord>,
    pub match_type: Option<MatchType>,
    /// The cleaned form of the query that produced the hit.
    pub cleaned_name: Option<String>,
    pub quality: Vec<NameQuality>,
}

impl MatchResult {
    pub fn empty() -> MatchResult {
        MatchResult {
            record: None,
            match_type: None,
            cleaned_name: None,
            quality: Vec::new(),
        }
    }

    pub fn hit(record: IndexRecord, match_type: MatchType, cleaned_name: String) -> MatchResult {
        MatchResult {
            record: Some(record),
            match_type: Some(match_type),
            cleaned_name: Some(cleaned_name),
            quality: Vec::new(),
        }
    }

    pub fn with_quality(mut self, flag: NameQuality) -> MatchResult {
        if !self.quality.contains(&flag) {
            self.quality.push(flag);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_flags_do_not_duplicate() {
        let r = MatchResult::empty()
            .with_quality(NameQuality::Homonym)
            .with_quality(NameQuality::Homonym);
        assert_eq!(r.quality.len(), 1);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(MatchType::Phonetic.label(), "phoneticMatch");
        assert_eq!(NameQuality::ConferSpecies.label(), "conferSpecies");
    }
}
