//! Human-readable summaries of resolution outcomes.
//!
//! The resolver reports structured results; this crate turns them into
//! the one-line and multi-line strings the CLI and log output use.

use serde::Serialize;

use taxamatch_model::{MatchResult, MatchType, NameQuality};
use taxamatch_search::MatchError;

/// A flattened, serialisable view of one resolution outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub supplied_name: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_complete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_lsid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kingdom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_name: Option<String>,
    pub quality: Vec<&'static str>,
}

impl Explanation {
    pub fn from_result(supplied_name: &str, result: &MatchResult) -> Explanation {
        let record = result.record.as_ref();
        Explanation {
            supplied_name: supplied_name.to_string(),
            matched: !result.is_empty(),
            match_type: result.match_type.map(|t| t.label()),
            name: record.map(|r| r.name.clone()),
            name_complete: record.map(|r| r.name_complete.clone()),
            lsid: record.map(|r| r.lsid.clone()),
            accepted_lsid: record.and_then(|r| r.accepted_lsid.clone()),
            rank: record.map(|r| r.rank.name()),
            kingdom: record.and_then(|r| r.classification.kingdom.clone()),
            cleaned_name: result.cleaned_name.clone(),
            quality: result.quality.iter().map(NameQuality::label).collect(),
        }
    }

    /// One line per outcome, suitable for a terminal or a log.
    pub fn summary(&self) -> String {
        let mut line = if self.matched {
            let name = self.name_complete.as_deref().unwrap_or("?");
            let lsid = self.lsid.as_deref().unwrap_or("?");
            let how = self.match_type.unwrap_or("?");
            format!("{:?} -> {name} [{lsid}] via {how}", self.supplied_name)
        } else {
            let mut s = format!("{:?} -> no match", self.supplied_name);
            if let Some(how) = self.match_type {
                s.push_str(&format!(" ({how})"));
            }
            s
        };
        if !self.quality.is_empty() {
            line.push_str(&format!(" ({})", self.quality.join(", ")));
        }
        line
    }
}

/// Why a match arrived the way it did, spelled out for a reader who does
/// not know the cascade.
pub fn describe_match_type(match_type: MatchType) -> &'static str {
    match match_type {
        MatchType::Exact => "the supplied string matched a stored name verbatim",
        MatchType::Canonical => "the name matched after stripping authorship and markers",
        MatchType::Phrase => "the phrase and voucher components matched a phrase name",
        MatchType::Phonetic => "the phonetic key matched; the spelling differs",
        MatchType::Vernacular => "a vernacular name matched",
        MatchType::HigherClassification => {
            "the name itself failed but a higher level of the classification matched"
        }
        MatchType::TaxonId => "looked up directly by taxon identifier",
    }
}

pub fn describe_quality(flag: NameQuality) -> &'static str {
    match flag {
        NameQuality::SpeciesPlural => "the query names multiple species (spp.)",
        NameQuality::IndeterminateSpecies => "the species is indeterminate (sp.)",
        NameQuality::QuestionSpecies => "the determination is marked uncertain (?)",
        NameQuality::AffinitySpecies => "the specimen has affinity with this taxon (aff.)",
        NameQuality::ConferSpecies => "the specimen should be compared with this taxon (cf.)",
        NameQuality::Homonym => "the name is used in more than one kingdom",
        NameQuality::Excluded => "the matched concept is excluded from the checklist",
        NameQuality::ParentChildSynonym => "the name is both a taxon and a synonym of its parent",
        NameQuality::Misapplied => "the name has been misapplied in some treatments",
    }
}

pub fn describe_error(error: &MatchError) -> String {
    match error {
        MatchError::Homonym { name, candidates } => {
            let kingdoms: Vec<&str> = candidates
                .iter()
                .filter_map(|c| c.classification.kingdom.as_deref())
                .collect();
            format!(
                "{name:?} is a homonym across {} and needs a kingdom hint",
                kingdoms.join(", ")
            )
        }
        MatchError::Store(e) => format!("index unavailable: {e}"),
        MatchError::Search(e) => format!("search failed: {e}"),
    }
}
