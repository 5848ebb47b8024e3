//! Structured scientific names.
//!
//! Parsing never fails outright; it produces one of the [`ParsedName`]
//! variants. `Unparsable` still carries the raw input so callers can fall
//! back to verbatim lookups.

use crate::rank::RankType;
use serde::{Deserialize, Serialize};

/// A conventionally structured scientific name: monomial through trinomial,
/// with optional authorship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScientificName {
    pub genus_or_monomial: Option<String>,
    pub infrageneric: Option<String>,
    pub specific_epithet: Option<String>,
    pub infraspecific_epithet: Option<String>,
    pub rank: Option<RankType>,
    /// The rank marker as it should render, e.g. `subsp.`. Zoological
    /// trinomials carry a rank but no marker.
    pub rank_marker: Option<String>,
    pub authorship: Option<String>,
}

impl ScientificName {
    /// The name without authorship. Infraspecific names carry their rank
    /// marker, e.g. `Trachymene incisa subsp. incisa`.
    pub fn canonical_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if let Some(g) = &self.genus_or_monomial {
            parts.push(g);
        }
        if let Some(s) = &self.specific_epithet {
            parts.push(s);
        }
        if let Some(i) = &self.infraspecific_epithet {
            if let Some(marker) = &self.rank_marker {
                parts.push(marker);
            }
            parts.push(i);
        }
        parts.join(" ")
    }

    /// Canonical name followed by authorship where present.
    pub fn full_name(&self) -> String {
        let canonical = self.canonical_name();
        match &self.authorship {
            Some(a) if !canonical.is_empty() => format!("{canonical} {a}"),
            Some(a) => a.clone(),
            None => canonical,
        }
    }

    pub fn is_binomial(&self) -> bool {
        self.genus_or_monomial.is_some() && self.specific_epithet.is_some()
    }
}

/// A phrase name in the Australian herbarium convention:
/// `Genus sp. Place (Collector Voucher) Authority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseName {
    /// Leading monomial, e.g. `Goodenia`.
    pub genus: String,
    /// Epithet between genus and rank marker for infraspecific phrases,
    /// e.g. `brachystylis` in `Grevillea brachystylis subsp. Busselton`.
    pub specific_epithet: Option<String>,
    /// Rank implied by the marker: species, subspecies, variety or cultivar.
    pub rank: RankType,
    /// Location or description as written, e.g. `Bachsten Creek`.
    pub phrase: String,
    /// Parenthesised voucher as written, e.g. `(M.D. Barrett 685)`.
    pub voucher: Option<String>,
    /// Party nominating the phrase, e.g. `WA Herbarium`.
    pub nominating_party: Option<String>,
    /// Phrase reduced to its comparable form for index lookup.
    pub clean_phrase: String,
    /// Voucher reduced to collector surname plus identifier.
    pub clean_voucher: Option<String>,
}

impl PhraseName {
    /// The phrase name without the nominating party.
    pub fn canonical_name(&self) -> String {
        let mut out = self.genus.clone();
        if let Some(s) = &self.specific_epithet {
            out.push(' ');
            out.push_str(s);
        }
        if let Some(marker) = rank_marker(self.rank) {
            out.push(' ');
            out.push_str(marker);
        }
        out.push(' ');
        out.push_str(&self.phrase);
        if let Some(v) = &self.voucher {
            out.push(' ');
            out.push_str(v);
        }
        out
    }
}

/// The result of parsing one scientific name string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedName {
    /// A conventional name that parsed cleanly.
    WellFormed(ScientificName),
    /// A numbered placeholder such as `Diaporthe species 1`.
    Placeholder(ScientificName),
    /// A herbarium phrase name.
    Phrase(PhraseName),
    /// Input the grammars could not account for. The raw string is kept
    /// so callers can still attempt verbatim lookups.
    Unparsable { name: String },
}

impl ParsedName {
    /// The canonical rendition used for index lookup. `Unparsable` yields
    /// the raw input unchanged.
    pub fn canonical_name(&self) -> String {
        match self {
            ParsedName::WellFormed(n) | ParsedName::Placeholder(n) => n.canonical_name(),
            ParsedName::Phrase(p) => p.canonical_name(),
            ParsedName::Unparsable { name } => name.clone(),
        }
    }

    pub fn rank(&self) -> Option<RankType> {
        match self {
            ParsedName::WellFormed(n) | ParsedName::Placeholder(n) => n.rank,
            ParsedName::Phrase(p) => Some(p.rank),
            ParsedName::Unparsable { .. } => None,
        }
    }

    pub fn authorship(&self) -> Option<&str> {
        match self {
            ParsedName::WellFormed(n) | ParsedName::Placeholder(n) => n.authorship.as_deref(),
            _ => None,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        matches!(self, ParsedName::WellFormed(_))
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, ParsedName::Phrase(_))
    }
}

fn rank_marker(rank: RankType) -> Option<&'static str> {
    match rank {
        RankType::Subspecies => Some("subsp."),
        RankType::Variety => Some("var."),
        RankType::Form => Some("f."),
        RankType::Cultivar => Some("cv."),
        RankType::Species => Some("sp."),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_canonical_name() {
        let n = ScientificName {
            genus_or_monomial: Some("Ozothamnus".into()),
            specific_epithet: Some("diosmifolius".into()),
            rank: Some(RankType::Species),
            ..ScientificName::default()
        };
        assert_eq!(n.canonical_name(), "Ozothamnus diosmifolius");
        assert!(n.is_binomial());
    }

    #[test]
    fn trinomial_carries_rank_marker() {
        let n = ScientificName {
            genus_or_monomial: Some("Trachymene".into()),
            specific_epithet: Some("incisa".into()),
            infraspecific_epithet: Some("incisa".into()),
            rank: Some(RankType::Subspecies),
            rank_marker: Some("subsp.".into()),
            authorship: Some("Rudge".into()),
            ..ScientificName::default()
        };
        assert_eq!(n.canonical_name(), "Trachymene incisa subsp. incisa");
        assert_eq!(n.full_name(), "Trachymene incisa subsp. incisa Rudge");
    }

    #[test]
    fn phrase_canonical_name_includes_voucher() {
        let p = PhraseName {
            genus: "Goodenia".into(),
            specific_epithet: None,
            rank: RankType::Species,
            phrase: "Bachsten Creek".into(),
            voucher: Some("(M.D. Barrett 685)".into()),
            nominating_party: Some("WA Herbarium".into()),
            clean_phrase: "Bachsten Creek".into(),
            clean_voucher: Some("Barrett685".into()),
        };
        assert_eq!(
            p.canonical_name(),
            "Goodenia sp. Bachsten Creek (M.D. Barrett 685)"
        );
    }

    #[test]
    fn unparsable_preserves_input() {
        let p = ParsedName::Unparsable {
            name: "?!@ unknown".into(),
        };
        assert_eq!(p.canonical_name(), "?!@ unknown");
        assert_eq!(p.rank(), None);
    }
}
