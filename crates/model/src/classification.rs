//! The named-rank tuple carried by index records and match requests.

use crate::rank::RankType;
use serde::{Deserialize, Serialize};

/// Values for the principal Linnaean ranks plus authorship. Every field is
/// optional; a query classification usually carries only one or two hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
    pub subspecies: Option<String>,
    /// The full scientific name when the caller supplies one alongside the
    /// rank fields.
    pub scientific_name: Option<String>,
    pub authorship: Option<String>,
}

impl Classification {
    /// A classification with just a kingdom hint, the most common query shape.
    pub fn with_kingdom(kingdom: impl Into<String>) -> Self {
        Classification {
            kingdom: Some(kingdom.into()),
            ..Classification::default()
        }
    }

    /// True if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.kingdom.is_none()
            && self.phylum.is_none()
            && self.class.is_none()
            && self.order.is_none()
            && self.family.is_none()
            && self.genus.is_none()
            && self.species.is_none()
            && self.subspecies.is_none()
            && self.scientific_name.is_none()
            && self.authorship.is_none()
    }

    /// Value for a Linnaean rank, if populated.
    pub fn value_for(&self, rank: RankType) -> Option<&str> {
        let slot = match rank {
            RankType::Kingdom => &self.kingdom,
            RankType::Phylum => &self.phylum,
            RankType::Class => &self.class,
            RankType::Order => &self.order,
            RankType::Family => &self.family,
            RankType::Genus => &self.genus,
            RankType::Species => &self.species,
            RankType::Subspecies => &self.subspecies,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Compares the populated fields of `self` against `other`, ignoring
    /// case. Fields that are `None` on either side do not count against the
    /// match; authorship is excluded. Used when deciding whether a homonym
    /// candidate is consistent with the caller's hints.
    pub fn matches_non_null(&self, other: &Classification) -> bool {
        fn agrees(a: &Option<String>, b: &Option<String>) -> bool {
            match (a, b) {
                (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
                _ => true,
            }
        }
        agrees(&self.kingdom, &other.kingdom)
            && agrees(&self.phylum, &other.phylum)
            && agrees(&self.class, &other.class)
            && agrees(&self.order, &other.order)
            && agrees(&self.family, &other.family)
            && agrees(&self.genus, &other.genus)
            && agrees(&self.species, &other.species)
            && agrees(&self.subspecies, &other.subspecies)
    }

    /// The lowest populated rank and its value, searching upward from
    /// subspecies.
    pub fn lowest_populated(&self) -> Option<(RankType, &str)> {
        const DESCENDING: [RankType; 8] = [
            RankType::Subspecies,
            RankType::Species,
            RankType::Genus,
            RankType::Family,
            RankType::Order,
            RankType::Class,
            RankType::Phylum,
            RankType::Kingdom,
        ];
        DESCENDING
            .iter()
            .find_map(|r| self.value_for(*r).map(|v| (*r, v)))
    }
}
