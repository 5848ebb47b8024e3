//! Taxonomic rank vocabulary.
//!
//! Ranks carry a numeric identifier that increases from kingdom down to
//! cultivar. The ordering is load bearing: "at or below" comparisons during
//! search and higher-taxon fallback both rely on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A level in the Linnaean hierarchy, including the intermediate ranks
/// used by checklist publishers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankType {
    Unranked,
    Kingdom,
    Subkingdom,
    Superphylum,
    Phylum,
    Subphylum,
    Superclass,
    Class,
    Subclass,
    Superorder,
    Order,
    Suborder,
    Infraorder,
    Superfamily,
    Family,
    Subfamily,
    Tribe,
    Subtribe,
    Genus,
    Subgenus,
    Section,
    Series,
    SpeciesGroup,
    Species,
    Subspecies,
    Variety,
    Form,
    Cultivar,
}

/// Every rank, in ascending identifier order.
pub const ALL_RANKS: &[RankType] = &[
    RankType::Unranked,
    RankType::Kingdom,
    RankType::Subkingdom,
    RankType::Superphylum,
    RankType::Phylum,
    RankType::Subphylum,
    RankType::Superclass,
    RankType::Class,
    RankType::Subclass,
    RankType::Superorder,
    RankType::Order,
    RankType::Suborder,
    RankType::Infraorder,
    RankType::Superfamily,
    RankType::Family,
    RankType::Subfamily,
    RankType::Tribe,
    RankType::Subtribe,
    RankType::Genus,
    RankType::Subgenus,
    RankType::Section,
    RankType::Series,
    RankType::SpeciesGroup,
    RankType::Species,
    RankType::Subspecies,
    RankType::Variety,
    RankType::Form,
    RankType::Cultivar,
];

impl RankType {
    /// Stable numeric identifier. Larger means lower in the hierarchy,
    /// except `Unranked` which sorts before everything.
    pub fn id(&self) -> i32 {
        match self {
            RankType::Unranked => 0,
            RankType::Kingdom => 1000,
            RankType::Subkingdom => 1200,
            RankType::Superphylum => 1800,
            RankType::Phylum => 2000,
            RankType::Subphylum => 2200,
            RankType::Superclass => 2800,
            RankType::Class => 3000,
            RankType::Subclass => 3200,
            RankType::Superorder => 3800,
            RankType::Order => 4000,
            RankType::Suborder => 4200,
            RankType::Infraorder => 4350,
            RankType::Superfamily => 4500,
            RankType::Family => 5000,
            RankType::Subfamily => 5500,
            RankType::Tribe => 5600,
            RankType::Subtribe => 5700,
            RankType::Genus => 6000,
            RankType::Subgenus => 6500,
            RankType::Section => 6600,
            RankType::Series => 6800,
            RankType::SpeciesGroup => 6950,
            RankType::Species => 7000,
            RankType::Subspecies => 8000,
            RankType::Variety => 8010,
            RankType::Form => 8020,
            RankType::Cultivar => 8050,
        }
    }

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            RankType::Unranked => "unranked",
            RankType::Kingdom => "kingdom",
            RankType::Subkingdom => "subkingdom",
            RankType::Superphylum => "superphylum",
            RankType::Phylum => "phylum",
            RankType::Subphylum => "subphylum",
            RankType::Superclass => "superclass",
            RankType::Class => "class",
            RankType::Subclass => "subclass",
            RankType::Superorder => "superorder",
            RankType::Order => "order",
            RankType::Suborder => "suborder",
            RankType::Infraorder => "infraorder",
            RankType::Superfamily => "superfamily",
            RankType::Family => "family",
            RankType::Subfamily => "subfamily",
            RankType::Tribe => "tribe",
            RankType::Subtribe => "subtribe",
            RankType::Genus => "genus",
            RankType::Subgenus => "subgenus",
            RankType::Section => "section",
            RankType::Series => "series",
            RankType::SpeciesGroup => "species group",
            RankType::Species => "species",
            RankType::Subspecies => "subspecies",
            RankType::Variety => "variety",
            RankType::Form => "form",
            RankType::Cultivar => "cultivar",
        }
    }

    /// Looks a rank up by its numeric identifier.
    pub fn from_id(id: i32) -> Option<RankType> {
        ALL_RANKS.iter().copied().find(|r| r.id() == id)
    }

    /// Looks a rank up by name or common abbreviation, ignoring case.
    /// Returns `None` for unknown vocabulary rather than guessing.
    pub fn from_name(name: &str) -> Option<RankType> {
        let key = name.trim().trim_end_matches('.').to_lowercase();
        let rank = match key.as_str() {
            "unranked" => RankType::Unranked,
            "kingdom" | "regnum" => RankType::Kingdom,
            "subkingdom" => RankType::Subkingdom,
            "superphylum" => RankType::Superphylum,
            "phylum" | "division" | "division botany" => RankType::Phylum,
            "subphylum" => RankType::Subphylum,
            "superclass" => RankType::Superclass,
            "class" | "classis" => RankType::Class,
            "subclass" => RankType::Subclass,
            "superorder" => RankType::Superorder,
            "order" | "ordo" => RankType::Order,
            "suborder" => RankType::Suborder,
            "infraorder" => RankType::Infraorder,
            "superfamily" => RankType::Superfamily,
            "family" | "familia" => RankType::Family,
            "subfamily" => RankType::Subfamily,
            "tribe" => RankType::Tribe,
            "subtribe" => RankType::Subtribe,
            "genus" => RankType::Genus,
            "subgenus" | "subg" => RankType::Subgenus,
            "section" | "sect" => RankType::Section,
            "series" | "ser" => RankType::Series,
            "species group" => RankType::SpeciesGroup,
            "species" | "sp" => RankType::Species,
            "subspecies" | "subsp" | "ssp" => RankType::Subspecies,
            "variety" | "var" => RankType::Variety,
            "form" | "forma" | "f" => RankType::Form,
            "cultivar" | "cv" => RankType::Cultivar,
            _ => return None,
        };
        Some(rank)
    }

    /// All ranks whose identifier is at or below (>=) this rank's.
    pub fn ranks_at_or_below(&self) -> Vec<RankType> {
        let floor = self.id();
        ALL_RANKS
            .iter()
            .copied()
            .filter(|r| r.id() >= floor && *r != RankType::Unranked)
            .collect()
    }

    /// True for the seven principal Linnaean ranks.
    pub fn is_linnaean(&self) -> bool {
        matches!(
            self,
            RankType::Kingdom
                | RankType::Phylum
                | RankType::Class
                | RankType::Order
                | RankType::Family
                | RankType::Genus
                | RankType::Species
        )
    }

    /// True for ranks below species level.
    pub fn is_infraspecific(&self) -> bool {
        self.id() > RankType::Species.id()
    }
}

impl fmt::Display for RankType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase_in_declaration_order() {
        for pair in ALL_RANKS.windows(2) {
            assert!(pair[0].id() < pair[1].id(), "{:?} vs {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn derived_ordering_matches_id_ordering() {
        assert!(RankType::Kingdom < RankType::Species);
        assert!(RankType::Species < RankType::Subspecies);
        assert!(RankType::Genus < RankType::Subgenus);
    }

    #[test]
    fn from_name_handles_aliases_and_case() {
        assert_eq!(RankType::from_name("subsp."), Some(RankType::Subspecies));
        assert_eq!(RankType::from_name("SSP"), Some(RankType::Subspecies));
        assert_eq!(RankType::from_name("var."), Some(RankType::Variety));
        assert_eq!(RankType::from_name("Division Botany"), Some(RankType::Phylum));
        assert_eq!(RankType::from_name("cv."), Some(RankType::Cultivar));
        assert_eq!(RankType::from_name("nonsense"), None);
    }

    #[test]
    fn from_id_round_trips() {
        for rank in ALL_RANKS {
            assert_eq!(RankType::from_id(rank.id()), Some(*rank));
        }
        assert_eq!(RankType::from_id(1234), None);
    }

    #[test]
    fn ranks_at_or_below_species_are_all_infraspecific_or_species() {
        let below = RankType::Species.ranks_at_or_below();
        assert!(below.contains(&RankType::Species));
        assert!(below.contains(&RankType::Variety));
        assert!(!below.contains(&RankType::Genus));
        assert!(!below.contains(&RankType::Unranked));
    }
}
