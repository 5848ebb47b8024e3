//! Scientific-name parsing.
//!
//! [`NameParser::parse`] is total: it never errors and never panics,
//! degrading to [`ParsedName::Unparsable`] when no grammar accounts for
//! the input. The attempt order is:
//!
//! 1. the standard grammar; a well-formed result returns immediately
//! 2. the numbered-placeholder pattern (`Diaporthe species 1`)
//! 3. for phrase-eligible rank markers: the spurious-`sp.` repair, then
//!    the phrase grammar
//! 4. the wrongly-cased-subgenus repair, reparsed once
//! 5. fall back to `Unparsable` carrying the whitespace-collapsed input

mod grammar;
mod phrase;

pub use phrase::{clean_phrase, clean_voucher};

use taxamatch_model::ParsedName;

#[derive(Debug, Default, Clone)]
pub struct NameParser;

impl NameParser {
    pub fn new() -> NameParser {
        NameParser
    }

    pub fn parse(&self, raw: &str) -> ParsedName {
        let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return ParsedName::Unparsable { name };
        }

        let first = grammar::parse_standard(&name);
        if first.well_formed {
            return ParsedName::WellFormed(first.name);
        }

        if let Some(placeholder) = phrase::parse_placeholder(&name) {
            return ParsedName::Placeholder(placeholder);
        }

        if first.phrase_rank.is_some() {
            if let Some(repaired) = phrase::repair_species(&name) {
                let second = grammar::parse_standard(&repaired);
                if second.well_formed {
                    return ParsedName::WellFormed(second.name);
                }
            }
            if let Some(phrase_name) = phrase::parse_phrase(&name) {
                return ParsedName::Phrase(phrase_name);
            }
        } else if first.wrong_case_infrageneric {
            if let Some(fixed) = phrase::fix_infrageneric_case(&name) {
                let second = grammar::parse_standard(&fixed);
                if second.well_formed {
                    return ParsedName::WellFormed(second.name);
                }
            }
        }

        ParsedName::Unparsable { name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taxamatch_model::{ParsedName, RankType};

    fn parse(name: &str) -> ParsedName {
        NameParser::new().parse(name)
    }

    #[test]
    fn binomial() {
        let p = parse("Ozothamnus diosmifolius");
        let n = match p {
            ParsedName::WellFormed(n) => n,
            other => panic!("expected well-formed, got {other:?}"),
        };
        assert_eq!(n.genus_or_monomial.as_deref(), Some("Ozothamnus"));
        assert_eq!(n.specific_epithet.as_deref(), Some("diosmifolius"));
        assert_eq!(n.authorship, None);
        assert_eq!(n.canonical_name(), "Ozothamnus diosmifolius");
    }

    #[test]
    fn monomial() {
        let p = parse("Ozothamnus");
        assert!(p.is_well_formed());
        assert_eq!(p.canonical_name(), "Ozothamnus");
    }

    #[test]
    fn binomial_with_authorship() {
        let p = parse("Macropus rufus (Desmarest, 1822)");
        let n = match p {
            ParsedName::WellFormed(n) => n,
            other => panic!("expected well-formed, got {other:?}"),
        };
        assert_eq!(n.authorship.as_deref(), Some("(Desmarest, 1822)"));
        assert_eq!(n.canonical_name(), "Macropus rufus");
    }

    #[test]
    fn infraspecific_with_mid_name_authorship() {
        let p = parse("Trachymene incisa Rudge subsp. incisa");
        let n = match p {
            ParsedName::WellFormed(n) => n,
            other => panic!("expected well-formed, got {other:?}"),
        };
        assert_eq!(n.rank, Some(RankType::Subspecies));
        assert_eq!(n.canonical_name(), "Trachymene incisa subsp. incisa");
    }

    #[test]
    fn zoological_trinomial_keeps_bare_canonical_form() {
        let p = parse("Tyto novaehollandiae novaehollandiae");
        assert!(p.is_well_formed());
        assert_eq!(p.canonical_name(), "Tyto novaehollandiae novaehollandiae");
        assert_eq!(p.rank(), Some(RankType::Subspecies));
    }

    #[test]
    fn numbered_placeholders() {
        for (input, epithet) in [
            ("Diaporthe species1", "species1"),
            ("Diaporthe species 1", "species-1"),
            ("Diaporthe species-1", "species-1"),
        ] {
            let n = match parse(input) {
                ParsedName::Placeholder(n) => n,
                other => panic!("expected placeholder for {input:?}, got {other:?}"),
            };
            assert_eq!(n.genus_or_monomial.as_deref(), Some("Diaporthe"));
            assert_eq!(n.specific_epithet.as_deref(), Some(epithet));
        }
    }

    #[test]
    fn phrase_name_with_voucher_and_party() {
        let p = parse("Goodenia sp. Bachsten Creek (M.D. Barrett 685) WA Herbarium");
        let ph = match p {
            ParsedName::Phrase(ph) => ph,
            other => panic!("expected phrase, got {other:?}"),
        };
        assert_eq!(ph.genus, "Goodenia");
        assert_eq!(ph.rank, RankType::Species);
        assert_eq!(ph.phrase, "Bachsten Creek");
        assert_eq!(ph.voucher.as_deref(), Some("(M.D. Barrett 685)"));
        assert_eq!(ph.nominating_party.as_deref(), Some("WA Herbarium"));
        assert_eq!(ph.clean_voucher.as_deref(), Some("Barrett685"));
    }

    #[test]
    fn phrase_name_with_bracketed_party() {
        let p = parse("Acacia sp. Manmanning (BR Maslin 7711) [aff. multispicata]");
        let ph = match p {
            ParsedName::Phrase(ph) => ph,
            other => panic!("expected phrase, got {other:?}"),
        };
        assert_eq!(ph.phrase, "Manmanning");
        assert_eq!(ph.clean_voucher.as_deref(), Some("Maslin7711"));
        assert_eq!(ph.nominating_party.as_deref(), Some("[aff. multispicata]"));
    }

    #[test]
    fn infraspecific_phrase_keeps_binomial_prefix() {
        let p = parse("Grevillea brachystylis subsp. Busselton (G.J. Keighery s.n. 28/8/1985)");
        let ph = match p {
            ParsedName::Phrase(ph) => ph,
            other => panic!("expected phrase, got {other:?}"),
        };
        assert_eq!(ph.genus, "Grevillea");
        assert_eq!(ph.specific_epithet.as_deref(), Some("brachystylis"));
        assert_eq!(ph.rank, RankType::Subspecies);
        assert_eq!(ph.phrase, "Busselton");
    }

    #[test]
    fn spurious_species_marker_is_repaired() {
        let p = parse("Thelymitra sp. adorata");
        assert!(p.is_well_formed());
        assert_eq!(p.canonical_name(), "Thelymitra adorata");
    }

    #[test]
    fn wrong_case_subgenus_reparses() {
        let p = parse("Aedes (finlaya) notoscriptus");
        let n = match p {
            ParsedName::WellFormed(n) => n,
            other => panic!("expected well-formed, got {other:?}"),
        };
        assert_eq!(n.infrageneric.as_deref(), Some("Finlaya"));
        assert_eq!(n.specific_epithet.as_deref(), Some("notoscriptus"));
    }

    #[test]
    fn empty_and_junk_inputs_degrade() {
        assert_eq!(
            parse(""),
            ParsedName::Unparsable { name: String::new() }
        );
        assert!(matches!(parse("!?"), ParsedName::Unparsable { .. }));
        // a bare marker is not a name
        assert!(matches!(parse("Acacia sp."), ParsedName::Unparsable { .. }));
    }
}
