//! Phrase names, numbered placeholders and the repair passes.
//!
//! Phrase names follow the Australian herbarium convention
//! `Genus sp. Location (Collector Voucher) Authority`. The regexes are
//! built once; all captures are trimmed and empty captures become `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use taxamatch_model::{PhraseName, RankType, ScientificName};

use crate::grammar::phrase_marker;

static PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([\x00-\x7F]*?)(?:^|\s)(subsp|ssp|spp|sp|var|cv)\.?\s+([A-Za-z0-9'"_. -]+)(\([A-Za-z0-9 ./&,'-]+\))?\s*([A-Za-z0-9\[\]'", .-]+)?$"#,
    )
    .unwrap()
});

/// `sp.` followed by a lowercase word of three or more letters: the marker
/// is probably spurious and the word a real epithet.
static POTENTIAL_SPECIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\x00-\x7F]*?(?:^|\s))sp\.?\s+([a-z]{3,})\s*(.*)$").unwrap());

static NUMBERED_PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([A-Z][a-z-]+)\s+((?:[Ss]pecies|[Ss]pp|[Ss]p|subsp|ssp|var|forma|f|sect|ser|subg|[Gg]roup|[Ss]ub[Gg]roup)\.?[\s_-]*\d+\.?)(?:\s+([A-Z(][\x00-\x7F]*))?$",
    )
    .unwrap()
});

static EPITHET_SEPARATORS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ _-]+").unwrap());

static WRONG_CASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*([a-z][a-z-]+)\s*\)").unwrap());

static PHRASE_BLACKLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&| AND | and |Stn\.|Stn|Station|Mt\.|Mt |Mount").unwrap());

// voucher cleanup tables, applied in order
static VOUCHER_SPLIT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]{1,3}) (\d)").unwrap());
static VOUCHER_BLACKLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" and | AND | And | s\.n\.| sn ").unwrap());
static VOUCHER_INITIALS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:[A-Z]\.){1,3}").unwrap());
static VOUCHER_ABBREV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z][A-Z]{1,3} ").unwrap());
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());

/// Tries the phrase grammar. The prefix before the marker must be a
/// monomial or binomial; the location is mandatory.
pub fn parse_phrase(name: &str) -> Option<PhraseName> {
    let caps = PHRASE_RE.captures(name)?;
    let prefix = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    let marker = caps.get(2).map(|m| m.as_str())?;
    let phrase = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");
    if phrase.is_empty() {
        return None;
    }
    let voucher = non_empty(caps.get(4).map(|m| m.as_str()));
    let nominating_party = non_empty(caps.get(5).map(|m| m.as_str()));

    let mut prefix_tokens = prefix.split_whitespace();
    let genus = prefix_tokens.next()?;
    if !genus.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let specific_epithet = prefix_tokens.next().map(str::to_string);
    if prefix_tokens.next().is_some() {
        return None;
    }
    let (rank, _) = phrase_marker(marker)?;

    Some(PhraseName {
        genus: genus.to_string(),
        specific_epithet,
        rank,
        clean_phrase: clean_phrase(phrase),
        phrase: phrase.to_string(),
        clean_voucher: voucher.as_deref().map(clean_voucher),
        voucher,
        nominating_party,
    })
}

/// Tries the numbered-placeholder pattern, e.g. `Diaporthe species 1`.
/// Separators inside the epithet are folded to a single hyphen.
pub fn parse_placeholder(name: &str) -> Option<ScientificName> {
    let caps = NUMBERED_PLACEHOLDER_RE.captures(name)?;
    let genus = caps.get(1)?.as_str();
    let epithet = caps.get(2)?.as_str();
    let authorship = non_empty(caps.get(3).map(|m| m.as_str()));
    let marker: String = epithet
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let rank = phrase_marker(&marker)
        .map(|(r, _)| r)
        .or_else(|| match marker.to_ascii_lowercase().as_str() {
            "group" | "subgroup" => Some(RankType::SpeciesGroup),
            "sect" => Some(RankType::Section),
            "ser" => Some(RankType::Series),
            "subg" => Some(RankType::Subgenus),
            "f" | "forma" => Some(RankType::Form),
            _ => None,
        })
        .unwrap_or(RankType::Species);
    Some(ScientificName {
        genus_or_monomial: Some(genus.to_string()),
        specific_epithet: Some(EPITHET_SEPARATORS_RE.replace_all(epithet, "-").into_owned()),
        rank: Some(rank),
        authorship,
        ..ScientificName::default()
    })
}

/// Rewrites `Genus sp. epithet` to `Genus epithet` for reparsing.
pub fn repair_species(name: &str) -> Option<String> {
    let caps = POTENTIAL_SPECIES_RE.captures(name)?;
    let prefix = caps.get(1)?.as_str();
    let epithet = caps.get(2)?.as_str();
    let rest = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");
    if rest.is_empty() {
        Some(format!("{prefix}{epithet}"))
    } else {
        Some(format!("{prefix}{epithet} {rest}"))
    }
}

/// Title-cases a parenthesised lowercase subgenus, once.
pub fn fix_infrageneric_case(name: &str) -> Option<String> {
    let caps = WRONG_CASE_RE.captures(name)?;
    let inner = caps.get(1)?.as_str();
    let whole = caps.get(0)?;
    let mut fixed = String::with_capacity(name.len());
    fixed.push_str(&name[..whole.start()]);
    fixed.push('(');
    let mut chars = inner.chars();
    if let Some(first) = chars.next() {
        fixed.push(first.to_ascii_uppercase());
        fixed.extend(chars);
    }
    fixed.push(')');
    fixed.push_str(&name[whole.end()..]);
    Some(fixed)
}

/// The comparable form of a phrase: geography boilerplate and quotes are
/// stripped so `Mt Ragged` and `Mount Ragged` register identically.
pub fn clean_phrase(phrase: &str) -> String {
    let padded = format!(" {phrase}");
    let cleaned = PHRASE_BLACKLIST_RE.replace_all(&padded, " ");
    let cleaned = cleaned.replace(['\'', '"'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The comparable form of a voucher: collector surnames and the specimen
/// id, with initials, herbarium abbreviations and connectives removed.
pub fn clean_voucher(voucher: &str) -> String {
    let v = VOUCHER_SPLIT_ID_RE.replacen(voucher, 1, "$1$2");
    let v = VOUCHER_BLACKLIST_RE.replace_all(&v, " ");
    let v = VOUCHER_INITIALS_RE.replace_all(&v, " ");
    let v = VOUCHER_ABBREV_RE.replace_all(&v, " ");
    NON_WORD_RE.replace_all(&v, "").into_owned()
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn voucher_collector_surnames_survive() {
        assert_eq!(clean_voucher("(M.D. Barrett 685)"), "Barrett685");
        assert_eq!(clean_voucher("(B.J.Conn 3471)"), "Conn3471");
        assert_eq!(
            clean_voucher("(L.W.Sage, F.Hort, C.A.Hollister LWS2321)"),
            "SageHortHollisterLWS2321"
        );
    }

    #[test]
    fn voucher_herbarium_abbreviations_drop() {
        assert_eq!(clean_voucher("(BR Maslin 7711)"), "Maslin7711");
    }

    #[test]
    fn voucher_split_ids_rejoin() {
        assert_eq!(clean_voucher("(RS 12562)"), "RS12562");
    }

    #[test]
    fn phrase_boilerplate_strips() {
        assert_eq!(clean_phrase("Mt Ragged"), "Ragged");
        assert_eq!(clean_phrase("Kalbarri Station"), "Kalbarri");
        assert_eq!(clean_phrase("'Cranbrook'"), "Cranbrook");
        assert_eq!(clean_phrase("Bachsten Creek"), "Bachsten Creek");
    }

    #[test]
    fn species_repair_rewrites_lowercase_epithets_only() {
        assert_eq!(
            repair_species("Thelymitra sp. adorata"),
            Some("Thelymitra adorata".to_string())
        );
        assert_eq!(repair_species("Goodenia sp. Bachsten Creek"), None);
    }

    #[test]
    fn wrong_case_subgenus_is_title_cased() {
        assert_eq!(
            fix_infrageneric_case("Aedes (finlaya) notoscriptus"),
            Some("Aedes (Finlaya) notoscriptus".to_string())
        );
        assert_eq!(fix_infrageneric_case("Aedes (Finlaya) notoscriptus"), None);
    }
}
