//! The standard scientific-name grammar.
//!
//! A hand-rolled token walk rather than one grammar regex: the decisions
//! depend on token class (monomial, epithet, rank marker, authorship) and
//! on position, and authorship may interleave with rank markers, as in
//! `Trachymene incisa Rudge subsp. incisa`.

use taxamatch_model::{RankType, ScientificName};

/// Outcome of a standard-grammar attempt. A parse that is not well formed
/// still carries whatever was recognised, plus the signals the fallback
/// paths need.
#[derive(Debug, Default)]
pub struct StandardParse {
    pub name: ScientificName,
    pub well_formed: bool,
    /// Rank of a phrase-eligible marker found where the grammar wanted an
    /// epithet. Set iff the phrase grammar should get a turn.
    pub phrase_rank: Option<RankType>,
    /// A parenthesised lowercase word sat in the subgenus position.
    pub wrong_case_infrageneric: bool,
}

pub fn parse_standard(input: &str) -> StandardParse {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut out = StandardParse::default();
    let first = match tokens.first() {
        Some(t) => *t,
        None => return out,
    };
    if !is_monomial(first) {
        return out;
    }
    out.name.genus_or_monomial = Some(first.to_string());
    let mut i = 1;

    // subgenus position
    if let Some(inner) = tokens.get(i).and_then(|t| paren_inner(t)) {
        if is_monomial(inner) {
            out.name.infrageneric = Some(inner.to_string());
            i += 1;
        } else if inner.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
            out.wrong_case_infrageneric = true;
            return out;
        }
    }

    let tok = match tokens.get(i) {
        Some(t) => *t,
        None => {
            out.well_formed = true;
            return out;
        }
    };

    if let Some((rank, _)) = phrase_marker(tok) {
        // marker straight after the monomial; repair and phrase paths own this
        out.name.rank = Some(rank);
        out.phrase_rank = Some(rank);
        return out;
    }
    if let Some((rank, _)) = infrageneric_marker(tok) {
        // e.g. Acacia sect. Juliflorae
        if let Some(next) = tokens.get(i + 1) {
            if is_monomial(next) {
                out.name.infrageneric = Some(next.to_string());
                out.name.rank = Some(rank);
                let rest = &tokens[i + 2..];
                if rest.is_empty() {
                    out.well_formed = true;
                } else if is_author_start(rest[0]) {
                    out.name.authorship = Some(rest.join(" "));
                    out.well_formed = true;
                }
            }
        }
        return out;
    }
    if is_epithet(tok) {
        out.name.specific_epithet = Some(tok.to_string());
        out.name.rank = Some(RankType::Species);
        i += 1;
    } else if is_author_start(tok) {
        out.name.authorship = Some(tokens[i..].join(" "));
        out.well_formed = true;
        return out;
    } else {
        return out;
    }

    after_epithet(&tokens[i..], &mut out);
    out
}

/// Everything past the specific epithet: bare trinomials, marked
/// infraspecifics with authorship on either side, or plain authorship.
fn after_epithet(rest: &[&str], out: &mut StandardParse) {
    if rest.is_empty() {
        out.well_formed = true;
        return;
    }

    // bare zoological trinomial: no marker, rank implied
    if is_epithet(rest[0]) {
        out.name.infraspecific_epithet = Some(rest[0].to_string());
        out.name.rank = Some(RankType::Subspecies);
        let trailing = &rest[1..];
        if trailing.is_empty() {
            out.well_formed = true;
        } else if is_author_start(trailing[0]) {
            out.name.authorship = Some(trailing.join(" "));
            out.well_formed = true;
        }
        return;
    }

    let mut marker_at = None;
    for (k, t) in rest.iter().enumerate() {
        if let Some(found) = infraspecific_marker(t) {
            marker_at = Some((k, found));
            break;
        }
    }
    if let Some((k, (rank, marker))) = marker_at {
        out.name.rank = Some(rank);
        out.name.rank_marker = Some(marker.to_string());
        let epithet = rest.get(k + 1).copied().filter(|t| is_epithet(t));
        let epithet = match epithet {
            Some(e) => e,
            None => {
                if phrase_marker(rest[k]).is_some() {
                    out.phrase_rank = Some(rank);
                }
                return;
            }
        };
        if k > 0 {
            if !is_author_start(rest[0]) {
                return;
            }
            out.name.authorship = Some(rest[..k].join(" "));
        }
        out.name.infraspecific_epithet = Some(epithet.to_string());
        let trailing = &rest[k + 2..];
        if !trailing.is_empty() {
            if !is_author_start(trailing[0]) {
                return;
            }
            // authorship belongs to the lowest epithet
            out.name.authorship = Some(trailing.join(" "));
        }
        out.well_formed = true;
        return;
    }

    if is_author_start(rest[0]) {
        out.name.authorship = Some(rest.join(" "));
        out.well_formed = true;
    }
}

/// Capitalised word of letters and hyphens, at least two characters.
fn is_monomial(t: &str) -> bool {
    let mut chars = t.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    t.len() >= 2 && chars.all(|c| c.is_ascii_lowercase() || c == '-')
}

/// Lowercase epithet; rank markers and placeholder words are excluded.
fn is_epithet(t: &str) -> bool {
    t.len() >= 2
        && t.chars().all(|c| c.is_ascii_lowercase() || c == '-')
        && phrase_marker(t).is_none()
        && infraspecific_marker(t).is_none()
        && infrageneric_marker(t).is_none()
        && !matches!(t, "group" | "subgroup" | "and" | "ex" | "et")
}

fn is_author_start(t: &str) -> bool {
    t.starts_with('(') || t.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn paren_inner(t: &str) -> Option<&str> {
    t.strip_prefix('(')?.strip_suffix(')')
}

fn bare(t: &str) -> &str {
    t.trim_end_matches('.')
}

/// Markers that make a name eligible for the phrase grammar.
pub fn phrase_marker(t: &str) -> Option<(RankType, &'static str)> {
    let (rank, marker) = match bare(t).to_ascii_lowercase().as_str() {
        "sp" | "spp" | "species" => (RankType::Species, "sp."),
        "subsp" | "ssp" => (RankType::Subspecies, "subsp."),
        "var" => (RankType::Variety, "var."),
        "cv" => (RankType::Cultivar, "cv."),
        _ => return None,
    };
    Some((rank, marker))
}

fn infrageneric_marker(t: &str) -> Option<(RankType, &'static str)> {
    let (rank, marker) = match bare(t).to_ascii_lowercase().as_str() {
        "subg" | "subgen" => (RankType::Subgenus, "subg."),
        "sect" => (RankType::Section, "sect."),
        "ser" => (RankType::Series, "ser."),
        _ => return None,
    };
    Some((rank, marker))
}

fn infraspecific_marker(t: &str) -> Option<(RankType, &'static str)> {
    let (rank, marker) = match bare(t).to_ascii_lowercase().as_str() {
        "subsp" | "ssp" => (RankType::Subspecies, "subsp."),
        "var" => (RankType::Variety, "var."),
        "f" | "forma" => (RankType::Form, "f."),
        "cv" => (RankType::Cultivar, "cv."),
        _ => return None,
    };
    Some((rank, marker))
}
