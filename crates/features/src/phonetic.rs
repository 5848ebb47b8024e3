//! The taxonomic sound-alike key.
//!
//! Latinised names misspell in predictable ways: ae/e/i confusion, o/a
//! vowel drift, silent leading consonants, doubled letters. The key folds
//! those families together so that names differing only in such ways
//! produce identical strings. Equal keys are a candidate match; the key
//! is not a distance metric and nothing is scored.

/// Start-of-string rewrites. At most one applies, longest rule first.
const PREFIX_RULES: &[(&str, &str)] = &[
    ("AE", "E"),
    ("CN", "N"),
    ("CT", "T"),
    ("CZ", "C"),
    ("DJ", "J"),
    ("EA", "E"),
    ("EU", "U"),
    ("GN", "N"),
    ("KN", "N"),
    ("MN", "N"),
    ("OE", "E"),
    ("QU", "Q"),
    ("PS", "S"),
    ("PT", "T"),
    ("TS", "S"),
    ("Æ", "E"),
    ("X", "Z"),
];

/// Extra start-of-word rewrites applied by [`treat_word`] only.
const WORD_PREFIX_RULES: &[(&str, &str)] = &[("MC", "MAC"), ("WR", "R")];

/// Computes the phonetic key for a whole name. Deterministic and
/// case-insensitive; whitespace words are keyed independently in step 5.
pub fn phonetic_key(name: &str) -> String {
    let upper = name.to_uppercase();
    let prefixed = replace_prefix(&upper, PREFIX_RULES);
    let folded = fold_soundalikes(&prefixed);
    let collapsed = collapse_repeats(&folded);
    sort_word_tails(&collapsed)
}

/// The single-word variant used for per-component fuzzy fields. Skips the
/// word-tail sort and, for species epithets, folds the Latin endings
/// `IS`/`IM`/`AS` to `A` so gendered forms collide.
pub fn treat_word(word: &str, species_epithet: bool) -> String {
    let upper = word.to_uppercase();
    if upper.is_empty() {
        return upper;
    }
    let prefixed = replace_prefix(&upper, WORD_PREFIX_RULES);
    let prefixed = replace_prefix(&prefixed, PREFIX_RULES);
    let folded = fold_soundalikes(&prefixed);
    let mut out = collapse_repeats(&folded);
    if species_epithet {
        for ending in ["IS", "IM", "AS"] {
            if let Some(stem) = out.strip_suffix(ending) {
                out = format!("{stem}A");
                break;
            }
        }
    }
    out
}

fn replace_prefix(s: &str, rules: &[(&str, &str)]) -> String {
    for (from, to) in rules {
        if let Some(rest) = s.strip_prefix(from) {
            return format!("{to}{rest}");
        }
    }
    s.to_string()
}

/// Sound-alike folding everywhere after the first character: digraphs
/// first, then the positional single-character map.
fn fold_soundalikes(s: &str) -> String {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    let mut tail: String = chars.collect();
    for (from, to) in [
        ("AE", "I"),
        ("IA", "A"),
        ("OE", "I"),
        ("OI", "A"),
        ("MC", "MAC"),
        ("SC", "S"),
    ] {
        tail = tail.replace(from, to);
    }
    let mut out = String::with_capacity(tail.len() + 1);
    out.push(first);
    for c in tail.chars() {
        match c {
            'E' | 'U' | 'Y' => out.push('I'),
            'O' => out.push('A'),
            'K' => out.push('C'),
            'Z' => out.push('S'),
            'H' => {}
            other => out.push(other),
        }
    }
    out
}

fn collapse_repeats(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last: Option<char> = None;
    for c in s.chars() {
        if last != Some(c) {
            out.push(c);
        }
        last = Some(c);
    }
    out
}

/// Per word: keep the first character, sort the rest alphabetically.
fn sort_word_tails(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut rest: Vec<char> = chars.collect();
                    rest.sort_unstable();
                    std::iter::once(first).chain(rest).collect::<String>()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
