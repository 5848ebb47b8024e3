//! Three-stage name cleaning.
//!
//! Source strings arrive with typographic punctuation, non-breaking
//! spaces, combining diacritics and the occasional Greek letter or
//! multiplication sign. Each stage is strictly more aggressive than the
//! last; the index registers a name under every stage that changed it.

use unicode_normalization::UnicodeNormalization;

/// The cleaned forms of one source name, computed eagerly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedName {
    /// Whitespace-collapsed source.
    pub name: String,
    /// NFKC fold with typographic punctuation mapped to ASCII.
    pub normalised: String,
    /// NFD fold with symbols spelled out and everything non-ASCII dropped.
    pub basic: String,
}

impl CleanedName {
    pub fn new(source: &str) -> CleanedName {
        let name = collapse_whitespace(source);
        let normalised = normalise(&name);
        let basic = basic(&normalised);
        CleanedName {
            name,
            normalised,
            basic,
        }
    }

    /// True if punctuation folding changed the name.
    pub fn has_normalised(&self) -> bool {
        self.normalised != self.name
    }

    /// True if the basic stage changed the normalised form.
    pub fn has_basic(&self) -> bool {
        self.basic != self.normalised
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalise(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.nfkc() {
        fold_punctuation(c, &mut out);
    }
    collapse_whitespace(&out)
}

fn basic(normalised: &str) -> String {
    let mut out = String::with_capacity(normalised.len());
    for c in normalised.nfd() {
        fold_symbol(c, &mut out);
    }
    collapse_whitespace(&out)
}

/// Typographic punctuation to its ASCII equivalent. Everything not in the
/// table passes through unchanged.
fn fold_punctuation(c: char, out: &mut String) {
    match c {
        // non-breaking and narrow no-break spaces
        '\u{00A0}' | '\u{202F}' => out.push(' '),
        // soft hyphen, hyphen through horizontal bar, minus sign
        '\u{00AD}' | '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
        // curly single quotes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => out.push('\''),
        // curly double quotes
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => out.push('"'),
        // hyphenation point is dropped outright
        '\u{2027}' => {}
        // line and paragraph separators
        '\u{2028}' | '\u{2029}' => out.push(' '),
        // bidi controls
        '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' => {}
        _ => out.push(c),
    }
}

/// Symbols spelled out in ASCII; anything still outside ASCII after NFD
/// (combining diacritics in particular) is dropped.
fn fold_symbol(c: char, out: &mut String) {
    match c {
        '\u{00D7}' | '\u{2715}' | '\u{2A09}' => out.push_str(" x "),
        '\u{00DF}' => out.push_str("ss"),
        'α' | 'Α' => out.push_str(" alpha "),
        'β' | 'Β' => out.push_str(" beta "),
        'γ' | 'Γ' => out.push_str(" gamma "),
        'δ' | 'Δ' => out.push_str(" delta "),
        'ε' | 'Ε' => out.push_str(" epsilon "),
        '\u{2020}' | '\u{2021}' | '\u{2022}' => out.push('*'),
        '\u{2032}' => out.push('\''),
        '\u{2033}' => out.push('"'),
        '\u{2026}' => out.push('.'),
        c if (c as u32) < 0x80 => out.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_runs_collapse() {
        let c = CleanedName::new("  Acacia\t\tdealbata \u{00A0} Link  ");
        assert_eq!(c.name, "Acacia dealbata Link");
    }

    #[test]
    fn typographic_punctuation_maps_to_ascii() {
        let c = CleanedName::new("Acacia \u{2018}Mudgee\u{2019} \u{2013} wattle");
        assert_eq!(c.normalised, "Acacia 'Mudgee' - wattle");
        assert!(c.has_normalised());
    }

    #[test]
    fn diacritics_are_stripped_in_basic() {
        let c = CleanedName::new("Mühlenbeckia");
        assert_eq!(c.basic, "Muhlenbeckia");
        assert!(c.has_basic());
    }

    #[test]
    fn hybrid_sign_spells_out() {
        let c = CleanedName::new("Cytisus \u{00D7}dallimorei");
        assert_eq!(c.basic, "Cytisus x dallimorei");
    }

    #[test]
    fn sharp_s_and_greek_spell_out() {
        let c = CleanedName::new("Weißia β-form");
        assert_eq!(c.basic, "Weissia beta -form");
    }

    #[test]
    fn ascii_input_is_unchanged() {
        let c = CleanedName::new("Macropus rufus");
        assert_eq!(c.name, "Macropus rufus");
        assert!(!c.has_normalised());
        assert!(!c.has_basic());
    }

    #[test]
    fn cleaning_the_basic_form_is_a_fixed_point() {
        let first = CleanedName::new("Mühlenbeckia \u{2013} « spp. »");
        let second = CleanedName::new(&first.basic);
        assert_eq!(second.basic, first.basic);
        assert!(!second.has_normalised());
        assert!(!second.has_basic());
    }

    #[test]
    fn empty_input_is_allowed() {
        let c = CleanedName::new("");
        assert_eq!(c.name, "");
        assert_eq!(c.basic, "");
    }
}
