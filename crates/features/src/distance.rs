//! Edit distance and the close-match predicate.

/// Levenshtein distance over characters, single-row DP.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            let next = (prev + cost).min(row[j] + 1).min(row[j + 1] + 1);
            prev = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

/// True when `a` and `b` are the same word modulo a small misspelling:
/// case-insensitive equality, or length difference and edit distance both
/// within the given bounds. Used to reconcile a caller's kingdom hint with
/// stored kingdoms when arbitrating homonyms.
pub fn is_close_match(a: &str, b: &str, max_len_diff: usize, max_dist: usize) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    let la = a.chars().count();
    let lb = b.chars().count();
    if la.abs_diff(lb) > max_len_diff {
        return false;
    }
    edit_distance(&a.to_lowercase(), &b.to_lowercase()) <= max_dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("Animalia", "Animalia"), 0);
        assert_eq!(edit_distance("Animalia", "Animallia"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn close_match_respects_both_bounds() {
        assert!(is_close_match("Animallia", "Animalia", 3, 3));
        assert!(is_close_match("ANIMALIA", "animalia", 3, 3));
        // within distance but over the length bound
        assert!(!is_close_match("Fungi", "Fungiquid", 3, 3));
        // within length but over the distance bound
        assert!(!is_close_match("Plantae", "Protista", 3, 3));
    }
}
