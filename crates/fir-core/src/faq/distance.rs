//! Levenshtein edit distance over Unicode scalar values.

/// Minimum number of single-character insertions, deletions or substitutions turning `a` into `b`.
///
/// Keeps two rolling rows of `b.chars().count() + 1` cells.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("bail", "bail"), 0);
        assert_eq!(levenshtein("first information report", "first information report"), 0);
    }

    #[test]
    fn empty_side_costs_the_other_length() {
        assert_eq!(levenshtein("bail", ""), 4);
        assert_eq!(levenshtein("", "complaint"), 9);
        assert_eq!(levenshtein("", "\u{91c}\u{92e}\u{93e}\u{928}\u{924}"), 5);
    }

    #[test]
    fn classic_cases() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("bail", "bial"), 2);
        assert_eq!(levenshtein("fir", "fri"), 2);
        assert_eq!(levenshtein("theft", "theif"), 2);
        assert_eq!(levenshtein("robbery", "roberry"), 2);
        assert_eq!(levenshtein("fir", "fire"), 1);
    }

    #[test]
    fn distance_is_symmetric() {
        let words = ["", "fir", "bail", "bial", "police station", "anticipatory bail", "zero fir"];
        for a in words {
            for b in words {
                assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(levenshtein("\u{e9}", "e"), 1);
        assert_eq!(levenshtein("caf\u{e9}", "cafe"), 1);
    }
}
