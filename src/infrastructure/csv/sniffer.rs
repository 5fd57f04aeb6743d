// ============================================================
// DELIMITER SNIFFER
// ============================================================
// Best-effort delimiter guess for informational display

/// Candidate delimiters in tie-break priority order, comma first
const CANDIDATES: [char; 5] = [',', ';', '\t', '|', ':'];

/// Number of characters of input examined
const SAMPLE_CHARS: usize = 10_000;

/// Guess the field delimiter from a bounded prefix of the text.
///
/// Counts candidate occurrences in the first non-empty line of the sample
/// and returns the most frequent one; ties resolve to the earlier candidate
/// in the priority order. Defaults to comma when nothing matches.
/// Display-only: the parser runs its own detection.
pub fn sniff(text: &str) -> char {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();
    let first_line = sample.lines().find(|l| !l.trim().is_empty()).unwrap_or("");

    let mut best = ',';
    let mut best_count = 0usize;

    for candidate in CANDIDATES {
        let count = first_line.chars().filter(|&c| c == candidate).count();
        if count > best_count {
            best_count = count;
            best = candidate;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_comma() {
        assert_eq!(sniff("a,b,c\n1,2,3\n"), ',');
    }

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff("a;b;c\n1;2;3\n"), ';');
    }

    #[test]
    fn test_sniff_tab_and_pipe() {
        assert_eq!(sniff("a\tb\tc\n"), '\t');
        assert_eq!(sniff("a|b|c\n"), '|');
    }

    #[test]
    fn test_sniff_tie_prefers_comma() {
        // One comma, one semicolon: priority order wins
        assert_eq!(sniff("a,b;c\n"), ',');
    }

    #[test]
    fn test_sniff_no_candidate_defaults_to_comma() {
        assert_eq!(sniff("justoneword\n"), ',');
        assert_eq!(sniff(""), ',');
    }

    #[test]
    fn test_sniff_skips_leading_blank_lines() {
        assert_eq!(sniff("\n\na;b;c\n"), ';');
    }
}
