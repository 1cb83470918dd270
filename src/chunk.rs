//! Overlapping word-window chunker.
//!
//! Splits document body text into fixed-size windows of whitespace-delimited
//! words, each window overlapping the previous one by a configurable number
//! of words. Overlap keeps sentences that straddle a window boundary visible
//! to retrieval from both sides.

/// Split text into overlapping windows of `chunk_size` words.
///
/// The window advances by `chunk_size - overlap` words per step; each window
/// is joined back with single spaces. The final window may be shorter than
/// `chunk_size`, and iteration stops once a window reaches the end of the
/// word sequence, so every word appears in at least one chunk.
///
/// A text with no words yields no chunks.
///
/// # Panics
///
/// Panics if `chunk_size` is zero or `overlap >= chunk_size` (the window
/// would never advance). Config validation rejects such values before any
/// caller reaches this function.
pub fn chunk_words(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    assert!(chunk_size >= 1, "chunk_size must be >= 1");
    assert!(overlap < chunk_size, "overlap must be smaller than chunk_size");

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start = end - overlap;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_words("", 800, 200).is_empty());
        assert!(chunk_words("   \n\t  ", 800, 200).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_words("the deadline is May 1", 800, 200);
        assert_eq!(chunks, vec!["the deadline is May 1".to_string()]);
    }

    #[test]
    fn test_exact_window_is_single_chunk() {
        let text = numbered_words(800);
        let chunks = chunk_words(&text, 800, 200);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_thousand_words_two_chunks() {
        // 1000 words, size 800, overlap 200: windows [0,800) and [600,1000).
        let text = numbered_words(1000);
        let chunks = chunk_words(&text, 800, 200);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("w0 "));
        assert!(chunks[0].ends_with(" w799"));
        assert!(chunks[1].starts_with("w600 "));
        assert!(chunks[1].ends_with(" w999"));
    }

    #[test]
    fn test_chunk_count_formula() {
        // ceil(max(N - O, 0) / (S - O)) for a handful of shapes.
        for &(n, s, o) in &[
            (1usize, 10usize, 3usize),
            (10, 10, 3),
            (11, 10, 3),
            (100, 10, 3),
            (1000, 800, 200),
            (999, 800, 200),
        ] {
            let expected = (n.saturating_sub(o)).div_ceil(s - o).max(1);
            let chunks = chunk_words(&numbered_words(n), s, o);
            assert_eq!(chunks.len(), expected, "N={} S={} O={}", n, s, o);
        }
    }

    #[test]
    fn test_full_coverage_in_order() {
        let n = 137;
        let (s, o) = (20, 7);
        let chunks = chunk_words(&numbered_words(n), s, o);

        // Strip the overlap from every chunk after the first; the
        // concatenation must reproduce the original word sequence.
        let mut recovered: Vec<String> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let words: Vec<&str> = chunk.split(' ').collect();
            let skip = if i == 0 { 0 } else { o };
            // Overlapping words must match what we already have.
            for (j, w) in words.iter().take(skip).enumerate() {
                assert_eq!(recovered[recovered.len() - skip + j], *w);
            }
            for w in words.iter().skip(skip) {
                recovered.push(w.to_string());
            }
        }
        let original: Vec<String> = numbered_words(n).split(' ').map(String::from).collect();
        assert_eq!(recovered, original);
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let chunks = chunk_words(&numbered_words(100), 30, 10);
        for pair in chunks.windows(2) {
            let left: Vec<&str> = pair[0].split(' ').collect();
            let right: Vec<&str> = pair[1].split(' ').collect();
            assert_eq!(&left[left.len() - 10..], &right[..10]);
        }
    }

    #[test]
    #[should_panic(expected = "overlap must be smaller")]
    fn test_overlap_equal_to_chunk_size_panics() {
        chunk_words("a b c", 5, 5);
    }
}
