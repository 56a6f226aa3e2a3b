//! Per-input metrics and run totals.
//!
//! [`extract`] turns one [`InputRecord`] into [`FileStats`]; [`aggregate`]
//! sorts a run's stats and sums them into a [`Summary`]. The summary is
//! serialized as-is for JSON output, so its field names are part of the
//! command-line interface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::input::InputRecord;
use crate::tokenizer::Tokenizer;

/// Counts for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// File path or `stdin`
    pub name: String,
    /// BPE token count
    pub tokens: usize,
    /// Line count, with a trailing unterminated line counted as a line
    pub lines: usize,
    /// Unicode scalar value count
    pub chars: usize,
}

/// Field-wise sums over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of token counts
    pub tokens: usize,
    /// Sum of line counts
    pub lines: usize,
    /// Sum of character counts
    pub chars: usize,
}

/// Sorted stats for one run.
///
/// Built only by [`aggregate`], so `total` always equals the sum of `files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Encoding name the counts were taken with
    pub encoding: String,
    /// Per-input stats, ascending by tokens
    pub files: Vec<FileStats>,
    /// Sums over `files`
    pub total: Totals,
}

/// Count lines the way `wc -l` would, plus one for an unterminated last line.
///
/// # Example
/// ```
/// use tc::stats::count_lines;
///
/// assert_eq!(count_lines(""), 0);
/// assert_eq!(count_lines("a"), 1);
/// assert_eq!(count_lines("a\n"), 1);
/// assert_eq!(count_lines("a\nb"), 2);
/// ```
pub fn count_lines(text: &str) -> usize {
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    if text.is_empty() || text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Count Unicode scalar values.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// Compute the stats for one record.
///
/// The whole text is encoded at once.
pub fn extract<T: Tokenizer + ?Sized>(
    record: &InputRecord,
    tokenizer: &T,
    encoding: &str,
) -> Result<FileStats> {
    let stats = FileStats {
        name: record.name.clone(),
        tokens: tokenizer.count(&record.text, encoding)?,
        lines: count_lines(&record.text),
        chars: count_chars(&record.text),
    };
    debug!(
        name = %stats.name,
        tokens = stats.tokens,
        lines = stats.lines,
        chars = stats.chars,
        "counted"
    );
    Ok(stats)
}

/// Sort stats ascending by token count and compute totals.
///
/// The sort is stable: inputs with equal token counts keep their order.
pub fn aggregate(encoding: impl Into<String>, mut files: Vec<FileStats>) -> Summary {
    files.sort_by_key(|f| f.tokens);

    let total = files.iter().fold(Totals::default(), |acc, f| Totals {
        tokens: acc.tokens + f.tokens,
        lines: acc.lines + f.lines,
        chars: acc.chars + f.chars,
    });

    Summary {
        encoding: encoding.into(),
        files,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TiktokenTokenizer;
    use proptest::prelude::*;

    fn stats(name: &str, tokens: usize) -> FileStats {
        FileStats {
            name: name.to_string(),
            tokens,
            lines: 1,
            chars: tokens * 3,
        }
    }

    #[test]
    fn test_count_lines_cases() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("a"), 1);
        assert_eq!(count_lines("a\n"), 1);
        assert_eq!(count_lines("a\nb"), 2);
        assert_eq!(count_lines("a\nb\n"), 2);
        assert_eq!(count_lines("\n"), 1);
        assert_eq!(count_lines("\n\n"), 2);
    }

    #[test]
    fn test_count_chars_is_not_bytes() {
        assert_eq!(count_chars("héllo"), 5);
        assert_eq!(count_chars("日本語"), 3);
        assert_eq!(count_chars(""), 0);
    }

    #[test]
    fn test_extract() {
        let record = InputRecord::new("greeting.txt", "hello world\nsecond line");
        let stats = extract(&record, &TiktokenTokenizer::new(), "o200k_base").unwrap();

        assert_eq!(stats.name, "greeting.txt");
        assert!(stats.tokens > 0);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.chars, 23);
    }

    #[test]
    fn test_extract_empty_text() {
        let record = InputRecord::new("stdin", "");
        let stats = extract(&record, &TiktokenTokenizer::new(), "cl100k_base").unwrap();
        assert_eq!((stats.tokens, stats.lines, stats.chars), (0, 0, 0));
    }

    #[test]
    fn test_aggregate_sorts_ascending() {
        let summary = aggregate(
            "o200k_base",
            vec![stats("c", 30), stats("a", 10), stats("b", 20)],
        );

        let names: Vec<_> = summary.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(summary.total.tokens, 60);
        assert_eq!(summary.total.lines, 3);
        assert_eq!(summary.total.chars, 180);
    }

    #[test]
    fn test_aggregate_is_stable_on_ties() {
        let summary = aggregate(
            "o200k_base",
            vec![stats("first", 5), stats("second", 5), stats("zero", 0)],
        );

        let names: Vec<_> = summary.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zero", "first", "second"]);
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate("o200k_base", Vec::new());
        assert!(summary.files.is_empty());
        assert_eq!(summary.total, Totals::default());
    }

    proptest! {
        #[test]
        fn prop_line_count_matches_segments(text in "[a-z\n]{0,64}") {
            let expected = if text.is_empty() {
                0
            } else {
                text.strip_suffix('\n').unwrap_or(&text).split('\n').count()
            };
            prop_assert_eq!(count_lines(&text), expected);
        }

        #[test]
        fn prop_totals_match_sum(counts in proptest::collection::vec((0usize..500, 0usize..50), 0..20)) {
            let files: Vec<_> = counts
                .iter()
                .enumerate()
                .map(|(i, &(tokens, lines))| FileStats {
                    name: format!("f{i}"),
                    tokens,
                    lines,
                    chars: tokens + lines,
                })
                .collect();
            let summary = aggregate("o200k_base", files);

            prop_assert_eq!(summary.total.tokens, summary.files.iter().map(|f| f.tokens).sum::<usize>());
            prop_assert_eq!(summary.total.lines, summary.files.iter().map(|f| f.lines).sum::<usize>());
            prop_assert_eq!(summary.total.chars, summary.files.iter().map(|f| f.chars).sum::<usize>());
            prop_assert!(summary.files.windows(2).all(|w| w[0].tokens <= w[1].tokens));
        }
    }
}
