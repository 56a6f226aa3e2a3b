//! tiktoken-rs backed tokenizer.
//!
//! BPE tables are loaded lazily on first use and shared for the rest of the
//! process.

use std::sync::OnceLock;

use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base, CoreBPE};
use tracing::debug;

use super::{Encoding, Tokenizer};
use crate::error::{Result, TcError};

// Lazy-loaded tokenizer instances (thread-safe singletons)
static O200K: OnceLock<CoreBPE> = OnceLock::new();
static CL100K: OnceLock<CoreBPE> = OnceLock::new();
static P50K: OnceLock<CoreBPE> = OnceLock::new();
static P50K_EDIT: OnceLock<CoreBPE> = OnceLock::new();
static R50K: OnceLock<CoreBPE> = OnceLock::new();

fn cell(encoding: Encoding) -> &'static OnceLock<CoreBPE> {
    match encoding {
        Encoding::O200kBase => &O200K,
        Encoding::Cl100kBase => &CL100K,
        Encoding::P50kBase => &P50K,
        Encoding::P50kEdit => &P50K_EDIT,
        Encoding::R50kBase => &R50K,
    }
}

fn load(encoding: Encoding) -> anyhow::Result<CoreBPE> {
    match encoding {
        Encoding::O200kBase => o200k_base(),
        Encoding::Cl100kBase => cl100k_base(),
        Encoding::P50kBase => p50k_base(),
        Encoding::P50kEdit => p50k_edit(),
        Encoding::R50kBase => r50k_base(),
    }
}

/// Get the BPE for `encoding`, loading it on first use
fn bpe(encoding: Encoding) -> Result<&'static CoreBPE> {
    let cell = cell(encoding);
    if let Some(bpe) = cell.get() {
        return Ok(bpe);
    }

    debug!(encoding = encoding.name(), "loading BPE tables");
    let loaded = load(encoding)
        .map_err(|e| TcError::Tokenizer(format!("failed to load {encoding}: {e}")))?;
    Ok(cell.get_or_init(|| loaded))
}

/// Tokenizer over the encodings bundled with tiktoken-rs.
///
/// Text is encoded as ordinary text: special-token literals such as
/// `<|endoftext|>` count as the characters they are spelled with.
///
/// # Example
/// ```
/// use tc::tokenizer::{TiktokenTokenizer, Tokenizer};
///
/// let tokenizer = TiktokenTokenizer::new();
/// assert_eq!(tokenizer.count("", "cl100k_base").unwrap(), 0);
/// assert!(tokenizer.encodings().contains(&"o200k_base"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TiktokenTokenizer;

impl TiktokenTokenizer {
    /// Create a tokenizer handle
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encodings(&self) -> Vec<&'static str> {
        Encoding::ALL.iter().map(Encoding::name).collect()
    }

    fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u32>> {
        let encoding: Encoding = encoding.parse()?;
        Ok(bpe(encoding)?.encode_ordinary(text))
    }

    fn validate(&self, encoding: &str) -> Result<()> {
        // aliases are valid too, so go through the name table
        encoding.parse::<Encoding>().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens_basic() {
        let tokens = TiktokenTokenizer::new()
            .count("Hello, world!", "o200k_base")
            .unwrap();
        assert!(tokens > 0);
        assert!(tokens < 10);
    }

    #[test]
    fn test_count_tokens_empty() {
        let tokenizer = TiktokenTokenizer::new();
        for name in tokenizer.encodings() {
            assert_eq!(tokenizer.count("", name).unwrap(), 0, "{name}");
        }
    }

    #[test]
    fn test_different_encodings() {
        let text = "Hello, world! This is a test.";
        let tokenizer = TiktokenTokenizer::new();

        for name in tokenizer.encodings() {
            assert!(tokenizer.count(text, name).unwrap() > 0, "{name}");
        }
    }

    #[test]
    fn test_alias_counts_like_canonical_name() {
        let tokenizer = TiktokenTokenizer::new();
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(
            tokenizer.count(text, "gpt2").unwrap(),
            tokenizer.count(text, "r50k_base").unwrap()
        );
        assert!(tokenizer.validate("gpt2").is_ok());
    }

    #[test]
    fn test_unknown_encoding() {
        let tokenizer = TiktokenTokenizer::new();
        assert!(matches!(
            tokenizer.encode("hello", "does_not_exist"),
            Err(TcError::UnknownEncoding(_))
        ));
        assert!(matches!(
            tokenizer.validate("does_not_exist"),
            Err(TcError::UnknownEncoding(name)) if name == "does_not_exist"
        ));
    }

    #[test]
    fn test_special_tokens_are_plain_text() {
        let tokenizer = TiktokenTokenizer::new();
        // as a special token this would be a single ID
        assert!(tokenizer.count("<|endoftext|>", "cl100k_base").unwrap() > 1);
    }

    #[test]
    fn test_encoding_consistency() {
        let tokenizer = TiktokenTokenizer::new();
        let text = "The quick brown fox jumps over the lazy dog.";

        let first = tokenizer.encode(text, "o200k_base").unwrap();
        let second = tokenizer.encode(text, "o200k_base").unwrap();
        assert_eq!(first, second);
    }
}
