//! Token counting backed by tiktoken encodings.
//!
//! The rest of the crate talks to the tokenizer only through the
//! [`Tokenizer`] trait, so runs can be driven by a substitute in tests.
//!
//! # Supported Encodings
//!
//! - **o200k_base**: GPT-4o, o1, o3 models (default)
//! - **cl100k_base**: GPT-3.5, GPT-4
//! - **p50k_base** / **p50k_edit**: Codex-era models
//! - **r50k_base** (alias `gpt2`): GPT-3
//!
//! # Example
//!
//! ```
//! use tc::tokenizer::{TiktokenTokenizer, Tokenizer};
//!
//! let tokenizer = TiktokenTokenizer::new();
//! let tokens = tokenizer.count("Hello, world!", "o200k_base").unwrap();
//! assert!(tokens > 0);
//!
//! assert!(tokenizer.count("Hello", "does_not_exist").is_err());
//! ```

mod counter;
mod registry;

pub use counter::TiktokenTokenizer;
pub use registry::{Encoding, DEFAULT_ENCODING};

use crate::error::{Result, TcError};

/// BPE tokenizer capability.
///
/// Encoding names are plain strings so that the registry of a substitute
/// implementation can differ from the built-in one.
pub trait Tokenizer {
    /// Names of all encodings this tokenizer can apply.
    fn encodings(&self) -> Vec<&'static str>;

    /// Encode `text` into token IDs with the named encoding.
    ///
    /// Fails with [`TcError::UnknownEncoding`] for unregistered names.
    fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u32>>;

    /// Number of tokens in `text` under the named encoding.
    fn count(&self, text: &str, encoding: &str) -> Result<usize> {
        Ok(self.encode(text, encoding)?.len())
    }

    /// Check that `encoding` is registered without encoding anything.
    fn validate(&self, encoding: &str) -> Result<()> {
        if self.encodings().contains(&encoding) {
            Ok(())
        } else {
            Err(TcError::UnknownEncoding(encoding.to_string()))
        }
    }
}
