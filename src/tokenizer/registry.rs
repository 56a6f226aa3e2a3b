//! Encoding registry.
//!
//! Maps the names accepted on the command line to the encodings bundled
//! with tiktoken-rs.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::TcError;

/// Encoding used when neither the command line nor the config names one.
pub const DEFAULT_ENCODING: &str = "o200k_base";

/// Accepted encoding names (canonical names plus aliases)
static ENCODING_NAMES: phf::Map<&'static str, Encoding> = phf_map! {
    "o200k_base" => Encoding::O200kBase,
    "cl100k_base" => Encoding::Cl100kBase,
    "p50k_base" => Encoding::P50kBase,
    "p50k_edit" => Encoding::P50kEdit,
    "r50k_base" => Encoding::R50kBase,
    "gpt2" => Encoding::R50kBase,
};

/// A tiktoken BPE encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// OpenAI o200k_base encoding (GPT-4o, o1, o3)
    #[default]
    O200kBase,
    /// OpenAI cl100k_base encoding (GPT-3.5, GPT-4)
    Cl100kBase,
    /// p50k_base encoding (Codex, text-davinci-002/003)
    P50kBase,
    /// p50k_edit encoding (edit models)
    P50kEdit,
    /// r50k_base encoding (GPT-3, also known as gpt2)
    R50kBase,
}

impl Encoding {
    /// All encodings, in the order they are listed to users.
    pub const ALL: [Encoding; 5] = [
        Encoding::O200kBase,
        Encoding::Cl100kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
    ];

    /// Look up an encoding by name or alias.
    ///
    /// # Examples
    /// ```
    /// use tc::tokenizer::Encoding;
    ///
    /// assert_eq!(Encoding::from_name("o200k_base"), Some(Encoding::O200kBase));
    /// assert_eq!(Encoding::from_name("gpt2"), Some(Encoding::R50kBase));
    /// assert_eq!(Encoding::from_name("O200K_BASE"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        ENCODING_NAMES.get(name).copied()
    }

    /// Canonical encoding name.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::O200kBase => "o200k_base",
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = TcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TcError::UnknownEncoding(s.to_string()))
    }
}
