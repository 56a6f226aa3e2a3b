//! # tc - token counter
//!
//! Counts BPE tokens, lines and characters in files or standard input.
//!
//! ## Pipeline
//!
//! ```text
//!  paths / stdin
//!       │
//!       ▼
//!  ┌──────────┐   InputRecord   ┌─────────┐   FileStats   ┌───────────┐   Summary   ┌───────────┐
//!  │  input   │ ──────────────> │  stats  │ ────────────> │ aggregate │ ──────────> │  report   │
//!  │ collect  │                 │ extract │               │ sort+sum  │             │ Presenter │
//!  └──────────┘                 └─────────┘               └───────────┘             └───────────┘
//!                                    │                                               │       │
//!                                    ▼                                            stdout   stderr
//!                               Tokenizer (tiktoken)
//! ```
//!
//! In human mode the boxed report goes to stderr and stdout carries only the
//! total token count. In JSON mode stdout carries one document:
//!
//! ```json
//! {
//!   "encoding": "o200k_base",
//!   "files": [ { "name": "a.txt", "tokens": 3, "lines": 1, "chars": 12 } ],
//!   "total": { "tokens": 3, "lines": 1, "chars": 12 }
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use std::io;
//! use tc::{run, RunOptions, TiktokenTokenizer};
//!
//! let mut out = Vec::new();
//! let summary = run(
//!     &RunOptions::default(),
//!     &TiktokenTokenizer::new(),
//!     io::Cursor::new("hello world"),
//!     &mut out,
//!     io::sink(),
//! )
//! .unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap().trim(), summary.total.tokens.to_string());
//! ```
//!
//! ## Modules
//!
//! - [`input`]: reading files and stdin into records
//! - [`tokenizer`]: encoding registry and the tiktoken-backed [`Tokenizer`]
//! - [`stats`]: per-input metrics, sorting and totals
//! - [`report`]: human and JSON rendering
//! - [`pipeline`]: one complete run
//! - [`config`]: configuration management
//! - [`error`]: error types and result aliases

pub mod config;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod tokenizer;

// Re-exports for convenience
pub use config::Config;
pub use error::{Result, TcError};
pub use input::{InputRecord, InvalidUtf8Policy};
pub use pipeline::{run, RunOptions};
pub use report::{OutputMode, Presenter};
pub use stats::{FileStats, Summary, Totals};
pub use tokenizer::{Encoding, TiktokenTokenizer, Tokenizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
