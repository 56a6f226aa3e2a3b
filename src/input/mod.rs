//! Input collection.
//!
//! Turns the positional arguments (or standard input when there are none)
//! into [`InputRecord`]s, applying the undecodable-content policy and
//! newline translation on the way.
//!
//! # Error policy
//!
//! | Condition            | Result                                        |
//! |----------------------|-----------------------------------------------|
//! | path does not exist  | [`TcError::NotFound`], run aborted            |
//! | path is a directory  | [`TcError::IsDirectory`], run aborted         |
//! | other read failure   | [`TcError::Read`], run aborted                |
//! | invalid UTF-8 (file) | skipped with a warning, or aborted (`Abort`)  |
//! | invalid UTF-8 (stdin)| [`TcError::UndecodableContent`], run aborted  |

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, TcError};

/// Record name used for standard input.
pub const STDIN_NAME: &str = "stdin";

/// One named blob of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// File path as given, or [`STDIN_NAME`].
    pub name: String,
    /// Decoded text.
    pub text: String,
}

impl InputRecord {
    /// Create a record
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// What to do with a file whose bytes are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidUtf8Policy {
    /// Warn and continue with the remaining paths (default)
    #[default]
    Skip,
    /// Fail the whole run
    Abort,
}

impl InvalidUtf8Policy {
    /// Get policy name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for InvalidUtf8Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InvalidUtf8Policy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" | "lenient" | "warn" => Ok(Self::Skip),
            "abort" | "strict" | "fail" => Ok(Self::Abort),
            _ => Err(format!("unknown invalid_utf8 policy: {s} (use skip or abort)")),
        }
    }
}

/// Options controlling how inputs are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// Undecodable file handling
    pub invalid_utf8: InvalidUtf8Policy,
    /// Translate `\r\n` and lone `\r` to `\n`
    pub universal_newlines: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            invalid_utf8: InvalidUtf8Policy::Skip,
            universal_newlines: true,
        }
    }
}

/// Collect input records for one run.
///
/// With no `paths`, all of `stdin` is read into a single record named
/// [`STDIN_NAME`]. Warnings for skipped files are written to `warnings`.
/// Paths are read in order and the first fatal error aborts the run.
pub fn collect<R: Read, W: Write>(
    paths: &[PathBuf],
    options: CollectOptions,
    stdin: R,
    warnings: &mut W,
) -> Result<Vec<InputRecord>> {
    if paths.is_empty() {
        return read_stdin(stdin, options).map(|record| vec![record]);
    }

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        match read_path(path, options) {
            Ok(record) => records.push(record),
            Err(err) if err.is_recoverable() && options.invalid_utf8 == InvalidUtf8Policy::Skip => {
                debug!(path = %path.display(), "skipping undecodable file");
                writeln!(warnings, "tc: {}: skipping binary file", path.display())?;
            },
            Err(err) => return Err(err),
        }
    }

    Ok(records)
}

/// Read a single file into a record.
///
/// The file handle lives only for the duration of this call.
pub fn read_path(path: &Path, options: CollectOptions) -> Result<InputRecord> {
    trace!(path = %path.display(), "reading file");

    let mut file = File::open(path).map_err(|e| classify(path, e))?;
    if file.metadata().map_err(|e| classify(path, e))?.is_dir() {
        return Err(TcError::IsDirectory(path.to_path_buf()));
    }

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| classify(path, e))?;
    drop(file);

    let name = path.display().to_string();
    let text = decode(bytes, &name, options)?;
    debug!(path = %name, bytes = text.len(), "read file");
    Ok(InputRecord::new(name, text))
}

fn read_stdin<R: Read>(mut stdin: R, options: CollectOptions) -> Result<InputRecord> {
    let mut bytes = Vec::new();
    stdin.read_to_end(&mut bytes)?;
    let text = decode(bytes, STDIN_NAME, options)?;
    debug!(bytes = text.len(), "read stdin");
    Ok(InputRecord::new(STDIN_NAME, text))
}

fn decode(bytes: Vec<u8>, name: &str, options: CollectOptions) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| TcError::UndecodableContent {
        name: name.to_string(),
    })?;

    Ok(if options.universal_newlines {
        normalize_newlines(text)
    } else {
        text
    })
}

fn classify(path: &Path, err: io::Error) -> TcError {
    let path = path.to_path_buf();
    match err.kind() {
        io::ErrorKind::NotFound => TcError::NotFound(path),
        _ => TcError::Read { path, source: err },
    }
}

/// Translate `\r\n` and lone `\r` line endings to `\n`.
///
/// # Example
/// ```
/// use tc::input::normalize_newlines;
///
/// assert_eq!(normalize_newlines("a\r\nb\rc\n".to_string()), "a\nb\nc\n");
/// ```
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
