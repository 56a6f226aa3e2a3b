//! One counting run, from arguments to rendered output.
//!
//! ```text
//!  validate encoding ─> collect inputs ─> extract stats ─> aggregate ─> present
//! ```
//!
//! Nothing is written to the output stream until every input has been read
//! and counted, so a failing run leaves no partial report behind.

use std::io::{Read, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::input::{collect, CollectOptions};
use crate::report::{OutputMode, Presenter};
use crate::stats::{aggregate, extract, Summary};
use crate::tokenizer::Tokenizer;

/// Everything a run needs besides its streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Input paths; empty means standard input
    pub paths: Vec<PathBuf>,
    /// Encoding name
    pub encoding: String,
    /// Output rendering
    pub mode: OutputMode,
    /// Input collection policy
    pub collect: CollectOptions,
    /// Show the reference comparison in human mode
    pub references: bool,
}

impl RunOptions {
    /// Options for `paths` with the settings from `config`
    pub fn from_config(config: &Config, paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            encoding: config.encoding.clone(),
            mode: OutputMode::Human,
            collect: config.collect_options(),
            references: config.references,
        }
    }

    /// Set output mode
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), Vec::new())
    }
}

/// Execute one run and return the summary that was presented.
///
/// The encoding is validated before any input is opened.
pub fn run<T, R, O, E>(
    options: &RunOptions,
    tokenizer: &T,
    stdin: R,
    out: O,
    err: E,
) -> Result<Summary>
where
    T: Tokenizer + ?Sized,
    R: Read,
    O: Write,
    E: Write,
{
    tokenizer.validate(&options.encoding)?;

    let mut presenter = Presenter::new(out, err)
        .with_mode(options.mode)
        .with_references(options.references);

    let records = collect(
        &options.paths,
        options.collect,
        stdin,
        presenter.diagnostics(),
    )?;
    debug!(inputs = records.len(), encoding = %options.encoding, "collected inputs");

    let stats = records
        .iter()
        .map(|record| extract(record, tokenizer, &options.encoding))
        .collect::<Result<Vec<_>>>()?;

    let summary = aggregate(options.encoding.clone(), stats);
    info!(
        files = summary.files.len(),
        tokens = summary.total.tokens,
        "counted run"
    );

    presenter.present(&summary)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TcError;
    use crate::input::InvalidUtf8Policy;
    use crate::tokenizer::TiktokenTokenizer;
    use std::cell::Cell;
    use std::io::{self, Cursor};

    /// One token per whitespace-separated word; counts calls.
    struct WordTokenizer {
        calls: Cell<usize>,
    }

    impl WordTokenizer {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl Tokenizer for WordTokenizer {
        fn encodings(&self) -> Vec<&'static str> {
            vec!["words"]
        }

        fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u32>> {
            self.validate(encoding)?;
            self.calls.set(self.calls.get() + 1);
            Ok(text.split_whitespace().map(|_| 0).collect())
        }
    }

    fn options(paths: Vec<PathBuf>, encoding: &str) -> RunOptions {
        RunOptions {
            paths,
            encoding: encoding.to_string(),
            references: false,
            ..RunOptions::default()
        }
    }

    #[test]
    fn test_stdin_run() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = run(
            &options(Vec::new(), "o200k_base"),
            &TiktokenTokenizer::new(),
            Cursor::new("hello world"),
            &mut out,
            &mut err,
        )
        .unwrap();

        assert_eq!(summary.files.len(), 1);
        assert_eq!(summary.files[0].name, "stdin");
        let printed: usize = String::from_utf8(out).unwrap().trim().parse().unwrap();
        assert_eq!(printed, summary.total.tokens);
        assert!(printed > 0);
        assert!(String::from_utf8(err).unwrap().contains("stdin"));
    }

    #[test]
    fn test_files_sorted_with_substitute_tokenizer() {
        let dir = tempfile::tempdir().unwrap();
        let long = dir.path().join("long.txt");
        let short = dir.path().join("short.txt");
        std::fs::write(&long, "one two three four five").unwrap();
        std::fs::write(&short, "one two").unwrap();

        let tokenizer = WordTokenizer::new();
        let mut out = Vec::new();
        let summary = run(
            &options(vec![long, short], "words").with_mode(OutputMode::Json),
            &tokenizer,
            io::empty(),
            &mut out,
            io::sink(),
        )
        .unwrap();

        assert_eq!(tokenizer.calls.get(), 2);
        assert_eq!(summary.total.tokens, 7);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["encoding"], "words");
        assert!(value["files"][0]["name"]
            .as_str()
            .unwrap()
            .ends_with("short.txt"));
        assert_eq!(value["total"]["tokens"], 7);
    }

    #[test]
    fn test_unknown_encoding_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        // would fail with NotFound if it were opened
        let missing = dir.path().join("missing.txt");

        let tokenizer = WordTokenizer::new();
        let mut out = Vec::new();
        let err = run(
            &options(vec![missing], "does_not_exist"),
            &tokenizer,
            io::empty(),
            &mut out,
            io::sink(),
        )
        .unwrap_err();

        assert!(matches!(err, TcError::UnknownEncoding(_)));
        assert_eq!(tokenizer.calls.get(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_failed_run_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, "hello").unwrap();
        let missing = dir.path().join("missing.txt");

        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(
            &options(vec![present, missing], "o200k_base"),
            &TiktokenTokenizer::new(),
            io::empty(),
            &mut out,
            &mut err,
        );

        assert!(matches!(result, Err(TcError::NotFound(_))));
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_skipped_file_warning_precedes_report() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("text.txt");
        let binary = dir.path().join("binary.bin");
        std::fs::write(&text, "hello there").unwrap();
        std::fs::write(&binary, [0xffu8, 0x00, 0xfe]).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = run(
            &options(vec![binary, text], "o200k_base"),
            &TiktokenTokenizer::new(),
            io::empty(),
            &mut out,
            &mut err,
        )
        .unwrap();

        assert_eq!(summary.files.len(), 1);
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("tc: "));
        assert!(err.contains("skipping binary file"));

        let mut strict = options(
            vec![dir.path().join("binary.bin")],
            "o200k_base",
        );
        strict.collect.invalid_utf8 = InvalidUtf8Policy::Abort;
        let result = run(
            &strict,
            &TiktokenTokenizer::new(),
            io::empty(),
            io::sink(),
            io::sink(),
        );
        assert!(matches!(result, Err(TcError::UndecodableContent { .. })));
    }
}
