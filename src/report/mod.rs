//! Output rendering.
//!
//! The [`Presenter`] owns the two output streams it writes to, so a run can
//! be rendered into buffers as easily as into the process streams.
//!
//! # Human mode
//!
//! The decorated report goes to the error stream and only the bare total
//! goes to the output stream, keeping `tc file | xargs ...` style pipelines
//! working:
//!
//! ```text
//!
//!   ┌────────────────────────┐
//!   │  3  short.txt          │
//!   │ 11  long.txt           │
//!   ├────────────────────────┤
//!   │ 14  total (o200k_base) │
//!   └────────────────────────┘
//!
//! ```
//!
//! A single input gets a smaller box with its name and the total.
//!
//! # JSON mode
//!
//! The [`Summary`] is written to the output stream as one pretty-printed
//! document and nothing is written to the error stream.

mod references;

pub use references::{compare, Comparison, ReferenceText, REFERENCE_ENCODING, REFERENCE_TEXTS};

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::Result;
use crate::stats::Summary;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Boxed report on stderr, bare total on stdout (default)
    #[default]
    Human,
    /// JSON document on stdout
    Json,
}

impl OutputMode {
    /// Get mode name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output mode: {s}")),
        }
    }
}

/// Format an integer with `,` thousands separators.
///
/// # Example
/// ```
/// use tc::report::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Renders a [`Summary`] to injected output and error streams.
///
/// # Example
/// ```
/// use tc::report::{OutputMode, Presenter};
/// use tc::stats::{aggregate, FileStats};
///
/// let summary = aggregate(
///     "o200k_base",
///     vec![FileStats { name: "a.txt".into(), tokens: 3, lines: 1, chars: 12 }],
/// );
///
/// let mut presenter = Presenter::new(Vec::new(), Vec::new()).with_mode(OutputMode::Human);
/// presenter.present(&summary).unwrap();
///
/// let (out, err) = presenter.into_inner();
/// assert_eq!(out, b"3\n");
/// assert!(String::from_utf8(err).unwrap().contains("3 tokens (o200k_base)"));
/// ```
#[derive(Debug)]
pub struct Presenter<O: Write, E: Write> {
    out: O,
    err: E,
    mode: OutputMode,
    references: bool,
}

impl<O: Write, E: Write> Presenter<O, E> {
    /// Create a presenter writing to `out` and `err`
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            mode: OutputMode::Human,
            references: true,
        }
    }

    /// Set output mode
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the reference-work comparison line
    pub fn with_references(mut self, enabled: bool) -> Self {
        self.references = enabled;
        self
    }

    /// Current output mode
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Stream for diagnostics that should appear alongside the report
    pub fn diagnostics(&mut self) -> &mut E {
        &mut self.err
    }

    /// Render `summary` in the configured mode.
    pub fn present(&mut self, summary: &Summary) -> Result<()> {
        match self.mode {
            OutputMode::Human => {
                let report = self.render_report(summary);
                self.err.write_all(report.as_bytes())?;
                self.err.flush()?;
                writeln!(self.out, "{}", summary.total.tokens)?;
            },
            OutputMode::Json => {
                let json = serde_json::to_string_pretty(summary)?;
                writeln!(self.out, "{json}")?;
            },
        }
        self.out.flush()?;
        Ok(())
    }

    /// Give back the streams
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Build the boxed human-mode report.
    pub fn render_report(&self, summary: &Summary) -> String {
        let reference = if self.references {
            compare(summary.total.tokens, &summary.encoding).map(|c| c.describe())
        } else {
            None
        };

        let mut lines = vec![String::new()];
        if let [single] = summary.files.as_slice() {
            single_box(&mut lines, &single.name, summary, reference.as_deref());
        } else {
            table_box(&mut lines, summary, reference.as_deref());
        }
        lines.push(String::new());

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn single_box(lines: &mut Vec<String>, name: &str, summary: &Summary, reference: Option<&str>) {
    let label = format!(
        "{} tokens ({})",
        format_number(summary.total.tokens),
        summary.encoding
    );
    let inner = [Some(name), Some(label.as_str()), reference]
        .into_iter()
        .flatten()
        .map(width)
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(inner + 2);

    lines.push(format!("  ┌{rule}┐"));
    lines.push(format!("  │ {name:<inner$} │"));
    lines.push(format!("  ├{rule}┤"));
    lines.push(format!("  │ {label:<inner$} │"));
    if let Some(reference) = reference {
        lines.push(format!("  │ {reference:<inner$} │"));
    }
    lines.push(format!("  └{rule}┘"));
}

fn table_box(lines: &mut Vec<String>, summary: &Summary, reference: Option<&str>) {
    let total = format_number(summary.total.tokens);
    let token_width = width(&total);
    let max_name = summary
        .files
        .iter()
        .map(|f| width(&f.name))
        .max()
        .unwrap_or(0);
    let total_line = format!("{total}  total ({})", summary.encoding);
    let content = (token_width + 2 + max_name)
        .max(width(&total_line))
        .max(reference.map_or(0, width));
    let rule = "─".repeat(content);

    lines.push(format!("  ┌─{rule}─┐"));
    for file in &summary.files {
        let row = format!("{:>token_width$}  {}", format_number(file.tokens), file.name);
        lines.push(format!("  │ {row:<content$} │"));
    }
    lines.push(format!("  ├─{rule}─┤"));
    lines.push(format!("  │ {total_line:<content$} │"));
    if let Some(reference) = reference {
        lines.push(format!("  │ {reference:<content$} │"));
    }
    lines.push(format!("  └─{rule}─┘"));
}
