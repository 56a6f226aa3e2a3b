//! tc CLI binary.
//!
//! Counts tokens in files or stdin. The boxed report goes to stderr and the
//! bare total to stdout, so `tc` composes with other shell tools:
//!
//! ```text
//! $ cat notes.md | tc
//! $ tc -e cl100k_base src/*.rs
//! $ tc --json README.md | jq .total.tokens
//! ```

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, CommandFactory, Parser};
use tc::{
    config::Config, run, InvalidUtf8Policy, OutputMode, RunOptions, TcError, TiktokenTokenizer,
    Tokenizer, VERSION,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tc")]
#[command(version = VERSION, disable_version_flag = true)]
#[command(about = "Count tokens in files or stdin using tiktoken", long_about = None)]
struct Cli {
    /// Files to count tokens in. If none provided, reads from stdin.
    files: Vec<PathBuf>,

    /// Tiktoken encoding to use (default: o200k_base)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Fail on files that are not valid UTF-8 instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Do not compare the total against reference works
    #[arg(long)]
    no_references: bool,

    /// List known encodings and exit
    #[arg(long)]
    list_encodings: bool,

    /// Config file path (default: <config dir>/tc/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            let code = err.downcast_ref::<TcError>().map_or(1, TcError::exit_code);
            eprintln!("tc: {err}");
            ExitCode::from(code)
        },
    }
}

fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let tokenizer = TiktokenTokenizer::new();

    if cli.list_encodings {
        for name in tokenizer.encodings() {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }
    if cli.strict {
        config.invalid_utf8 = InvalidUtf8Policy::Abort;
    }
    if cli.no_references {
        config.references = false;
    }
    debug!(?config, "resolved configuration");

    // unknown encodings fail even when there is nothing to read
    tokenizer.validate(&config.encoding)?;

    if cli.files.is_empty() && io::stdin().is_terminal() {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let options = RunOptions::from_config(&config, cli.files).with_mode(mode);

    run(
        &options,
        &tokenizer,
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr(),
    )?;

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}
