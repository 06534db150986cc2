//! `json-canon`: print the canonical form or digest of a JSON document.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use json_canon::{
    canonicalize, digest_with, Algorithm, CanonicalOptions, Indent, Replacement, Value,
};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "json-canon")]
#[command(about = "Deterministic canonical JSON and content digests.")]
#[command(version)]
struct Cli {
    /// Input file; stdin when absent or `-`.
    file: Option<PathBuf>,

    /// Indentation: a space count, `tab` or `compact`.
    #[arg(long, value_name = "N", conflicts_with = "indent_str")]
    indent: Option<Indent>,

    /// Literal indent string (at most 10 characters are used).
    #[arg(long = "indent-str", value_name = "S")]
    indent_str: Option<String>,

    /// Print the digest under this hash instead of the canonical text.
    #[arg(long, value_name = "ALG")]
    digest: Option<String>,

    /// Write raw digest bytes instead of hex.
    #[arg(long, requires = "digest")]
    raw: bool,

    /// Drop the property at this key path, e.g. `.items[0].id`.
    #[arg(long, value_name = "KEY_PATH")]
    omit: Vec<String>,

    /// Keep only properties with this name, at every level.
    #[arg(long, value_name = "KEY")]
    only: Vec<String>,

    /// Sort keys in reverse byte order.
    #[arg(long)]
    descending: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Canon(#[from] json_canon::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "json-canon failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    // Resolve the algorithm before reading any input.
    let algorithm = cli
        .digest
        .as_deref()
        .map(str::parse::<Algorithm>)
        .transpose()?;

    let input = read_input(cli.file.as_ref())?;
    let json: serde_json::Value = serde_json::from_slice(&input)?;
    let value = Value::from(json);
    tracing::debug!(bytes = input.len(), kind = value.kind(), "parsed input");

    let options = build_options(cli);
    let mut stdout = io::stdout().lock();
    match algorithm {
        Some(algorithm) => {
            let hash = digest_with(&value, algorithm, &options)?;
            if cli.raw {
                stdout.write_all(hash.as_bytes())
            } else {
                writeln!(stdout, "{hash}")
            }
        }
        None => {
            let bytes = canonicalize(&value, &options)?;
            stdout.write_all(&bytes)
        }
    }
    .and_then(|()| stdout.flush())
    .map_err(CliError::Write)
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::new();
    match file {
        Some(path) if path.as_os_str() != "-" => {
            buf = fs::read(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })?;
        }
        _ => {
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
        }
    }
    Ok(buf)
}

fn build_options(cli: &Cli) -> CanonicalOptions<'_> {
    let indent = match (&cli.indent, &cli.indent_str) {
        (_, Some(s)) => Indent::custom(s),
        (Some(indent), None) => indent.clone(),
        (None, None) => Indent::Compact,
    };
    let mut options = CanonicalOptions::new().indent(indent);

    if !cli.omit.is_empty() || !cli.only.is_empty() {
        let omit = &cli.omit;
        let only = &cli.only;
        options = options.replacer(move |prop| {
            let omitted = omit.iter().any(|p| p == prop.key_path);
            let filtered = !only.is_empty() && !only.iter().any(|k| k == prop.key);
            if omitted || filtered {
                Replacement::Omit
            } else {
                Replacement::Keep
            }
        });
    }
    if cli.descending {
        options = options.sorter(|a, b, _| b.cmp(a));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn indent_flag_parses_counts_and_names() {
        let cli = Cli::try_parse_from(["json-canon", "--indent", "4"]).unwrap();
        assert_eq!(cli.indent, Some(Indent::Spaces(4)));
        let cli = Cli::try_parse_from(["json-canon", "--indent", "tab"]).unwrap();
        assert_eq!(cli.indent, Some(Indent::custom("\t")));
        assert!(Cli::try_parse_from(["json-canon", "--indent", "wide"]).is_err());
    }

    #[test]
    fn filters_combine() {
        let cli = Cli::try_parse_from([
            "json-canon",
            "--omit",
            ".a.x",
            "--only",
            "a",
            "--only",
            "x",
            "--only",
            "y",
        ])
        .unwrap();
        let value = Value::from(serde_json::json!({"a": {"x": 1, "y": 2}, "b": 3}));
        let out = canonicalize(&value, &build_options(&cli)).unwrap();
        assert_eq!(out, br#"{"a":{"y":2}}"#);
    }
}
