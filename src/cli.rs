//! Command-line surface: argument types and one handler per subcommand.
//!
//! Handlers write to any [`Write`] so tests can capture output; `main` passes
//! locked stdout/stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use jingles_core::config::Config;
use jingles_core::import::ImportSummary;
use jingles_core::schema::{self, RELATIONSHIPS};
use jingles_core::{normalize, normalize_required, EntityKind, IdGenerator, Importer};

#[derive(Parser, Debug)]
#[command(name = "jingles", about = "Jingle catalogue tooling: dates, IDs, schema and CSV import")]
pub struct Cli {
    /// Config file layered over the built-in defaults (default: ~/.config/jingles/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize date strings to canonical UTC timestamps, one per line.
    Date {
        /// Fail on the first input that cannot be normalized instead of printing `null`.
        #[arg(long)]
        required: bool,
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Generate entity IDs.
    Id {
        kind: EntityKind,
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print graph constraint and index statements.
    Schema,
    /// Convert a CSV file into JSON lines of graph properties.
    Import {
        kind: EntityKind,
        csv: PathBuf,
        /// Print a JSON summary with every row failure to stderr.
        #[arg(long)]
        report: bool,
    },
}

/// Load configuration for this invocation.
///
/// An explicit `--config` must load; the default location falls back to
/// built-ins when it cannot be read or created.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to built-in config");
            Config::defaults()
        })),
    }
}

/// Dispatch a parsed command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();

    match cli.command {
        Command::Date { required, inputs } => run_date(&mut out, &inputs, required),
        Command::Id { kind, count } => run_id(&mut out, &config.id_generator()?, kind, count),
        Command::Schema => run_schema(&mut out),
        Command::Import { kind, csv, report } => {
            let importer = Importer::new(kind, config.import.clone(), config.id_generator()?);
            run_import(&mut out, &mut stderr.lock(), &importer, &csv, report).map(|_| ())
        }
    }
}

pub fn run_date<W: Write>(out: &mut W, inputs: &[String], required: bool) -> anyhow::Result<()> {
    for input in inputs {
        if required {
            writeln!(out, "{}", normalize_required(input.as_str())?)?;
        } else {
            match normalize(input.as_str()) {
                Some(ts) => writeln!(out, "{ts}")?,
                None => writeln!(out, "null")?,
            }
        }
    }
    Ok(())
}

pub fn run_id<W: Write>(
    out: &mut W,
    ids: &IdGenerator,
    kind: EntityKind,
    count: usize,
) -> anyhow::Result<()> {
    for _ in 0..count {
        writeln!(out, "{}", ids.generate(kind))?;
    }
    Ok(())
}

pub fn run_schema<W: Write>(out: &mut W) -> anyhow::Result<()> {
    for statement in schema::schema_statements() {
        writeln!(out, "{statement};")?;
    }
    for rel in RELATIONSHIPS {
        writeln!(out, "// {rel}")?;
    }
    Ok(())
}

/// Rows go to `out` as JSON lines; with `report`, a summary goes to `err`.
pub fn run_import<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    importer: &Importer,
    csv: &Path,
    report: bool,
) -> anyhow::Result<ImportSummary> {
    let result = importer.run_path(csv)?;
    for row in &result.rows {
        serde_json::to_writer(&mut *out, &row.properties)?;
        writeln!(out)?;
    }

    let summary = result.summary();
    if report {
        let body = serde_json::json!({
            "summary": summary,
            "merge": schema::merge_statement(importer.kind()),
            "failures": result.failures,
        });
        writeln!(err, "{body}")?;
    }
    Ok(summary)
}
