use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cigi_tools::{
    catalog_rows, convert_datagram, format_report_pretty, inspect_datagram, load_datagram,
    parse_version,
};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::Pattern;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wire::{CigiVersion, Limits};

#[derive(Parser)]
#[command(
    name = "cigi-tools",
    version,
    about = "CIGI datagram inspection and conversion tools"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the packets of one datagram, or of every datagram in a directory.
    Inspect {
        /// Datagram file (raw bytes, or hex text with a .hex/.txt extension).
        path: PathBuf,
        /// CIGI version the datagram was sent in.
        #[arg(long = "cigi", value_parser = parse_version, default_value = "3.3")]
        version: CigiVersion,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Limit the number of inspected datagrams.
        #[arg(long)]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Re-encode a datagram for another CIGI version.
    Convert {
        /// Datagram file to convert.
        input: PathBuf,
        /// Version of the input datagram.
        #[arg(long, value_parser = parse_version)]
        from: CigiVersion,
        /// Version to convert to.
        #[arg(long, value_parser = parse_version)]
        to: CigiVersion,
        /// Output file; hex is printed to stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the packets a CIGI version defines.
    Catalog {
        #[arg(long = "cigi", value_parser = parse_version, default_value = "3.3")]
        version: CigiVersion,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let limits = Limits::default();
    match cli.command {
        Command::Inspect {
            path,
            version,
            glob,
            limit,
            format,
        } => {
            if path.is_dir() {
                let mut entries = collect_datagram_entries(&path, glob.as_deref())?;
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                tracing::info!(
                    count = entries.len(),
                    dir = %path.display(),
                    "inspecting datagrams"
                );
                for entry in entries {
                    println!("== {} ==", entry.display());
                    inspect_file(&entry, version, &limits, format)?;
                }
            } else {
                inspect_file(&path, version, &limits, format)?;
            }
        }
        Command::Convert {
            input,
            from,
            to,
            output,
        } => {
            let bytes = load_datagram(&input)?;
            tracing::info!(%from, %to, bytes = bytes.len(), "converting datagram");
            let converted = convert_datagram(&bytes, from, to, &limits)?;
            match output {
                Some(path) => fs::write(&path, &converted)
                    .with_context(|| format!("write datagram {}", path.display()))?,
                None => println!("{}", to_hex(&converted)),
            }
        }
        Command::Catalog { version, format } => {
            let rows = catalog_rows(version);
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&rows).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    println!("{version}: {} packets", rows.len());
                    for row in &rows {
                        println!(
                            "  {:>3}  {:<36} {:>9} bytes  ({})",
                            row.id, row.kind, row.size, row.layout
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn inspect_file(
    path: &Path,
    version: CigiVersion,
    limits: &Limits,
    format: OutputFormat,
) -> Result<()> {
    let bytes = load_datagram(path)?;
    let report = inspect_datagram(&bytes, version, limits);
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print!("{}", format_report_pretty(&report)),
    }
    Ok(())
}

fn collect_datagram_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = glob
        .map(|value| Pattern::new(value).context("invalid glob pattern"))
        .transpose()?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        entries.push(path);
    }
    entries.sort();
    Ok(entries)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|line| {
            line.iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
