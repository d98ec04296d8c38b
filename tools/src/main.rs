use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tapframe_tools::{
    collect_frame_paths, compose_frame, format_inspect_pretty, inspect_frame, parse_hex,
    parse_status, split_payload, InspectReport,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tapframe-tools",
    version,
    about = "tapframe frame inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect frame layout: status, header and payload.
    ///
    /// In directory mode every matching file is reported. Files that fail to
    /// decode are logged as warnings and the run exits with an error at the end.
    Inspect {
        /// Path to the frame bytes, or a directory of frames.
        frame_path: PathBuf,
        /// Header length of the message kind.
        #[arg(long)]
        header_len: usize,
        /// Label printed with the report.
        #[arg(long)]
        kind: Option<String>,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Reject frames larger than this many bytes.
        #[arg(long)]
        max_frame_bytes: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Compose a frame from a status byte, header bytes and a payload file.
    Build {
        /// Header length of the message kind, at least 1.
        #[arg(long)]
        header_len: usize,
        /// Status byte, decimal or 0x-prefixed hex.
        #[arg(long)]
        status: String,
        /// Header bytes after the status, as hex. Zero-filled when omitted.
        #[arg(long)]
        header_rest: Option<String>,
        /// File holding the payload bytes.
        #[arg(long)]
        payload: Option<PathBuf>,
        /// Where to write the frame.
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the payload of a frame to a file.
    Split {
        /// Path to the frame bytes.
        frame_file: PathBuf,
        /// Header length of the message kind.
        #[arg(long)]
        header_len: usize,
        /// Where to write the payload.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            frame_path,
            header_len,
            kind,
            glob,
            max_frame_bytes,
            format,
        } => {
            let mut limits = wire::Limits::default();
            if let Some(max) = max_frame_bytes {
                limits.max_frame_bytes = max;
            }
            if !frame_path.is_dir() {
                let report = read_and_inspect(&frame_path, header_len, &limits)?;
                print_report(&frame_path, report, kind.as_deref(), format)?;
                return Ok(());
            }

            let mut failed = 0usize;
            for path in collect_frame_paths(&frame_path, glob.as_deref())? {
                match read_and_inspect(&path, header_len, &limits) {
                    Ok(report) => print_report(&path, report, kind.as_deref(), format)?,
                    Err(err) => {
                        warn!(path = %path.display(), "{err:#}");
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed} frame(s) failed to inspect");
            }
        }
        Command::Build {
            header_len,
            status,
            header_rest,
            payload,
            out,
        } => {
            let status = parse_status(&status)?;
            let header_rest = header_rest
                .as_deref()
                .map(parse_hex)
                .transpose()
                .context("parse header bytes")?;
            let payload = match payload {
                Some(path) => {
                    fs::read(&path).with_context(|| format!("read payload {}", path.display()))?
                }
                None => Vec::new(),
            };
            let frame = compose_frame(header_len, status, header_rest.as_deref(), &payload)?;
            fs::write(&out, &frame).with_context(|| format!("write frame {}", out.display()))?;
            info!(bytes = frame.len(), path = %out.display(), "frame written");
        }
        Command::Split {
            frame_file,
            header_len,
            out,
        } => {
            let bytes = fs::read(&frame_file)
                .with_context(|| format!("read frame {}", frame_file.display()))?;
            let payload = split_payload(bytes, header_len)?;
            fs::write(&out, &payload)
                .with_context(|| format!("write payload {}", out.display()))?;
            info!(bytes = payload.len(), path = %out.display(), "payload written");
        }
    }
    Ok(())
}

fn read_and_inspect(path: &Path, header_len: usize, limits: &wire::Limits) -> Result<InspectReport> {
    let bytes = fs::read(path).with_context(|| format!("read frame {}", path.display()))?;
    inspect_frame(&bytes, header_len, limits)
}

fn print_report(
    path: &Path,
    mut report: InspectReport,
    kind: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    report.kind = kind.map(str::to_string);
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => {
            println!("== {} ==", path.display());
            print!("{}", format_inspect_pretty(&report));
        }
    }
    Ok(())
}
