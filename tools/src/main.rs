use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::Measurement;
use glob::Pattern;
use pnt_tools::{
    format_report_pretty, format_samples, format_schema_pretty, inspect_measurement, report_json,
    schema_json, DEFAULT_SURFACE_THRESHOLD_N,
};

#[derive(Parser)]
#[command(
    name = "pnt-tools",
    version,
    about = "PNT measurement file inspection and editing tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the header field table.
    Schema {
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// Decode a file, or every matching file of a directory, and print a report.
    Inspect {
        /// Path to a .pnt file or a directory.
        path: PathBuf,
        /// Glob filter when inspecting a directory.
        #[arg(long, default_value = "*.pnt")]
        glob: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Force in newtons that marks the snow surface.
        #[arg(long, default_value_t = DEFAULT_SURFACE_THRESHOLD_N)]
        surface_threshold: f64,
        /// Also print the depth/force profile (pretty format only).
        #[arg(long)]
        data: bool,
    },
    /// Replace the comment of a file and re-encode it.
    Comment {
        /// Path to the .pnt file.
        path: PathBuf,
        /// New comment text.
        text: String,
        /// Write to this path instead of in place.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Schema { format } => match format {
            Format::Pretty => print!("{}", format_schema_pretty()),
            Format::Json => {
                let json = schema_json().context("serialize schema")?;
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        },
        Command::Inspect {
            path,
            glob,
            format,
            surface_threshold,
            data,
        } => {
            let files = if path.is_dir() {
                collect_files(&path, &glob)?
            } else {
                vec![path]
            };
            for file in files {
                inspect_file(&file, format, surface_threshold, data)?;
            }
        }
        Command::Comment { path, text, output } => {
            let mut measurement = Measurement::from_file(&path)
                .with_context(|| format!("decode {}", path.display()))?;
            measurement.header.set_comment(text);
            let target = output.unwrap_or(path);
            measurement
                .write_file(&target)
                .with_context(|| format!("encode {}", target.display()))?;
            tracing::info!(path = %target.display(), "wrote measurement");
        }
    }
    Ok(())
}

fn inspect_file(path: &Path, format: Format, surface_threshold: f64, data: bool) -> Result<()> {
    let measurement =
        Measurement::from_file(path).with_context(|| format!("decode {}", path.display()))?;
    let report = inspect_measurement(&measurement, surface_threshold);
    match format {
        Format::Pretty => {
            println!("== {} ==", path.display());
            print!("{}", format_report_pretty(&report));
            if data {
                println!("{}", format_samples(&measurement.samples));
            }
        }
        Format::Json => {
            let json = report_json(&report, &measurement.header).context("serialize report")?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

/// Files of `dir` whose name or path matches `glob`, sorted by path.
fn collect_files(dir: &Path, glob: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(glob).context("invalid glob pattern")?;
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name));
        if matches_name || pattern.matches_path(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
