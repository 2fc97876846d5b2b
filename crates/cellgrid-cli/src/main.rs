//! cellgrid CLI - inspect, retype and export views stored as JSON snapshots

use anyhow::{bail, Context, Result};
use cellgrid::prelude::*;
use cellgrid::{LineTerminator, UnsafeReason};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Views are read from single-view snapshot files
const VIEW: &str = "view";

#[derive(Parser)]
#[command(name = "cellgrid")]
#[command(author, version, about = "Typed data grid view tool")]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the columns and rows of a view
    View {
        /// View snapshot (JSON)
        snapshot: PathBuf,
    },

    /// Check whether a column can change its cell type
    Retype {
        /// View snapshot (JSON)
        snapshot: PathBuf,

        /// Column id
        #[arg(short, long)]
        column: String,

        /// Target cell type (e.g. number, date_time, multi-select)
        #[arg(short, long)]
        to: CellType,

        /// Write the new type back to the snapshot when the check passes
        #[arg(long)]
        apply: bool,

        /// Also apply retypes that pass with a warning
        #[arg(long)]
        accept_warnings: bool,
    },

    /// Export a view to CSV on stdout or a file
    #[command(alias = "csv")]
    Export {
        /// View snapshot (JSON)
        snapshot: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Leave out the header row
        #[arg(long)]
        no_header: bool,

        /// Also export hidden columns
        #[arg(long)]
        include_hidden: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::View { snapshot } => show_view(&snapshot),
        Commands::Retype {
            snapshot,
            column,
            to,
            apply,
            accept_warnings,
        } => retype(&snapshot, &column, to, apply, accept_warnings),
        Commands::Export {
            snapshot,
            output,
            delimiter,
            no_header,
            include_hidden,
        } => export(
            &snapshot,
            output.as_deref(),
            delimiter,
            !no_header,
            include_hidden,
        ),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open(path: &Path, options: ServiceOptions) -> Result<ViewService<MemoryViewStore>> {
    let snapshot = ViewSnapshot::read_file(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), columns = snapshot.columns.len(), rows = snapshot.rows.len(), "loaded snapshot");
    Ok(ViewService::with_options(
        MemoryViewStore::with_view(VIEW, snapshot),
        VIEW,
        options,
    ))
}

fn show_view(path: &Path) -> Result<()> {
    let service = open(path, ServiceOptions::default())?;
    let view = service.deserialize_view().context("Failed to load view")?;

    println!("File: {}", path.display());
    println!("Columns: {}", view.columns.len());
    for column in &view.columns {
        println!(
            "  {}\t{}\t{}{}{}",
            column.descriptor.id,
            column.key(),
            column.cell_type(),
            if column.behavior.editable { "" } else { "\tread-only" },
            if column.descriptor.hidden { "\thidden" } else { "" },
        );
    }

    println!();
    println!("Rows: {}", view.rows.len());
    let header: Vec<_> = view.columns.iter().map(|c| c.descriptor.name.as_str()).collect();
    println!("_id\tindex\t{}", header.join("\t"));
    for row in &view.rows {
        let cells: Vec<_> = view
            .columns
            .iter()
            .map(|c| view.export_value(c.key(), row))
            .collect();
        println!(
            "{}\t{}\t{}",
            row.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            row.index.map(|i| i.to_string()).unwrap_or_default(),
            cells.join("\t")
        );
    }

    Ok(())
}

fn retype(
    path: &Path,
    column: &str,
    to: CellType,
    apply: bool,
    accept_warnings: bool,
) -> Result<()> {
    let options = ServiceOptions::new().with_accept_warnings(accept_warnings);
    let mut service = open(path, options)?;
    let outcome = service
        .request_retype(column, to)
        .with_context(|| format!("Failed to check retype of column '{}'", column))?;

    match &outcome.report {
        RetypeReport::Safe { warning: None } => println!("Safe: column '{}' can become {}", column, to),
        RetypeReport::Safe {
            warning: Some(warning),
        } => {
            println!("Safe with warning: {}", warning);
            if !accept_warnings {
                println!("Pass --accept-warnings to apply");
            }
        }
        RetypeReport::Unsafe { rows, reason } => {
            println!("Unsafe: {}", reason);
            if let UnsafeReason::Conflict { .. } = reason {
                let ids: Vec<_> = rows.iter().map(ToString::to_string).collect();
                println!("Rows that would lose data: {}", ids.join(", "));
            }
        }
    }

    if !apply {
        return Ok(());
    }
    if !outcome.applied {
        bail!("Retype of column '{}' to {} was not applied", column, to);
    }

    let snapshot = service
        .store()
        .view(VIEW)
        .context("View disappeared from store")?;
    snapshot
        .write_file(path)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    eprintln!("Updated '{}'", path.display());

    Ok(())
}

fn export(
    path: &Path,
    output: Option<&Path>,
    delimiter: char,
    header: bool,
    include_hidden: bool,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    let options = CsvWriteOptions::default()
        .with_delimiter(delimiter as u8)
        .with_header(header)
        .with_hidden_columns(include_hidden)
        .with_line_terminator(LineTerminator::LF);
    let service = open(path, ServiceOptions::default())?;

    if let Some(output_path) = output {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create '{}'", output_path.display()))?;
        service
            .export_csv(BufWriter::new(file), &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote '{}'", output_path.display());
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        service
            .export_csv(&mut lock, &options)
            .context("Failed to write to stdout")?;
        lock.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}
