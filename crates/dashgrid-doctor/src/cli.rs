use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dashgrid_core::Size;
use dashgrid_layout::LayoutUpdate;
use serde_json::{Value, json};
use tracing::info;

use crate::document::LayoutDocument;
use crate::error::{DoctorError, Result};
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "dashgrid-doctor",
    about = "Replay dashgrid placement operations over JSON layout documents",
    version
)]
pub struct Cli {
    /// Layout document to read, or `-` for stdin.
    #[arg(long, global = true, default_value = "-")]
    pub input: PathBuf,

    /// Log filter directive (for example `debug` or `dashgrid_layout=trace`).
    /// Falls back to `RUST_LOG`.
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// First free slot for a block of the given size.
    Place {
        #[arg(long)]
        w: u32,
        #[arg(long)]
        h: u32,
    },

    /// Compact the layout (or clamp it, with `--float`).
    Optimize {
        #[arg(long)]
        float: bool,
    },

    /// Rescale the layout to a new column count.
    Adapt {
        #[arg(long)]
        to: u32,
        /// Column count the layout was built for; defaults to the document's.
        #[arg(long)]
        from: Option<u32>,
    },

    /// Settle the layout around a dragged block at its current position.
    Resolve {
        #[arg(long)]
        dragged: String,
    },

    /// Apply one JSON-encoded edit, e.g. `{"type":"remove","id":"a"}`.
    Apply {
        #[arg(long)]
        update: String,
    },

    /// Occupancy and utilization figures.
    Stats,

    /// Report out-of-bounds blocks and overlaps; fails when any are found.
    Check,

    /// Column count for a container width.
    Columns {
        #[arg(long)]
        width: u32,
    },

    /// Reflow the layout for a container width.
    Reflow {
        #[arg(long)]
        width: u32,
    },
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level.as_deref())?;
    let document = LayoutDocument::load(&cli.input)?;
    let output = execute(&cli.command, &document);

    // A failed check still prints its report.
    let (value, outcome) = match output {
        Err(DoctorError::CheckFailed { violations }) => (
            json!(document.engine()?.check_layout(&document.blocks)),
            Err(DoctorError::CheckFailed { violations }),
        ),
        other => (other?, Ok(())),
    };
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &value)?;
    writeln!(stdout)?;
    outcome
}

/// Run one command against a loaded document and return its JSON output.
pub fn execute(command: &Commands, document: &LayoutDocument) -> Result<Value> {
    let mut engine = document.engine()?;
    let blocks = &document.blocks;
    info!(?command, columns = engine.columns(), blocks = blocks.len(), "executing");

    let value = match command {
        Commands::Place { w, h } => {
            let position = engine.find_best_position(Size::new(*w, *h), blocks)?;
            json!({ "position": position })
        }
        Commands::Optimize { float } => {
            if *float {
                let params = engine.parameters().with_float(true);
                engine.replace_parameters(params)?;
            }
            json!(engine.optimize_layout(blocks)?)
        }
        Commands::Adapt { to, from } => {
            let from = from.unwrap_or(engine.columns());
            json!(engine.adapt_layout_for_columns(blocks, from, *to)?)
        }
        Commands::Resolve { dragged } => json!(engine.resolve_conflicts(blocks, dragged)?),
        Commands::Apply { update } => {
            let update: LayoutUpdate = serde_json::from_str(update)?;
            json!(engine.apply_update(blocks, &update)?)
        }
        Commands::Stats => json!(engine.layout_stats(blocks)),
        Commands::Check => {
            let report = engine.check_layout(blocks);
            if !report.is_clean() {
                return Err(DoctorError::CheckFailed {
                    violations: report.out_of_bounds.len() + report.overlaps.len(),
                });
            }
            json!(report)
        }
        Commands::Columns { width } => json!({
            "width": width,
            "breakpoint": engine.breakpoints().classify(*width),
            "columns": engine.columns_for_width(*width),
        }),
        Commands::Reflow { width } => {
            let reflow = engine.reflow_to_width(blocks, *width)?;
            json!({
                "breakpoint": reflow.breakpoint,
                "previous_columns": reflow.previous_columns,
                "columns": reflow.columns,
                "changed": reflow.changed(),
                "blocks": reflow.blocks,
            })
        }
    };
    Ok(value)
}
