//! sciencemap CLI
//!
//! Maintenance commands for the science map dataset:
//! - Checking links between Events, People and their indices
//! - Synthesizing stub Events for dangling references
//! - Inspecting and rebuilding index files
//! - Curation passes (images, quotes, field taxonomy)

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sciencemap_model::EntityKind;

mod check;
mod curate;
mod dataset;
mod index;
mod logging;
mod stub;

#[derive(Parser)]
#[command(name = "sciencemap")]
#[command(author, version, about = "Integrity and curation tooling for the science map dataset")]
struct Cli {
    #[command(flatten)]
    dataset: dataset::DatasetArgs,

    /// More log output on stderr (-v info, -vv debug). `RUST_LOG` wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read-only integrity reports.
    Check {
        #[command(subcommand)]
        command: CheckCommands,
    },

    /// Write stub Events for every referenced-but-unindexed Event id, then
    /// add them to the Event index. Existing files are never overwritten.
    Stub(StubArgs),

    /// Index files vs. record directories.
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },

    /// In-place curation passes over Event records.
    Curate {
        #[command(subcommand)]
        command: CurateCommands,
    },
}

#[derive(Subcommand)]
enum CheckCommands {
    /// Verify Event → Person, Person → Event and Event → Event links.
    ///
    /// Exits with status 1 when any violation is found.
    Links {
        /// Also check backtick-quoted ids inside free-text fields
        #[arg(long)]
        include_text: bool,
        /// Output format: text, json
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Exit 0 even when violations are found
        #[arg(long)]
        no_fail: bool,
    },

    /// List missing Events and People with the Events that reference them.
    Missing {
        /// Save the report as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct StubArgs {
    /// Also follow backtick-quoted ids inside free-text fields
    #[arg(long)]
    embedded_text: bool,
    /// Ignore Person records (the People index is then not required)
    #[arg(long)]
    events_only: bool,
    /// Report what would be written without touching the dataset
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum IndexCommands {
    /// Compare an index with its record directory. Exits 1 on drift.
    Status {
        #[arg(long, value_enum, default_value_t = KindArg::Events)]
        kind: KindArg,
    },

    /// Regenerate an index from its record directory.
    Rebuild {
        #[arg(long, value_enum, default_value_t = KindArg::Events)]
        kind: KindArg,
        /// Write the rebuilt index (otherwise only show the drift)
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand)]
enum CurateCommands {
    /// Set `image_url` from a JSON table `{"<event id>": "<url>"}`.
    Images {
        #[arg(long)]
        table: PathBuf,
    },

    /// Replace CJK curly double quotes with ASCII quotes in string values.
    Quotes {
        /// Event ids to fix (default: every Event on disk)
        ids: Vec<String>,
    },

    /// Fold `field` / `field_en` labels into the fixed taxonomy.
    Fields {
        #[arg(long)]
        dry_run: bool,
        /// Save the per-event change log as JSON
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// List every field label in use.
    Census {
        /// Save the census as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Events,
    People,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Events => EntityKind::Event,
            KindArg::People => EntityKind::Person,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.dataset.resolve()?;
    tracing::debug!(?config, "resolved dataset layout");

    match cli.command {
        Commands::Check { command } => match command {
            CheckCommands::Links {
                include_text,
                format,
                out,
                no_fail,
            } => check::cmd_check_links(&config, include_text, format, out.as_ref(), no_fail)?,
            CheckCommands::Missing { out } => check::cmd_check_missing(&config, out.as_ref())?,
        },
        Commands::Stub(args) => stub::cmd_stub(&config, &args)?,
        Commands::Index { command } => match command {
            IndexCommands::Status { kind } => index::cmd_index_status(&config, kind.into())?,
            IndexCommands::Rebuild { kind, write } => {
                index::cmd_index_rebuild(&config, kind.into(), write)?
            }
        },
        Commands::Curate { command } => match command {
            CurateCommands::Images { table } => curate::cmd_images(&config, &table)?,
            CurateCommands::Quotes { ids } => curate::cmd_quotes(&config, &ids)?,
            CurateCommands::Fields { dry_run, log } => {
                curate::cmd_fields(&config, dry_run, log.as_ref())?
            }
            CurateCommands::Census { out } => curate::cmd_census(&config, out.as_ref())?,
        },
    }
    Ok(())
}
