//! `sciencemap stub`

use anyhow::Result;
use colored::Colorize;

use sciencemap_integrity::{synthesize_stubs, ScanOptions, StubOptions};
use sciencemap_store::DatasetConfig;

use crate::StubArgs;

pub fn cmd_stub(config: &DatasetConfig, args: &StubArgs) -> Result<()> {
    let options = StubOptions {
        scan: ScanOptions {
            embedded_text: args.embedded_text,
            events_only: args.events_only,
        },
        dry_run: args.dry_run,
    };
    let summary = synthesize_stubs(config, options)?;

    println!("Known events: {}", summary.known_before);
    for id in &summary.rejected {
        println!("  {} not a valid record id, skipped: {}", "!".red(), id);
    }
    if summary.missing.is_empty() {
        println!("{}", "✓ No missing events.".green().bold());
        return Ok(());
    }

    let verb = if summary.dry_run { "Would create" } else { "Created" };
    for id in &summary.created {
        println!("  {} {} {}", "+".green(), verb.to_lowercase(), id);
    }
    for id in &summary.already_on_disk {
        println!("  {} exists, indexing only: {}", "=".yellow(), id);
    }
    println!(
        "{} {} stub(s), {} already on disk",
        verb.green().bold(),
        summary.created.len(),
        summary.already_on_disk.len()
    );

    if summary.index_written {
        println!(
            "  {} {} ({} ids)",
            "→".cyan(),
            config.events_index.display(),
            summary.index_size
        );
    } else {
        println!(
            "Index not written (dry run); it would hold {} ids.",
            summary.index_size
        );
    }
    Ok(())
}
