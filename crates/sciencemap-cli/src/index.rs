//! `sciencemap index status` / `sciencemap index rebuild`

use anyhow::{anyhow, Result};
use colored::Colorize;

use sciencemap_model::EntityKind;
use sciencemap_store::{index_drift, rebuild_index, DatasetConfig, IndexDrift};

fn print_drift(drift: &IndexDrift) {
    println!(
        "{} index: {} ids, {} records on disk",
        drift.kind, drift.indexed, drift.on_disk
    );
    for id in &drift.unbacked {
        println!("  {} indexed, no record: {}", "-".red(), id);
    }
    for id in &drift.unindexed {
        println!("  {} record, not indexed: {}", "+".yellow(), id);
    }
}

pub fn cmd_index_status(config: &DatasetConfig, kind: EntityKind) -> Result<()> {
    let drift = index_drift(config, kind)?;
    print_drift(&drift);
    if drift.is_clean() {
        println!("{}", "✓ Index matches the record directory.".green().bold());
        return Ok(());
    }
    Err(anyhow!(
        "{} index drift: {} unbacked, {} unindexed",
        kind,
        drift.unbacked.len(),
        drift.unindexed.len()
    ))
}

pub fn cmd_index_rebuild(config: &DatasetConfig, kind: EntityKind, write: bool) -> Result<()> {
    let path = config.index_path(kind);
    if !write {
        // The current index may not exist yet; that is what rebuild is for.
        if path.exists() {
            print_drift(&index_drift(config, kind)?);
        }
        println!("Dry run; pass --write to replace {}", path.display());
        return Ok(());
    }

    eprintln!("{} {} index", "Rebuilding".green().bold(), kind);
    let ids = rebuild_index(config, kind)?;
    println!("  {} {} ({} ids)", "→".cyan(), path.display(), ids.len());
    Ok(())
}
