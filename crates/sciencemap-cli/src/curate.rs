//! `sciencemap curate ...`

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use sciencemap_curate::{
    field_census, inject_image_urls, load_image_table, normalize_event_quotes,
    standardize_fields, PassSummary,
};
use sciencemap_store::{write_json, DatasetConfig};

fn print_pass(label: &str, pass: &PassSummary, dry_run: bool) {
    let verb = if dry_run { "would change" } else { "changed" };
    println!(
        "{} {} scanned, {} {}, {} skipped",
        label.green().bold(),
        pass.scanned,
        pass.changed.len(),
        verb,
        pass.skipped.len()
    );
    for path in &pass.skipped {
        println!("  {} {}", "!".yellow(), path.display());
    }
}

pub fn cmd_images(config: &DatasetConfig, table: &Path) -> Result<()> {
    let table = load_image_table(table)?;
    let summary = inject_image_urls(config, &table)?;
    print_pass("Images", &summary.pass, false);
    for id in &summary.unknown {
        println!("  {} no record for {}", "?".yellow(), id);
    }
    Ok(())
}

pub fn cmd_quotes(config: &DatasetConfig, ids: &[String]) -> Result<()> {
    let summary = normalize_event_quotes(config, ids)?;
    print_pass("Quotes", &summary.pass, false);
    println!("  {} quote(s) replaced", summary.quotes_replaced);
    Ok(())
}

pub fn cmd_fields(config: &DatasetConfig, dry_run: bool, log: Option<&PathBuf>) -> Result<()> {
    let summary = standardize_fields(config, dry_run)?;
    for change in &summary.changes {
        println!("  {}", change.event.bold());
        if change.original_zh != change.new_zh {
            println!("    field:    {:?} → {:?}", change.original_zh, change.new_zh);
        }
        if change.original_en != change.new_en {
            println!("    field_en: {:?} → {:?}", change.original_en, change.new_en);
        }
    }
    print_pass("Fields", &summary.pass, dry_run);

    if let Some(path) = log {
        write_json(path, &summary.changes)?;
        println!("  {} {}", "→".cyan(), path.display());
    }
    Ok(())
}

pub fn cmd_census(config: &DatasetConfig, out: Option<&PathBuf>) -> Result<()> {
    let census = field_census(config)?;

    println!("{} ({})", "Chinese labels".bold(), census.fields_zh.len());
    for label in &census.fields_zh {
        println!("  - {label}");
    }
    println!("{} ({})", "English labels".bold(), census.fields_en.len());
    for label in &census.fields_en {
        println!("  - {label}");
    }
    println!("{} events carry labels", census.combinations.len());

    if let Some(path) = out {
        write_json(path, &census)?;
        println!("  {} {}", "→".cyan(), path.display());
    }
    Ok(())
}
