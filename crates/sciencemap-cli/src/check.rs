//! `sciencemap check links` / `sciencemap check missing`

use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::PathBuf;

use sciencemap_integrity::{check_links, find_missing, render_report_text, CheckOptions};
use sciencemap_store::{write_json, DatasetConfig};

use crate::ReportFormat;

pub fn cmd_check_links(
    config: &DatasetConfig,
    include_text: bool,
    format: ReportFormat,
    out: Option<&PathBuf>,
    no_fail: bool,
) -> Result<()> {
    eprintln!(
        "{} {}",
        "Checking links".green().bold(),
        config
            .events_dir
            .parent()
            .unwrap_or(config.events_dir.as_path())
            .display()
    );
    let report = check_links(config, CheckOptions { include_text })?;

    let rendered = match format {
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        ReportFormat::Text => render_report_text(&report),
    };
    match out {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            println!("wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    // Keep stdout parseable when it carries the JSON report.
    let summary = if report.is_clean() {
        format!("{}", "✓ All links are valid.".green().bold())
    } else {
        format!(
            "{} {} broken link(s) found.",
            "✗".red().bold(),
            report.error_count().to_string().bold()
        )
    };
    if format == ReportFormat::Json && out.is_none() {
        eprintln!("{summary}");
    } else {
        println!("{summary}");
    }

    if report.is_clean() || no_fail {
        return Ok(());
    }
    Err(anyhow!(
        "link check found {} violation(s)",
        report.error_count()
    ))
}

pub fn cmd_check_missing(config: &DatasetConfig, out: Option<&PathBuf>) -> Result<()> {
    let report = find_missing(config)?;

    println!("{}", "Missing events".bold());
    for (id, sources) in &report.missing_events {
        let sources: Vec<&str> = sources.iter().map(String::as_str).collect();
        println!("  - {} (referenced by {})", id.yellow(), sources.join(", "));
    }
    println!("  total: {}", report.missing_events.len());

    println!("{}", "Missing people".bold());
    for (id, sources) in &report.missing_people {
        let sources: Vec<&str> = sources.iter().map(String::as_str).collect();
        println!("  - {} (referenced by {})", id.yellow(), sources.join(", "));
    }
    println!("  total: {}", report.missing_people.len());

    if let Some(path) = out {
        write_json(path, &report)?;
        println!("  {} {}", "→".cyan(), path.display());
    }
    Ok(())
}
