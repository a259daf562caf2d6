use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use colored::Colorize;
use prunefiles::{
    display_size, parse_size, prune, Candidate, FieldValue, KeepReason, PruneOptions,
    PruneOutcome, RetentionPolicy, Template,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Delete old files in a directory, keeping the newest by count and/or total size",
    long_about = None
)]
struct Args {
    /// Directory to prune (not recursive)
    folder: PathBuf,

    /// File name template, e.g. "app-{seq:d}.log". Without it every file is a candidate
    #[arg(long, env = "PRUNEFILES_MATCH_FORMAT")]
    match_format: Option<String>,

    /// Template field to sort by, highest kept first (defaults to the file stem)
    #[arg(long, env = "PRUNEFILES_ORDERBY")]
    orderby: Option<String>,

    /// Keep this many of the highest-ranked files
    #[arg(long, env = "PRUNEFILES_KEEP_COUNT")]
    keep_count: Option<usize>,

    /// Keep files while their total size fits, e.g. "500MiB" or "2GB"
    #[arg(long, env = "PRUNEFILES_KEEP_SIZE")]
    keep_size: Option<String>,

    /// Show what would be removed, but don't remove anything
    #[arg(long)]
    dry_run: bool,

    /// Log decisions and skipped entries to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn key_label(key: &Option<FieldValue>) -> String {
    key.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

fn modified_label(candidate: &Candidate) -> String {
    candidate
        .modified
        .map(|time| DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_report(outcome: &PruneOutcome, policy: &RetentionPolicy, dry_run: bool) {
    if !outcome.excluded.is_empty() {
        println!("{}", "Excluded:".bold());
        for path in &outcome.excluded {
            println!("  {}", path.display().to_string().dimmed());
        }
    }

    if !outcome.selection.keep.is_empty() {
        println!("{}", "Keep:".bold());
        for ranked in &outcome.selection.keep {
            let reason = match ranked.reason {
                KeepReason::Count => {
                    format!("keep-count {}", policy.keep_count().unwrap_or_default())
                }
                KeepReason::Size => format!(
                    "keep-size {}",
                    display_size(policy.keep_size().unwrap_or_default())
                ),
            };
            println!(
                "  {} [{}] ({}, {}) {}",
                ranked.candidate.name.green(),
                key_label(&ranked.key),
                display_size(ranked.candidate.size),
                modified_label(&ranked.candidate),
                reason.dimmed()
            );
        }
    }

    if !outcome.selection.remove.is_empty() {
        println!("{}", "Remove:".bold());
        for ranked in &outcome.selection.remove {
            println!(
                "  {} [{}] ({}, {}) exceeds {}",
                ranked.candidate.name.red(),
                key_label(&ranked.key),
                display_size(ranked.candidate.size),
                modified_label(&ranked.candidate),
                ranked.reason
            );
        }
    }

    let report = &outcome.report;
    println!("========================================");
    println!(
        "Kept {} files ({}), excluded {}",
        outcome.selection.keep.len(),
        display_size(outcome.selection.kept_size()),
        outcome.excluded.len()
    );
    if dry_run {
        println!(
            "Dry run mode: {} files ({}) skipped by --dry-run",
            report.skipped.len(),
            display_size(outcome.selection.removed_size())
        );
    } else {
        println!(
            "Removed {} files, freed {}",
            report.deleted.len(),
            display_size(report.bytes_freed).bold().red()
        );
        if !report.already_absent.is_empty() {
            println!("{} files were already gone", report.already_absent.len());
        }
    }

    for failure in &report.failed {
        eprintln!(
            "{}",
            format!("Error removing {}: {}", failure.path.display(), failure.message).red()
        );
    }
}

/// Validate the whole invocation, then prune. Returns whether every
/// deletion succeeded.
fn run(args: &Args) -> Result<bool> {
    let keep_size = args.keep_size.as_deref().map(parse_size).transpose()?;
    let template = args
        .match_format
        .as_deref()
        .map(Template::parse)
        .transpose()
        .map_err(prunefiles::Error::from)?;
    let policy = RetentionPolicy::new(args.orderby.clone(), args.keep_count, keep_size)?;
    policy.validate(template.as_ref())?;

    println!(
        "{}",
        format!("Pruning files in {}", args.folder.display()).bold()
    );

    let outcome = prune(&PruneOptions {
        dir: &args.folder,
        template: template.as_ref(),
        policy: &policy,
        dry_run: args.dry_run,
    })
    .with_context(|| format!("Failed to prune {}", args.folder.display()))?;

    print_report(&outcome, &policy, args.dry_run);

    Ok(outcome.report.is_success())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            let code = err
                .downcast_ref::<prunefiles::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
