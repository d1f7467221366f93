//! Process command - classify and copy documentation files.

use crate::cli::error::HelpfulError;
use clap::Args;
use docprep::{
    process_tree, ConflictPolicy, DocprepError, ProcessOptions, ProcessReport, UnmatchedPolicy,
};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Documentation source tree to read
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output tree to write (created as needed)
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Exclude pattern, matched against walked paths (repeatable).
    /// Segments are literals, '*' (one segment), or '**' (any subpath).
    #[arg(short = 'e', long = "exclude")]
    pub excludes: Vec<String>,

    /// What to do when a destination file already exists
    #[arg(long = "on-conflict", value_enum, default_value_t = ConflictPolicy::Overwrite)]
    pub on_conflict: ConflictPolicy,

    /// What to do with files no rule matches
    #[arg(long, value_enum, default_value_t = UnmatchedPolicy::Ignore)]
    pub unmatched: UnmatchedPolicy,

    /// Record per-file failures and continue instead of stopping at the first error
    #[arg(long)]
    pub keep_going: bool,

    /// Plan copies without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the process command
pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    // Validate the input root up front for a friendlier report than the
    // library error.
    if !args.input.exists() {
        return Err(HelpfulError::path_not_found(&args.input).into());
    }
    if !args.input.is_dir() {
        return Err(HelpfulError::not_a_directory(&args.input).into());
    }

    let options = ProcessOptions {
        input_root: args.input.clone(),
        output_root: args.output.clone(),
        excludes: args.excludes.clone(),
        conflict: args.on_conflict,
        unmatched: args.unmatched,
        keep_going: args.keep_going,
        dry_run: args.dry_run,
    };

    let report = process_tree(&options).map_err(describe_error)?;

    if args.json {
        output_json(&report)?;
    } else {
        output_summary(&args, &report);
    }

    if !report.failures.is_empty() {
        anyhow::bail!("{} file(s) failed to process", report.failures.len());
    }

    Ok(())
}

fn describe_error(err: DocprepError) -> anyhow::Error {
    match err {
        DocprepError::Pattern { pattern, reason } => {
            HelpfulError::invalid_exclude_pattern(&pattern, &reason).into()
        }
        DocprepError::InputNotADirectory(path) => {
            HelpfulError::not_a_directory(std::path::Path::new(&path)).into()
        }
        other => anyhow::Error::new(other),
    }
}

/// Output as JSON
fn output_json(report: &ProcessReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Output as a plain-text summary
fn output_summary(args: &ProcessArgs, report: &ProcessReport) {
    if report.dry_run {
        println!(
            "Dry run: {} -> {}",
            args.input.display(),
            args.output.display()
        );
    } else {
        println!(
            "Processed: {} -> {}",
            args.input.display(),
            args.output.display()
        );
    }
    println!();
    println!("Files seen:       {}", report.files_seen);
    println!("Excluded:         {}", report.excluded);
    println!("Copied:           {}", report.copied);
    println!("Skipped existing: {}", report.skipped_existing);
    println!("Unmatched:        {}", report.unmatched);
    if report.unmatched_copied > 0 {
        println!("Unmatched copied: {}", report.unmatched_copied);
    }

    if !report.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &report.failures {
            match &failure.rule {
                Some(rule) => println!("  {} [{}]: {}", failure.path, rule, failure.message),
                None => println!("  {}: {}", failure.path, failure.message),
            }
        }
    }
}
