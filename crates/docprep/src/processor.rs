//! The tree walk driver: filter, classify, copy, report.

use crate::dispatch::{ConflictPolicy, Dispatcher, Outcome};
use crate::error::{DocprepError, Result};
use crate::excludes::ExcludeSet;
use crate::filter::should_skip_path;
use crate::relpath;
use crate::rules::RuleSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// What to do with files no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnmatchedPolicy {
    /// Count them and move on.
    #[default]
    Ignore,
    /// Log each one at warn level.
    Warn,
    /// Carry them into the output tree verbatim, at the mirrored relative
    /// path, honoring the conflict policy.
    Copy,
}

/// Options for a processing run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Raw exclude patterns, compiled at the start of the run.
    pub excludes: Vec<String>,
    pub conflict: ConflictPolicy,
    pub unmatched: UnmatchedPolicy,
    /// Collect per-file failures and continue instead of stopping at the
    /// first error.
    pub keep_going: bool,
    /// Plan copies without writing anything.
    pub dry_run: bool,
}

impl ProcessOptions {
    pub fn new(input_root: PathBuf, output_root: PathBuf) -> Self {
        Self {
            input_root,
            output_root,
            excludes: Vec::new(),
            conflict: ConflictPolicy::default(),
            unmatched: UnmatchedPolicy::default(),
            keep_going: false,
            dry_run: false,
        }
    }
}

/// A single file that failed while the run kept going.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub rule: Option<String>,
    pub message: String,
}

/// Counters and failures for one processing run.
#[derive(Debug, Default, Serialize)]
pub struct ProcessReport {
    pub files_seen: usize,
    pub excluded: usize,
    pub copied: usize,
    pub skipped_existing: usize,
    pub unmatched: usize,
    pub unmatched_copied: usize,
    pub dry_run: bool,
    pub failures: Vec<FileFailure>,
}

/// Walk the input tree and process every surviving file.
///
/// Excludes and the rule table compile first; either failing aborts the run
/// before any filesystem work. The walk itself is single-threaded and
/// sorted by file name so that conflict-policy outcomes are reproducible
/// across filesystems.
pub fn process_tree(options: &ProcessOptions) -> Result<ProcessReport> {
    let excludes = ExcludeSet::compile(&options.excludes)?;
    let rules = RuleSet::builtin()?;

    if !options.input_root.is_dir() {
        return Err(DocprepError::InputNotADirectory(relpath::to_slash(
            &options.input_root,
        )));
    }

    let dispatcher = Dispatcher::new(
        &rules,
        &options.output_root,
        options.conflict,
        options.dry_run,
    );
    let input_root = relpath::to_slash(&options.input_root);

    let mut report = ProcessReport {
        dry_run: options.dry_run,
        ..ProcessReport::default()
    };

    info!(
        input = %input_root,
        output = %options.output_root.display(),
        dry_run = options.dry_run,
        "processing documentation tree"
    );

    for entry_result in WalkDir::new(&options.input_root).sort_by_file_name() {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                if !options.keep_going {
                    return Err(err.into());
                }
                let path = err
                    .path()
                    .map(relpath::to_slash)
                    .unwrap_or_default();
                warn!(path = %path, error = %err, "walk error");
                report.failures.push(FileFailure {
                    path,
                    rule: None,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        let walked = relpath::to_slash(entry.path());

        if should_skip_path(&walked, &input_root, &excludes) {
            if !is_dir {
                report.files_seen += 1;
                report.excluded += 1;
                debug!(path = %walked, "excluded");
            }
            continue;
        }

        if is_dir {
            continue;
        }
        report.files_seen += 1;

        let rel = match relpath::relative_to(&walked, &input_root) {
            Some(rel) => rel,
            None => {
                warn!(path = %walked, "entry outside the input root, ignoring");
                continue;
            }
        };

        if let Err(err) = dispatch_one(
            &dispatcher,
            options.unmatched,
            &mut report,
            &rel,
            entry.path(),
        ) {
            if !options.keep_going {
                return Err(err);
            }
            warn!(path = %rel, error = %err, "failed to process file");
            report.failures.push(file_failure(&rel, &err));
        }
    }

    info!(
        files = report.files_seen,
        copied = report.copied,
        excluded = report.excluded,
        unmatched = report.unmatched,
        failures = report.failures.len(),
        "processing complete"
    );

    Ok(report)
}

fn dispatch_one(
    dispatcher: &Dispatcher<'_>,
    unmatched: UnmatchedPolicy,
    report: &mut ProcessReport,
    rel: &str,
    src: &Path,
) -> Result<()> {
    match dispatcher.process(rel, src)? {
        Outcome::Copied { .. } => report.copied += 1,
        Outcome::SkippedExisting { .. } => report.skipped_existing += 1,
        Outcome::Unmatched => {
            report.unmatched += 1;
            match unmatched {
                UnmatchedPolicy::Ignore => debug!(path = %rel, "no rule matched"),
                UnmatchedPolicy::Warn => warn!(path = %rel, "no rule matched"),
                UnmatchedPolicy::Copy => match dispatcher.copy_to("unmatched", rel, src)? {
                    Outcome::Copied { .. } => report.unmatched_copied += 1,
                    Outcome::SkippedExisting { .. } => report.skipped_existing += 1,
                    Outcome::Unmatched => {}
                },
            }
        }
    }
    Ok(())
}

fn file_failure(path: &str, err: &DocprepError) -> FileFailure {
    let rule = match err {
        DocprepError::Classify(source) => Some(source.rule().to_string()),
        DocprepError::Copy { rule, .. } => Some(rule.to_string()),
        _ => None,
    };
    FileFailure {
        path: path.to_string(),
        rule,
        message: err.to_string(),
    }
}
