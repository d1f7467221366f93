//! docprep - documentation source-tree preprocessor
//!
//! Walks a documentation source tree, classifies each file against an
//! ordered table of path rules, rewrites the matched path into its
//! published location, and copies the bytes into an output tree. Paths can
//! be pruned from the walk with segment-oriented exclude patterns.
//!
//! The pipeline per file: exclude filter -> first-match classification ->
//! output-path rewrite -> copy. Unclassified files are a normal outcome and
//! the driver decides whether to ignore, warn about, or carry them over.

pub mod dispatch;
pub mod error;
pub mod excludes;
pub mod filter;
pub mod fsops;
pub mod processor;
pub mod relpath;
pub mod rules;

pub use dispatch::{ConflictPolicy, Dispatcher, Outcome};
pub use error::{ClassifyError, DocprepError, Result};
pub use excludes::{ExcludePattern, ExcludeSet};
pub use filter::should_skip_path;
pub use processor::{
    process_tree, FileFailure, ProcessOptions, ProcessReport, UnmatchedPolicy,
};
pub use rules::{DocRule, RuleSet};
