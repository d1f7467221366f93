//! First-match dispatch and the copy conflict policy.

use crate::error::{DocprepError, Result};
use crate::fsops;
use crate::relpath;
use crate::rules::{DocRule, RuleSet};
use std::path::Path;
use tracing::{debug, info};

/// What to do when a computed destination file already exists.
///
/// Distinct source files can legitimately map to one destination (the
/// package overview slot is fed by both the package README and the package
/// docs), so the collision is handled per copy rather than rejected when the
/// rule table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConflictPolicy {
    /// Last write wins.
    #[default]
    Overwrite,
    /// First write wins; later copies are reported as skipped.
    Skip,
    /// An existing destination fails the file.
    Error,
}

/// Result of dispatching a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Copied {
        rule: &'static str,
        dest_rel: String,
    },
    SkippedExisting {
        rule: &'static str,
        dest_rel: String,
    },
    /// No rule matched. A normal outcome; the driver decides what it means.
    Unmatched,
}

/// Applies the rule table to one file at a time and performs the copy.
pub struct Dispatcher<'a> {
    rules: &'a RuleSet,
    output_root: &'a Path,
    conflict: ConflictPolicy,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        rules: &'a RuleSet,
        output_root: &'a Path,
        conflict: ConflictPolicy,
        dry_run: bool,
    ) -> Self {
        Self {
            rules,
            output_root,
            conflict,
            dry_run,
        }
    }

    /// First matching rule for a root-relative path, in table order.
    pub fn classify(&self, rel_path: &str) -> Option<&DocRule> {
        self.rules.classify(rel_path)
    }

    /// Classify `rel_path` and copy `src` to the resolved destination under
    /// the output root. Classification failures and copy failures are tagged
    /// with the rule name and the paths involved.
    pub fn process(&self, rel_path: &str, src: &Path) -> Result<Outcome> {
        let rule = match self.classify(rel_path) {
            Some(rule) => rule,
            None => return Ok(Outcome::Unmatched),
        };

        let dest_rel = rule.resolve_output_path(rel_path)?;
        self.copy_to(rule.name(), &dest_rel, src)
    }

    /// Copy `src` to `dest_rel` under the output root, applying the conflict
    /// policy. Also used by the driver to carry unmatched files over
    /// verbatim.
    pub fn copy_to(&self, rule: &'static str, dest_rel: &str, src: &Path) -> Result<Outcome> {
        let dest = self.output_root.join(dest_rel);

        if dest.exists() {
            match self.conflict {
                ConflictPolicy::Overwrite => {}
                ConflictPolicy::Skip => {
                    debug!(rule, dest = %dest_rel, "destination exists, skipping");
                    return Ok(Outcome::SkippedExisting {
                        rule,
                        dest_rel: dest_rel.to_string(),
                    });
                }
                ConflictPolicy::Error => {
                    return Err(DocprepError::Copy {
                        rule,
                        src: relpath::to_slash(src),
                        dest: relpath::to_slash(&dest),
                        source: std::io::Error::new(
                            std::io::ErrorKind::AlreadyExists,
                            "destination already exists",
                        ),
                    });
                }
            }
        }

        if self.dry_run {
            info!(rule, src = %src.display(), dest = %dest_rel, "would copy");
            return Ok(Outcome::Copied {
                rule,
                dest_rel: dest_rel.to_string(),
            });
        }

        fsops::copy_file(src, &dest).map_err(|source| DocprepError::Copy {
            rule,
            src: relpath::to_slash(src),
            dest: relpath::to_slash(&dest),
            source,
        })?;

        info!(rule, src = %src.display(), dest = %dest_rel, "copied");
        Ok(Outcome::Copied {
            rule,
            dest_rel: dest_rel.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, RuleSet) {
        let temp = TempDir::new().unwrap();
        let rules = RuleSet::builtin().unwrap();
        (temp, rules)
    }

    #[test]
    fn test_process_copies_a_classified_file() {
        let (temp, rules) = fixture();
        let src = temp.path().join("README.md");
        fs::write(&src, "overview").unwrap();
        let out = temp.path().join("out");

        let dispatcher = Dispatcher::new(&rules, &out, ConflictPolicy::Overwrite, false);
        let outcome = dispatcher
            .process("packages/vpc/README.md", &src)
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Copied {
                rule: "package-overview",
                dest_rel: "packages/vpc/overview.md".to_string(),
            }
        );
        assert_eq!(
            fs::read_to_string(out.join("packages/vpc/overview.md")).unwrap(),
            "overview"
        );
    }

    #[test]
    fn test_process_reports_unmatched() {
        let (temp, rules) = fixture();
        let src = temp.path().join("file.txt");
        fs::write(&src, "x").unwrap();
        let out = temp.path().join("out");

        let dispatcher = Dispatcher::new(&rules, &out, ConflictPolicy::Overwrite, false);
        let outcome = dispatcher.process("random/unrelated/file.txt", &src).unwrap();

        assert_eq!(outcome, Outcome::Unmatched);
        assert!(!out.exists());
    }

    #[test]
    fn test_conflict_error_fails_the_copy() {
        let (temp, rules) = fixture();
        let src = temp.path().join("README.md");
        fs::write(&src, "second").unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("packages/vpc")).unwrap();
        fs::write(out.join("packages/vpc/overview.md"), "first").unwrap();

        let dispatcher = Dispatcher::new(&rules, &out, ConflictPolicy::Error, false);
        let result = dispatcher.process("packages/vpc/README.md", &src);

        assert!(matches!(result, Err(DocprepError::Copy { .. })));
        assert_eq!(
            fs::read_to_string(out.join("packages/vpc/overview.md")).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_dry_run_plans_without_writing() {
        let (temp, rules) = fixture();
        let src = temp.path().join("README.md");
        fs::write(&src, "overview").unwrap();
        let out = temp.path().join("out");

        let dispatcher = Dispatcher::new(&rules, &out, ConflictPolicy::Overwrite, true);
        let outcome = dispatcher.process("packages/vpc/README.md", &src).unwrap();

        assert!(matches!(outcome, Outcome::Copied { .. }));
        assert!(!out.exists());
    }
}
