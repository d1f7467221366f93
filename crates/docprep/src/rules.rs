//! Document classification rules.
//!
//! Doc-kind detection is one ordered table of uniform rules rather than a
//! type per kind: each rule owns a compiled regex, the number of capture
//! groups that regex is expected to have, and a template that renders the
//! output-relative path from the captures. First match wins, so overlaps
//! between patterns are resolved by table order alone.

use crate::error::{ClassifyError, DocprepError, Result};
use crate::relpath;
use regex::{Captures, Regex};

/// Renders the output-relative path from validated captures.
type Template = fn(&Captures) -> String;

/// One classification rule: a source-path pattern and its output template.
pub struct DocRule {
    name: &'static str,
    pattern: Regex,
    capture_groups: usize,
    template: Template,
    template_hint: &'static str,
}

impl DocRule {
    /// Compile a rule. `capture_groups` is the number of capture groups the
    /// pattern is expected to have. The expectation is checked when a path
    /// is resolved, so a mismatched definition surfaces as a configuration
    /// defect instead of a silently wrong output path.
    pub fn new(
        name: &'static str,
        pattern: &str,
        capture_groups: usize,
        template: Template,
        template_hint: &'static str,
    ) -> Result<DocRule> {
        let pattern = Regex::new(pattern).map_err(|err| DocprepError::Rule {
            rule: name,
            reason: err.to_string(),
        })?;

        Ok(DocRule {
            name,
            pattern,
            capture_groups,
            template,
            template_hint,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Human-readable shape of the output path, for listings.
    pub fn template_hint(&self) -> &'static str {
        self.template_hint
    }

    pub fn capture_groups(&self) -> usize {
        self.capture_groups
    }

    /// Regex test only, no capture extraction.
    pub fn is_match(&self, rel_path: &str) -> bool {
        self.pattern.is_match(&relpath::normalize(rel_path))
    }

    /// Re-run the regex, check the capture-group contract, and render the
    /// output-relative path for a matching input.
    pub fn resolve_output_path(
        &self,
        rel_path: &str,
    ) -> std::result::Result<String, ClassifyError> {
        let rel_path = relpath::normalize(rel_path);
        let captures = self
            .pattern
            .captures(&rel_path)
            .ok_or_else(|| ClassifyError::NoMatch {
                rule: self.name,
                path: rel_path.clone(),
            })?;

        // Group 0 is the whole match, not a capture group.
        let found = captures.len() - 1;
        if found != self.capture_groups {
            return Err(ClassifyError::CaptureContract {
                rule: self.name,
                path: rel_path,
                expected: self.capture_groups,
                found,
            });
        }

        Ok((self.template)(&captures))
    }
}

/// The ordered rule table. Order is part of the contract: patterns are not
/// mutually exclusive and the first match decides.
pub struct RuleSet {
    rules: Vec<DocRule>,
}

impl RuleSet {
    /// Build the built-in rule table. Patterns compile here, once per run;
    /// a pattern that fails to compile aborts the run.
    pub fn builtin() -> Result<RuleSet> {
        let rules = vec![
            DocRule::new(
                "package-overview",
                r"^packages/([\w -]+)/README\.md$",
                1,
                |caps| format!("packages/{}/overview.md", &caps[1]),
                "packages/<package>/overview.md",
            )?,
            DocRule::new(
                "package-doc",
                r"^packages/([\w -]+)/modules/_docs/([\w ./-]+\.md)$",
                2,
                |caps| format!("packages/{}/overview.md", &caps[1]),
                "packages/<package>/overview.md",
            )?,
            DocRule::new(
                "module-image",
                r"^packages/([\w -]+)/modules/_images/([\w -]+\.(jpg|jpeg|gif|png|svg))$",
                3,
                |caps| format!("packages/{}/_images/{}", &caps[1], &caps[2]),
                "packages/<package>/_images/<image>",
            )?,
            DocRule::new(
                "module-overview",
                r"^packages/([\w -]+)/modules/([\w -]+)/README\.md$",
                2,
                |caps| format!("packages/{}/{}/overview.md", &caps[1], &caps[2]),
                "packages/<package>/<module>/overview.md",
            )?,
            DocRule::new(
                "module-doc",
                r"^packages/([\w -]+)/modules/([\w -]+)/([\w ./-]+\.md)$",
                3,
                |caps| format!("packages/{}/{}/{}", &caps[1], &caps[2], &caps[3]),
                "packages/<package>/<module>/<doc>",
            )?,
        ];

        Ok(RuleSet { rules })
    }

    pub fn rules(&self) -> &[DocRule] {
        &self.rules
    }

    /// First rule whose pattern matches, in table order. `None` means "not a
    /// classified doc file", which is a normal outcome, not an error.
    pub fn classify(&self, rel_path: &str) -> Option<&DocRule> {
        let rel_path = relpath::normalize(rel_path);
        self.rules.iter().find(|rule| rule.pattern.is_match(&rel_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> RuleSet {
        RuleSet::builtin().expect("built-in rules should compile")
    }

    fn classify_name<'a>(rules: &'a RuleSet, path: &str) -> Option<&'a str> {
        rules.classify(path).map(|rule| rule.name())
    }

    fn resolve(rules: &RuleSet, path: &str) -> String {
        rules
            .classify(path)
            .expect("path should classify")
            .resolve_output_path(path)
            .expect("path should resolve")
    }

    #[test]
    fn test_package_overview_round_trip() {
        let rules = builtin();
        assert_eq!(
            resolve(&rules, "packages/vpc/README.md"),
            "packages/vpc/overview.md"
        );
        // Separator noise normalizes away before matching.
        assert_eq!(
            resolve(&rules, "packages//vpc/./README.md"),
            "packages/vpc/overview.md"
        );
        assert_eq!(
            resolve(&rules, "packages/vpc/README.md/"),
            "packages/vpc/overview.md"
        );
        assert_eq!(
            resolve(&rules, "packages/package vpc/README.md"),
            "packages/package vpc/overview.md"
        );
    }

    #[test]
    fn test_package_doc_targets_the_overview_slot() {
        let rules = builtin();
        assert_eq!(
            classify_name(&rules, "packages/vpc/modules/_docs/guide.md"),
            Some("package-doc")
        );
        assert_eq!(
            resolve(&rules, "packages/vpc/modules/_docs/subdir/guide.md"),
            "packages/vpc/overview.md"
        );
    }

    #[test]
    fn test_module_image_preserves_filename_and_extension() {
        let rules = builtin();
        assert_eq!(
            resolve(&rules, "packages/vpc/modules/_images/arch-diagram.png"),
            "packages/vpc/_images/arch-diagram.png"
        );
        assert_eq!(
            resolve(&rules, "packages/vpc/modules/_images/photo.jpeg"),
            "packages/vpc/_images/photo.jpeg"
        );
        // Extensions are matched case-sensitively, as defined.
        assert_eq!(
            classify_name(&rules, "packages/vpc/modules/_images/arch.PNG"),
            None
        );
    }

    #[test]
    fn test_module_overview_renames_readme() {
        let rules = builtin();
        assert_eq!(
            classify_name(&rules, "packages/vpc/modules/vpc-app/README.md"),
            Some("module-overview")
        );
        assert_eq!(
            resolve(&rules, "packages/vpc/modules/vpc-app/README.md"),
            "packages/vpc/vpc-app/overview.md"
        );
    }

    #[test]
    fn test_module_doc_keeps_the_doc_path() {
        let rules = builtin();
        assert_eq!(
            classify_name(&rules, "packages/vpc/modules/vpc-app/usage.md"),
            Some("module-doc")
        );
        assert_eq!(
            resolve(&rules, "packages/vpc/modules/vpc-app/docs/usage.md"),
            "packages/vpc/vpc-app/docs/usage.md"
        );
    }

    #[test]
    fn test_first_match_wins_on_overlapping_patterns() {
        let rules = builtin();
        // Matches both package-doc and module-doc; table order decides,
        // and it decides the same way every time.
        for _ in 0..3 {
            assert_eq!(
                classify_name(&rules, "packages/x/modules/_docs/guide.md"),
                Some("package-doc")
            );
        }
    }

    #[test]
    fn test_unmatched_paths_classify_to_none() {
        let rules = builtin();
        for path in [
            "random/unrelated/file.txt",
            "packages/vpc/notes.txt",
            "README.md",
            "packages/vpc/modules/_images/readme.txt",
        ] {
            assert_eq!(classify_name(&rules, path), None, "path {:?}", path);
        }
    }

    #[test]
    fn test_resolve_on_non_matching_path_fails() {
        let rules = builtin();
        let rule = &rules.rules()[0];
        match rule.resolve_output_path("random/unrelated/file.txt") {
            Err(ClassifyError::NoMatch { rule, path }) => {
                assert_eq!(rule, "package-overview");
                assert_eq!(path, "random/unrelated/file.txt");
            }
            other => panic!("expected NoMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_contract_mismatch_is_a_distinct_error() {
        let bad = DocRule::new(
            "bad-rule",
            r"^x/(\w+)/y$",
            2,
            |caps| caps[1].to_string(),
            "x/<a>/y",
        )
        .expect("pattern should compile");

        match bad.resolve_output_path("x/abc/y") {
            Err(ClassifyError::CaptureContract {
                rule,
                expected,
                found,
                ..
            }) => {
                assert_eq!(rule, "bad-rule");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected CaptureContract, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_pattern_compile_failure_is_fatal() {
        let result = DocRule::new(
            "broken",
            r"^packages/([\w -]+$",
            1,
            |caps| caps[0].to_string(),
            "broken",
        );
        assert!(matches!(result, Err(DocprepError::Rule { rule: "broken", .. })));
    }
}
