//! Walk-side path filtering.

use crate::excludes::ExcludeSet;
use crate::relpath;

/// Decide whether a walked path should be skipped before classification.
///
/// A path is skipped when it is empty (or just `.`), when it is the input
/// root itself, or when the exclude set matches it. Exclude patterns are
/// matched against the path exactly as the walk produced it, input-root
/// prefix included; the root-relative remainder is only used later, for
/// classification.
pub fn should_skip_path(path: &str, input_root: &str, excludes: &ExcludeSet) -> bool {
    let path = relpath::normalize(path);
    if path.is_empty() {
        return true;
    }

    if let Some(rest) = relpath::relative_to(&path, input_root) {
        if rest.is_empty() {
            return true;
        }
    }

    excludes.matches(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(path: &str, root: &str, patterns: &[&str]) -> bool {
        let excludes = ExcludeSet::compile(patterns).expect("patterns should compile");
        should_skip_path(path, root, &excludes)
    }

    #[test]
    fn test_skips_empty_and_dot_paths() {
        assert!(skip("", "", &[]));
        assert!(skip(".", ".", &[]));
        assert!(skip("", "foo", &[]));
    }

    #[test]
    fn test_skips_the_input_root_itself() {
        assert!(skip("foo/bar/baz", "foo/bar/baz", &[]));
        assert!(skip("foo/bar/baz/", "foo/bar/baz", &[]));
    }

    #[test]
    fn test_keeps_paths_inside_the_root_with_no_excludes() {
        assert!(!skip("foo/bar/baz/blah", "foo/bar/baz", &[]));
        assert!(!skip("foo/bar/baz/blah", "foo/bar", &[]));
    }

    #[test]
    fn test_excludes_match_the_full_walked_path() {
        assert!(skip("foo/bar/baz/blah", "foo/bar", &["foo/**/blah"]));
        assert!(!skip("foo/bar/baz/blah", "foo/bar", &["foo/**/abc"]));
        assert!(!skip("foo/bar/baz/blah", "foo/bar", &["some/other/path"]));
    }

    #[test]
    fn test_single_star_does_not_reach_deeper_paths() {
        assert!(!skip("foo/bar/baz/blah", "foo/bar", &["*"]));
        assert!(skip("blah", "foo/bar", &["*"]));
    }

    #[test]
    fn test_double_star_skips_at_any_depth() {
        assert!(skip("foo/bar/baz/blah", "foo/bar", &["**"]));
    }

    #[test]
    fn test_wildcard_free_segments_stay_literal() {
        assert!(!skip("foo/bar/baz/blah", "foo/bar", &["*.*"]));
        assert!(skip("*.*", "foo/bar", &["*.*"]));
    }

    #[test]
    fn test_paths_outside_the_root_still_hit_excludes() {
        assert!(skip("elsewhere/file.md", "foo/bar", &["elsewhere/**"]));
        assert!(!skip("elsewhere/file.md", "foo/bar", &[]));
    }
}
