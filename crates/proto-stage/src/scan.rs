//! Recursive file discovery.
//!
//! Both lookups walk the tree in directory order and return full paths.
//! A root that does not exist yields an empty result rather than an error.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Shell-style file name pattern.
///
/// Supports `*` (any run of characters, including empty) and `?` (any single
/// character); everything else matches literally. The pattern is applied to
/// the file name only, never to the directory components, and must cover the
/// whole name.
#[derive(Debug, Clone)]
pub struct FilePattern {
    chars: Vec<char>,
}

impl FilePattern {
    /// Compile a pattern such as `*.proto`.
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
        }
    }

    /// Whether `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        let pat = &self.chars;

        // Iterative matcher with single-star backtracking.
        let mut p = 0;
        let mut n = 0;
        let mut star: Option<usize> = None;
        let mut mark = 0;

        while n < name.len() {
            if p < pat.len() && (pat[p] == '?' || pat[p] == name[n]) {
                p += 1;
                n += 1;
            } else if p < pat.len() && pat[p] == '*' {
                star = Some(p);
                mark = n;
                p += 1;
            } else if let Some(s) = star {
                p = s + 1;
                mark += 1;
                n = mark;
            } else {
                return false;
            }
        }

        while p < pat.len() && pat[p] == '*' {
            p += 1;
        }
        p == pat.len()
    }
}

/// Recursively list every file under `root` named exactly `name`.
pub fn find_files_named(root: &Path, name: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(|entry| entry.into_path())
        .collect()
}

/// Recursively list every file under `root` whose name matches `pattern`.
pub fn find_files_matching(root: &Path, pattern: &FilePattern) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file() && pattern.matches(&entry.file_name().to_string_lossy())
        })
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_pattern_literal() {
        let pat = FilePattern::new("hello.proto");
        assert!(pat.matches("hello.proto"));
        assert!(!pat.matches("hello.protobuf"));
        assert!(!pat.matches("xhello.proto"));
    }

    #[test]
    fn test_pattern_star_extension() {
        let pat = FilePattern::new("*.proto");
        assert!(pat.matches("hello.proto"));
        assert!(pat.matches(".proto"));
        assert!(!pat.matches("hello.proto.bak"));
        assert!(!pat.matches("hello.txt"));
    }

    #[test]
    fn test_pattern_question_mark() {
        let pat = FilePattern::new("v?.proto");
        assert!(pat.matches("v1.proto"));
        assert!(pat.matches("v2.proto"));
        assert!(!pat.matches("v12.proto"));
        assert!(!pat.matches("v.proto"));
    }

    #[test]
    fn test_pattern_multiple_stars() {
        let pat = FilePattern::new("*a*b*");
        assert!(pat.matches("ab"));
        assert!(pat.matches("xaybz"));
        assert!(pat.matches("aabb"));
        assert!(!pat.matches("ba"));
    }

    #[test]
    fn test_pattern_star_only() {
        let pat = FilePattern::new("*");
        assert!(pat.matches(""));
        assert!(pat.matches("anything.at.all"));
    }

    #[test]
    fn test_find_matching_in_tree() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a/x.proto"));
        touch(&dir.path().join("a/b/y.proto"));
        touch(&dir.path().join("a/b/notes.txt"));
        touch(&dir.path().join("z.proto"));

        let found = find_files_matching(dir.path(), &FilePattern::new("*.proto"));
        let names: HashSet<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(found.len(), 3);
        assert!(names.contains(&PathBuf::from("a/x.proto")));
        assert!(names.contains(&PathBuf::from("a/b/y.proto")));
        assert!(names.contains(&PathBuf::from("z.proto")));
    }

    #[test]
    fn test_find_named_ignores_pattern_chars() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a/x.proto"));
        touch(&dir.path().join("b/x.proto"));
        touch(&dir.path().join("b/x.protobuf"));

        let found = find_files_named(dir.path(), "x.proto");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.file_name().unwrap() == "x.proto"));
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let found = find_files_matching(Path::new("/no/such/dir"), &FilePattern::new("*.proto"));
        assert!(found.is_empty());

        let found = find_files_named(Path::new("/no/such/dir"), "x.proto");
        assert!(found.is_empty());
    }

    #[test]
    fn test_directories_are_not_matched() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("fake.proto")).unwrap();
        touch(&dir.path().join("fake.proto/inner.proto"));

        let found = find_files_matching(dir.path(), &FilePattern::new("*.proto"));
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("fake.proto/inner.proto"));
    }
}
