// src/cli/paths.rs
//
// Path expansion for CLI commands that take several tags files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::glob;
use thiserror::Error;

/// Errors that can occur during path expansion
#[derive(Debug, Error)]
pub enum PathError {
    /// Glob pattern syntax error
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    /// IO error (permissions, etc.)
    #[error("error reading '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Expand a list of path patterns into concrete tags files.
///
/// Each pattern can be:
/// - A direct file path, taken as-is whatever its name
/// - A directory (expands to every tags file below it)
/// - A glob pattern (e.g., "build/**/*.tags")
///
/// Explicit files keep their input order; glob and directory expansions
/// follow them. Duplicates are removed.
pub fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>, PathError> {
    let mut explicit_files = Vec::new();
    let mut glob_files = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        let path = PathBuf::from(pattern);
        if path.is_file() {
            add_unique(path, &mut explicit_files, &mut seen);
        } else if path.is_dir() {
            expand_glob(&format!("{pattern}/**/*"), &mut glob_files, &mut seen)?;
        } else {
            expand_glob(pattern, &mut glob_files, &mut seen)?;
        }
    }

    explicit_files.extend(glob_files);
    Ok(explicit_files)
}

/// `tags`, `TAGS`, `*.tags` and `*.ctags`
pub fn is_tags_file(path: &Path) -> bool {
    let named_tags = path
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("tags"));
    let tags_extension = path
        .extension()
        .is_some_and(|ext| ext == "tags" || ext == "ctags");
    named_tags || tags_extension
}

fn expand_glob(
    pattern: &str,
    files: &mut Vec<PathBuf>,
    seen: &mut HashSet<PathBuf>,
) -> Result<(), PathError> {
    let entries = glob(pattern).map_err(|e| PathError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() && is_tags_file(&path) {
                    add_unique(path, files, seen);
                }
            }
            Err(e) => {
                return Err(PathError::IoError {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                });
            }
        }
    }

    Ok(())
}

/// Add a path if not already seen (uses canonical path for deduplication)
fn add_unique(path: PathBuf, files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    let key = path.canonicalize().unwrap_or_else(|_| path.clone());
    if seen.insert(key) {
        files.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "!_TAG_FILE_FORMAT\t2\t//\n").unwrap();
        path
    }

    fn expand(dir: &TempDir) -> Vec<PathBuf> {
        expand_paths(&[dir.path().to_string_lossy().to_string()]).unwrap()
    }

    #[test]
    fn explicit_file_is_kept_whatever_its_name() {
        let dir = TempDir::new().unwrap();
        let file = create_file(dir.path(), "symbols.txt");
        let files = expand_paths(&[file.to_string_lossy().to_string()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn directory_expands_to_tags_files_only() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "tags");
        create_file(dir.path(), "sub/Test.tags");
        create_file(dir.path(), "sub/deep/Other.ctags");
        create_file(dir.path(), "notes.txt");
        assert_eq!(expand(&dir).len(), 3);
    }

    #[test]
    fn glob_pattern_matches() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "a.tags");
        create_file(dir.path(), "b.tags");
        create_file(dir.path(), "c.txt");
        let pattern = format!("{}/*.tags", dir.path().display());
        assert_eq!(expand_paths(&[pattern]).unwrap().len(), 2);
    }

    #[test]
    fn duplicates_are_removed() {
        let dir = TempDir::new().unwrap();
        let file = create_file(dir.path(), "a.tags");
        let file_str = file.to_string_lossy().to_string();
        let files = expand_paths(&[file_str.clone(), file_str]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn invalid_glob_pattern() {
        let result = expand_paths(&["[invalid".to_string()]);
        assert!(matches!(result, Err(PathError::InvalidPattern { .. })));
    }

    #[test]
    fn tags_file_names() {
        assert!(is_tags_file(Path::new("tags")));
        assert!(is_tags_file(Path::new("build/TAGS")));
        assert!(is_tags_file(Path::new("Test.tags")));
        assert!(is_tags_file(Path::new("Test.ctags")));
        assert!(!is_tags_file(Path::new("Test.h")));
    }
}
