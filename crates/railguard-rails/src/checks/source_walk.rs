//! Shared source-file traversal for the scanning checks.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::CheckContext;

/// Extensions treated as scannable source text.
const SOURCE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "ts", "go", "java", "rb", "toml", "yaml", "yml", "json", "sh", "env",
];

/// Walk source files under the context root, honoring .gitignore plus the
/// configured exclude directories.
pub fn source_files(ctx: &CheckContext) -> Vec<PathBuf> {
    let exclude_dirs = ctx.scan.effective_exclude_dirs();
    let mut files = Vec::new();

    let walker = WalkBuilder::new(&ctx.root)
        .hidden(true)
        .git_ignore(true)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if path_in_excluded_dir(path, &ctx.root, &exclude_dirs) {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if SOURCE_EXTENSIONS.contains(&ext) {
            files.push(path.to_path_buf());
        }
    }
    files
}

/// True when the file name matches one of the configured test/demo
/// fragments.
pub fn is_test_or_demo_file(path: &Path, ctx: &CheckContext) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();
    let in_test_dir = path.components().any(|c| {
        matches!(
            c.as_os_str().to_str(),
            Some("tests") | Some("test") | Some("demos") | Some("examples") | Some("fixtures")
        )
    });
    in_test_dir
        || ctx
            .scan
            .effective_exclude_file_patterns()
            .iter()
            .any(|pat| name.contains(pat.as_str()))
}

/// True when the line is a comment in any of the scanned languages.
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.starts_with('*')
        || trimmed.starts_with("/*")
        || trimmed.starts_with("\"\"\"")
}

fn path_in_excluded_dir(path: &Path, root: &Path, exclude_dirs: &[String]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|d| d == name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_detected() {
        assert!(is_comment_line("  // advice here"));
        assert!(is_comment_line("# python comment"));
        assert!(is_comment_line(" * doc line"));
        assert!(!is_comment_line("let x = 1;"));
    }
}
