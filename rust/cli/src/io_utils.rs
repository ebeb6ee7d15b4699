//! File I/O utilities shared by commands that write output files.

use std::path::Path;

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/out.jsonl");
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        assert!(ensure_parent_dir(Path::new("out.jsonl")).is_ok());
    }
}
