//! Offline folder ingestion helpers
//!
//! The upload command walks a directory tree and stores every file as one
//! blob, keyed by its path relative to the root. Name components are joined
//! with the literal backslash separator so the stored names match the
//! serving convention on every host.

use std::path::{Path, PathBuf};

use crate::constants::BLOB_NAME_SEPARATOR;

/// Blob name for `file` relative to `root`, or `None` if `file` is not
/// under `root`
pub fn blob_name_for(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join(&BLOB_NAME_SEPARATOR.to_string()))
}

/// Content type guessed from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Recursively collect every regular file under `dir`, sorted for stable
/// upload order
pub fn collect_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_name_joins_components_with_backslash() {
        let root = Path::new("/data/COMPANY");
        let file = Path::new("/data/COMPANY/AAPL/stock.csv");
        assert_eq!(blob_name_for(root, file).unwrap(), "AAPL\\stock.csv");
    }

    #[test]
    fn test_blob_name_for_nested_paths() {
        let root = Path::new("/data");
        let file = Path::new("/data/AAPL/plots/ANN_prediction_plot.png");
        assert_eq!(
            blob_name_for(root, file).unwrap(),
            "AAPL\\plots\\ANN_prediction_plot.png"
        );
    }

    #[test]
    fn test_blob_name_outside_root_is_none() {
        assert!(blob_name_for(Path::new("/data"), Path::new("/other/x.csv")).is_none());
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("stock.csv")), "text/csv");
        assert_eq!(content_type_for(Path::new("plot.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("metrics.txt")), "text/plain");
        assert_eq!(
            content_type_for(Path::new("mystery.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_collect_files_walks_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("AAPL");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("stock.csv"), "x").unwrap();
        std::fs::write(dir.path().join("top.txt"), "y").unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("AAPL/stock.csv")));
    }
}
