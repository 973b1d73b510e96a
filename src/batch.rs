use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::model::{Document, ExtractionResult};
use crate::parser;

#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: ExtractionResult,
}

/// Notes files directly under `dir` whose extension is in `extensions`, sorted by path.
pub fn discover(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if matches {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Extract every file against the same document snapshot, `chunk_size` files at a time.
pub fn extract_files(
    paths: &[PathBuf],
    document: &Document,
    chunk_size: usize,
) -> Result<Vec<BatchEntry>> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut entries = Vec::with_capacity(paths.len());
    for chunk in paths.chunks(chunk_size.max(1)) {
        let results: Vec<Result<BatchEntry>> = chunk
            .par_iter()
            .map(|path| extract_file(path, document))
            .collect();
        for r in results {
            entries.push(r?);
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(files = entries.len(), "batch extraction finished");
    Ok(entries)
}

fn extract_file(path: &Path, document: &Document) -> Result<BatchEntry> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let result = parser::extract(&raw, document);
    debug!(path = %path.display(), empty = result.is_empty(), "extracted file");
    Ok(BatchEntry {
        path: path.to_path_buf(),
        result,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn discover_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", "Title: B");
        write(dir.path(), "a.TXT", "Title: A");
        write(dir.path(), "skip.json", "{}");
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let found = discover(dir.path(), &["md".into(), "txt".into()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.md"]);
    }

    #[test]
    fn discover_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nope"), &["md".into()]).is_err());
    }

    #[test]
    fn extract_files_keeps_order_across_chunks() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write(dir.path(), &format!("{i}.md"), &format!("Title: Draft {i}"));
        }
        write(dir.path(), "5.md", "   ");

        let paths = discover(dir.path(), &["md".into()]).unwrap();
        let entries = extract_files(&paths, &Document::default(), 2).unwrap();

        assert_eq!(entries.len(), 6);
        for (i, entry) in entries.iter().take(5).enumerate() {
            assert_eq!(entry.result.title.as_deref(), Some(format!("Draft {i}").as_str()));
        }
        assert!(entries[5].result.is_empty());
    }
}
