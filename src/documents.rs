//! Document enumeration from the source directory.
//!
//! Walks the configured directory and returns every file matching the
//! include globs (by default `**/*.txt`) as a [`Document`]. Ordering is
//! sorted by relative path so ingestion runs are deterministic.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::Document;

pub fn scan_documents(config: &Config) -> Result<Vec<Document>> {
    let root = &config.documents.dir;
    if !root.exists() {
        bail!("Documents directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&config.documents.include_globs)?;
    let dir_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());

    let mut documents = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if !include_set.is_match(&rel_str) {
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| rel_str.clone());

        let body = match std::fs::read_to_string(path) {
            Ok(body) => body,
            Err(e) => {
                eprintln!("Warning: skipping unreadable file {}: {}", rel_str, e);
                continue;
            }
        };

        documents.push(Document {
            name,
            // Source paths are reported relative to the documents dir,
            // prefixed with its name, e.g. "data/policy.txt".
            path: format!("{}/{}", dir_name, rel_str),
            body,
        });
    }

    // Sort for deterministic ordering
    documents.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(documents)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
