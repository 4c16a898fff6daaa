use anyhow::{Context, Result, bail};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Finder drops this artifact into any directory it has touched. Never read
/// it, never write it, regardless of selection policy.
pub const RESERVED_NAME: &str = ".DS_Store";

/// Selection policy for one batch run, chosen once and applied uniformly.
#[derive(Debug, Clone)]
pub enum SelectionCriterion {
    /// Keep files whose loaded content length is strictly greater than n.
    MinLength(u64),
    /// Keep exactly n distinct files, uniformly at random.
    RandomSample(usize),
    /// Keep every n-th file by listing position, starting at the first.
    Stride(usize),
    /// Keep files whose name appears in the supplied list text.
    NameList(String),
}

/// List the regular files of `dir`, reserved artifact excluded, sorted by
/// name so listing order (and therefore stride positions) is stable across
/// runs.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read_dir {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || file_name(&path) == RESERVED_NAME {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

pub fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Freeze a uniform sample of exactly `n` distinct files before iteration
/// begins. Membership is by filename.
pub fn sample_names(files: &[PathBuf], n: usize) -> Result<HashSet<String>> {
    if n > files.len() {
        bail!(
            "sample size {} exceeds the {} available file(s)",
            n,
            files.len()
        );
    }
    let mut rng = rand::thread_rng();
    Ok(files
        .choose_multiple(&mut rng, n)
        .map(|p| file_name(p).to_string())
        .collect())
}

/// Every n-th file by position: 0, n, 2n, ...
pub fn stride_names(files: &[PathBuf], n: usize) -> Result<HashSet<String>> {
    if n == 0 {
        bail!("stride must be a positive integer");
    }
    Ok(files
        .iter()
        .step_by(n)
        .map(|p| file_name(p).to_string())
        .collect())
}

/// A file matches when its name appears anywhere in the list text.
pub fn matched_names(files: &[PathBuf], list_text: &str) -> HashSet<String> {
    files
        .iter()
        .map(|p| file_name(p))
        .filter(|name| !name.is_empty() && list_text.contains(*name))
        .map(str::to_string)
        .collect()
}
