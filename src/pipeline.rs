use crate::{
    config::Config,
    convert::Converter,
    postprocess,
    report::{ProgressEvent, RunSummary},
    sections,
    select::{self, SelectionCriterion},
    util::{read_text, write_atomic},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// The stateless per-file transforms that fan out across the worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// Slice the description heading out of raw HTML and strip its tags.
    StripHtml,
    /// Full page conversion through the external markup converter.
    HtmlToMarkdown,
    /// Description/Progress/Completion slicing from converted markdown.
    MarkdownSections,
}

/// Called after each completed unit; the CLI feeds this into its progress
/// bar, tests usually pass a no-op.
pub type ProgressSink<'a> = dyn Fn(&ProgressEvent) + Send + Sync + 'a;

pub struct Pipeline<C: Converter> {
    cfg: Config,
    converter: C,
}

impl<C: Converter> Pipeline<C> {
    pub fn new(cfg: &Config, converter: C) -> Self {
        Self {
            cfg: cfg.clone(),
            converter,
        }
    }

    /// Pool size for the parallel transforms: one slot fewer than the CPU
    /// count, never below one. `[global] workers` overrides.
    pub fn workers(&self) -> usize {
        if self.cfg.global.workers > 0 {
            return self.cfg.global.workers;
        }
        num_cpus::get().saturating_sub(1).max(1)
    }

    /// One pass over `files`, applying `kind` on a fixed-size worker pool.
    /// Units are independent; completion order is unordered. Every file
    /// whose transform yields a result is written under its original name.
    /// The pool is fully drained before the summary is returned.
    pub fn run_transform(
        &self,
        files: &[PathBuf],
        kind: TransformKind,
        out_dir: &Path,
        progress: &ProgressSink,
    ) -> Result<RunSummary> {
        let queued = files.len();
        let processed = AtomicUsize::new(0);
        let workers = self.workers();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .context("build worker pool")?;
        info!("processing {queued} file(s) on {workers} worker(s)");

        pool.install(|| {
            files.par_iter().for_each(|path| {
                let name = select::file_name(path);
                if let Some(result) = self.apply(kind, path) {
                    match write_atomic(out_dir, name, &result) {
                        Ok(()) => {
                            processed.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => warn!("error while writing {name}: {err:#}"),
                    }
                }
                progress(&ProgressEvent {
                    queued,
                    processed: processed.load(Ordering::SeqCst),
                    file: name,
                });
            });
        });

        Ok(RunSummary {
            queued,
            processed: processed.into_inner(),
        })
    }

    /// One file through the chosen transform. None means the file is skipped:
    /// unreadable input, failed conversion, or no description section.
    fn apply(&self, kind: TransformKind, path: &Path) -> Option<String> {
        let content = read_text(path)?;
        match kind {
            TransformKind::StripHtml => sections::html_section(
                &content,
                &self.cfg.sections.description_heading,
                &self.cfg.sections.next_heading,
            ),
            TransformKind::HtmlToMarkdown => match self.converter.convert(&content) {
                Ok(text) => Some(postprocess::clean(&self.cfg, &text)),
                Err(err) => {
                    debug!("conversion failed for {}: {err:#}", path.display());
                    None
                }
            },
            TransformKind::MarkdownSections => sections::markdown_sections(&content),
        }
    }

    /// One sequential pass in listing order, copying the files the criterion
    /// keeps. The frozen-set criteria (sample, stride, name list) are
    /// computed and validated before any file is read; an invalid criterion
    /// aborts the run with no output written.
    pub fn run_selection(
        &self,
        files: &[PathBuf],
        criterion: &SelectionCriterion,
        out_dir: &Path,
        progress: &ProgressSink,
    ) -> Result<RunSummary> {
        let picked: Option<HashSet<String>> = match criterion {
            SelectionCriterion::MinLength(_) => None,
            SelectionCriterion::RandomSample(n) => Some(select::sample_names(files, *n)?),
            SelectionCriterion::Stride(n) => Some(select::stride_names(files, *n)?),
            SelectionCriterion::NameList(text) => Some(select::matched_names(files, text)),
        };

        let queued = files.len();
        let mut processed = 0usize;

        for path in files {
            let name = select::file_name(path);
            let export = match (criterion, &picked) {
                (SelectionCriterion::MinLength(n), _) => {
                    // Length in characters of the loaded content, strict
                    // greater-than.
                    read_text(path).filter(|content| content.chars().count() as u64 > *n)
                }
                (_, Some(set)) if set.contains(name) => read_text(path),
                _ => None,
            };

            if let Some(content) = export {
                match write_atomic(out_dir, name, &content) {
                    Ok(()) => processed += 1,
                    Err(err) => warn!("error while writing {name}: {err:#}"),
                }
            }
            progress(&ProgressEvent {
                queued,
                processed,
                file: name,
            });
        }

        info!("{processed} file(s) picked and exported");
        Ok(RunSummary { queued, processed })
    }
}
