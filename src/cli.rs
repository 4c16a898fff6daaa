use crate::{
    config::Config,
    convert::Html2TextConverter,
    pipeline::{Pipeline, TransformKind},
    report::{ProgressEvent, RunSummary},
    select::{self, SelectionCriterion},
    util::{ensure_dir, now_rfc3339},
};
use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "quest-sift")]
#[command(about = "Batch extractor for game-wiki quest pages (slice + convert + select)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./quest-sift.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Slice the description section out of raw HTML pages and strip its tags
    Strip {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Convert raw HTML pages to markdown
    Convert {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Extract Description/Progress/Completion sections from markdown pages
    Sections {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Keep only files longer than the threshold
    Filter {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        /// Length threshold in characters; defaults to [selection] min_length.
        #[arg(long)]
        min_length: Option<u64>,
    },
    /// Copy a fixed-size uniform random sample of the listing
    Sample {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        /// How many files to pick.
        #[arg(long)]
        count: usize,
    },
    /// Copy every n-th file of the listing, starting at the first
    Stride {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        /// Keep positions 0, n, 2n, ...
        #[arg(long)]
        every: usize,
    },
    /// Copy the files whose names appear in a list file
    Match {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        /// Text file holding the membership list.
        #[arg(long)]
        list: PathBuf,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Strip { input_dir, out_dir } => {
            run_transform(&args, &cfg, input_dir, out_dir, TransformKind::StripHtml, "strip")
        }
        Command::Convert { input_dir, out_dir } => run_transform(
            &args,
            &cfg,
            input_dir,
            out_dir,
            TransformKind::HtmlToMarkdown,
            "convert",
        ),
        Command::Sections { input_dir, out_dir } => run_transform(
            &args,
            &cfg,
            input_dir,
            out_dir,
            TransformKind::MarkdownSections,
            "sections",
        ),
        Command::Filter {
            input_dir,
            out_dir,
            min_length,
        } => {
            let threshold = min_length.unwrap_or(cfg.selection.min_length);
            run_selection(
                &args,
                &cfg,
                input_dir,
                out_dir,
                SelectionCriterion::MinLength(threshold),
                "filter",
            )
        }
        Command::Sample {
            input_dir,
            out_dir,
            count,
        } => run_selection(
            &args,
            &cfg,
            input_dir,
            out_dir,
            SelectionCriterion::RandomSample(*count),
            "sample",
        ),
        Command::Stride {
            input_dir,
            out_dir,
            every,
        } => run_selection(
            &args,
            &cfg,
            input_dir,
            out_dir,
            SelectionCriterion::Stride(*every),
            "stride",
        ),
        Command::Match {
            input_dir,
            out_dir,
            list,
        } => {
            let text = std::fs::read_to_string(list)
                .with_context(|| format!("reading list file: {}", list.display()))?;
            run_selection(
                &args,
                &cfg,
                input_dir,
                out_dir,
                SelectionCriterion::NameList(text),
                "match",
            )
        }
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    for candidate in ["quest-sift.toml", "quest-sift.example.toml"] {
        let path = Path::new(candidate);
        if path.exists() {
            return Config::load(path);
        }
    }
    Ok(Config::default())
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    let (file_layer, guard) = if cfg.logging.write_to_file && !cfg.logging.file_path.is_empty() {
        let path = PathBuf::from(&cfg.logging.file_path);
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

/// Listing of the input directory, validated non-empty before any
/// processing starts.
fn input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("input directory not found: {}", dir.display());
    }
    let files = select::list_input_files(dir)?;
    if files.is_empty() {
        bail!("no input files in {}", dir.display());
    }
    info!("{} file(s) found in {}", files.len(), dir.display());
    Ok(files)
}

fn validate_out_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("output directory not found: {}", dir.display());
    }
    Ok(())
}

fn progress_bar(args: &Args, len: usize) -> ProgressBar {
    if args.no_progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn run_transform(
    args: &Args,
    cfg: &Config,
    input_dir: &Path,
    out_dir: &Path,
    kind: TransformKind,
    mode: &str,
) -> Result<()> {
    let files = input_files(input_dir)?;
    validate_out_dir(out_dir)?;

    let pipeline = Pipeline::new(cfg, Html2TextConverter::new(cfg.convert.line_width));
    let pb = progress_bar(args, files.len());
    let started = now_rfc3339();

    let summary = pipeline.run_transform(&files, kind, out_dir, &|ev: &ProgressEvent| {
        pb.set_message(ev.file.to_string());
        pb.inc(1);
    })?;

    pb.finish_and_clear();
    print_summary(cfg, mode, &summary, &started)
}

fn run_selection(
    args: &Args,
    cfg: &Config,
    input_dir: &Path,
    out_dir: &Path,
    criterion: SelectionCriterion,
    mode: &str,
) -> Result<()> {
    let files = input_files(input_dir)?;
    validate_out_dir(out_dir)?;

    let pipeline = Pipeline::new(cfg, Html2TextConverter::new(cfg.convert.line_width));
    let pb = progress_bar(args, files.len());
    let started = now_rfc3339();

    let summary = pipeline.run_selection(&files, &criterion, out_dir, &|ev: &ProgressEvent| {
        pb.set_message(ev.file.to_string());
        pb.inc(1);
    })?;

    pb.finish_and_clear();
    print_summary(cfg, mode, &summary, &started)
}

fn print_summary(cfg: &Config, mode: &str, summary: &RunSummary, started: &str) -> Result<()> {
    info!(
        "{mode} complete: {}/{} file(s) exported",
        summary.processed, summary.queued
    );
    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "mode": mode,
                "queued": summary.queued,
                "processed": summary.processed,
                "started": started,
                "finished": now_rfc3339(),
            }))?
        );
    }
    Ok(())
}
