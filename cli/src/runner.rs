use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;

use image_resizer_core::{ConfigError, FileTask, Outcome, PathMapper, Pipeline, ResizeConfig};

use crate::cli::Cli;
use crate::error::ProcessingError;
use crate::io::{collect_files, read_file, write_file};
use crate::report::{FileResult, Report};

/// A validated run: where to read, where to write, and how.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: ResizeConfig,
    pub workers: usize,
}

impl Job {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            config: cli.to_config()?,
            workers: cli.workers(),
        })
    }

    /// Walk the input tree and plan every output.
    ///
    /// With `create_output` the output root is created first. A collision
    /// between planned outputs fails the whole job here, before any work.
    pub fn prepare(&self, create_output: bool) -> Result<Vec<FileTask>> {
        let input_root = self
            .input
            .canonicalize()
            .with_context(|| format!("Failed to resolve input directory {}", self.input.display()))?;

        if create_output {
            fs::create_dir_all(&self.output).with_context(|| {
                format!("Failed to create output directory {}", self.output.display())
            })?;
        }
        let existing_output = self.output.canonicalize().ok();
        let output_root = existing_output.clone().unwrap_or_else(|| self.output.clone());

        let files = collect_files(&input_root, existing_output.as_deref())
            .context("Failed to collect input files")?;
        log::info!("Found {} image(s) under {}", files.len(), input_root.display());

        let mapper = PathMapper::new(input_root, output_root);
        let tasks = mapper
            .plan(&files, &self.config.output)
            .context("Failed to plan output paths")?;
        Ok(tasks)
    }

    /// Run every task on a pool of `workers` threads.
    ///
    /// Per-file failures are logged and recorded; they never stop the pool.
    pub fn execute(&self, tasks: &[FileTask], progress: &ProgressBar) -> Result<Report> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .context("Failed to build worker pool")?;
        log::info!("Processing {} task(s) on {} worker(s)", tasks.len(), self.workers);

        let pipeline = Pipeline::new(self.config);
        let results: Vec<FileResult> = pool.install(|| {
            tasks
                .par_iter()
                .map(|task| {
                    let result = process_task(task, &pipeline);
                    progress.inc(1);
                    result
                })
                .collect()
        });

        let mut report = Report::new();
        for result in results {
            report.add(result);
        }
        Ok(report)
    }

    /// Prepare and execute without a visible progress bar.
    pub fn run(&self) -> Result<Report> {
        let tasks = self.prepare(true)?;
        self.execute(&tasks, &ProgressBar::hidden())
    }
}

fn process_task(task: &FileTask, pipeline: &Pipeline) -> FileResult {
    let result = (|| -> Result<Outcome, ProcessingError> {
        let data = read_file(&task.source)?;
        let outcome = pipeline.process(&data, task)?;
        if let Outcome::Written { ref data, .. } = outcome {
            write_file(&task.output, data)?;
        }
        Ok(outcome)
    })();

    match result {
        Ok(Outcome::Written {
            data,
            original,
            resized,
        }) => {
            log::trace!(
                "Resized ({}): {} ({}x{}) to {} ({}x{})",
                task.variant,
                task.source.display(),
                original.0,
                original.1,
                task.output.display(),
                resized.0,
                resized.1
            );
            FileResult {
                path: task.source.clone(),
                output: task.output.clone(),
                variant: task.variant,
                original: Some(original),
                resized: Some(resized),
                written_size: data.len() as u64,
                skipped: false,
                error: None,
            }
        }
        Ok(Outcome::Skipped { original }) => FileResult {
            path: task.source.clone(),
            output: task.output.clone(),
            variant: task.variant,
            original: Some(original),
            resized: None,
            written_size: 0,
            skipped: true,
            error: None,
        },
        Err(e) => {
            log::warn!("Error processing {}: {}", task.source.display(), e);
            FileResult::failed(
                task.source.clone(),
                task.output.clone(),
                task.variant,
                e.to_string(),
            )
        }
    }
}

/// Print the planned mapping for a dry run.
pub fn print_plan(tasks: &[FileTask]) {
    println!("[dry-run] Would write:");
    for task in tasks {
        println!(
            "  {} → {} ({})",
            task.relative.display(),
            task.output.display(),
            task.format
        );
    }
}
