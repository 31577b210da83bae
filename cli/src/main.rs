use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use image_resizer::cli::Cli;
use image_resizer::runner::{print_plan, Job};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let job = Job::from_cli(&cli).context("Invalid configuration")?;
    log::info!(
        "Resizing to {} ({}), format {}, {} worker(s)",
        job.config.spec.target_size(),
        job.config.spec.mode(),
        job.config.output.format,
        job.workers
    );

    let tasks = job.prepare(!cli.dry_run)?;

    if tasks.is_empty() {
        println!("No supported files found.");
        return Ok(());
    }

    if cli.dry_run {
        print_plan(&tasks);
        return Ok(());
    }

    println!("Resizing {} image(s)...", tasks.len());

    let pb = ProgressBar::new(tasks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .context("Invalid progress bar template")?
            .progress_chars("█▓░"),
    );

    let report = job.execute(&tasks, &pb)?;

    pb.finish_with_message("Done!");
    report.print_summary(cli.verbose >= 2);

    if cli.strict && report.error_count() > 0 {
        anyhow::bail!("{} file(s) failed", report.error_count());
    }

    Ok(())
}
