use std::path::PathBuf;

use image_resizer_core::Variant;

/// Result of processing a single task.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub output: PathBuf,
    pub variant: Variant,
    pub original: Option<(u32, u32)>,
    pub resized: Option<(u32, u32)>,
    pub written_size: u64,
    pub skipped: bool,
    pub error: Option<String>,
}

impl FileResult {
    pub fn failed(path: PathBuf, output: PathBuf, variant: Variant, error: String) -> Self {
        Self {
            path,
            output,
            variant,
            original: None,
            resized: None,
            written_size: 0,
            skipped: false,
            error: Some(error),
        }
    }

    fn describe(&self) -> String {
        let source = self.path.display();
        let output = self.output.display();
        if let Some(ref err) = self.error {
            return format!("Failed ({}): {} to {}: {}", self.variant, source, output, err);
        }
        match (self.original, self.resized) {
            (Some(original), Some(resized)) => format!(
                "Resized ({}): {} ({}) to {} ({})",
                self.variant,
                source,
                dims(original),
                output,
                dims(resized)
            ),
            (Some(original), None) => format!("Skipping: {} ({})", source, dims(original)),
            _ => format!("Skipping: {}", source),
        }
    }
}

fn dims((w, h): (u32, u32)) -> String {
    format!("{}x{}", w, h)
}

/// Aggregate report for all processed tasks.
#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<FileResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn total_written(&self) -> u64 {
        self.results.iter().map(|r| r.written_size).sum()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_none() && !r.skipped).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.skipped).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    /// One line per task: what was written, skipped, or failed.
    pub fn detail_lines(&self) -> Vec<String> {
        self.results.iter().map(FileResult::describe).collect()
    }

    /// Print totals and errors; with `detailed`, one line per task first.
    pub fn print_summary(&self, detailed: bool) {
        if detailed {
            for line in self.detail_lines() {
                println!("{}", line);
            }
        }

        println!("\n--- Summary ---");
        println!(
            "Files written: {} | Skipped: {} | Errors: {}",
            self.success_count(),
            self.skipped_count(),
            self.error_count()
        );

        if self.success_count() > 0 {
            println!("Total written: {}", format_size(self.total_written()));
        }

        for r in &self.results {
            if let Some(ref err) = r.error {
                println!("  ERROR {}: {}", r.path.display(), err);
            }
        }
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
