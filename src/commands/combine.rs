use crate::combine::{write_outputs, CombineOutput, Combiner, WriteSummary};
use crate::config::{load_config, Overrides, Settings};
use crate::errors::{report_completion_summary, BatchResults, ProcessingFailure};
use crate::formatting::FormattingConfig;
use crate::inventory::ParseOptions;
use crate::io::InventoryWalker;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct CombineCommand {
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub write_filtered: bool,
    pub parse: ParseOptions,
    pub formatting: FormattingConfig,
}

/// Everything a combine run produced and wrote.
#[derive(Debug)]
pub struct CombineRun {
    pub output: CombineOutput,
    pub written: WriteSummary,
}

impl CombineRun {
    /// Recoverable problems from reading and from writing filtered documents.
    pub fn failures(&self) -> Vec<ProcessingFailure> {
        self.output
            .failures
            .iter()
            .chain(&self.written.failures)
            .cloned()
            .collect()
    }
}

pub fn run_combine(command: CombineCommand) -> Result<CombineRun> {
    let loaded = load_config(command.config.as_deref())?;
    let settings = Settings::resolve(&loaded, command.overrides)?;

    let listing = InventoryWalker::new(settings.input_folder.clone())
        .with_formats(settings.formats.clone())
        .with_excluded(settings.excluded.iter().cloned())
        .with_own_files(settings.own_files())
        .walk()?;
    log::info!(
        "Combining {} inventory files from {} ({} excluded)",
        listing.files.len(),
        settings.input_folder.display(),
        listing.excluded.len()
    );

    let output = Combiner::with_root_tag(&settings.root_tag).combine_paths(
        &listing.files,
        &settings.excluded,
        command.parse,
    );

    let written = write_outputs(&output, &settings.layout, command.write_filtered)
        .with_context(|| {
            format!(
                "Failed to write wanted list {}",
                settings.layout.wanted_list.display()
            )
        })?;

    let run = CombineRun { output, written };
    print_summary(&run, command.formatting);
    Ok(run)
}

fn print_summary(run: &CombineRun, formatting: FormattingConfig) {
    let formatter = formatting.formatter();
    let stats = &run.output.stats;

    println!(
        "{} {}",
        formatter.symbol("✓", "OK"),
        formatter.success(&format!(
            "Wanted list written to {}",
            run.written.wanted_list.display()
        ))
    );
    println!("  Files processed:   {}", stats.files_processed);
    println!("  Records scanned:   {}", stats.records_scanned);
    println!("  Records added:     {}", stats.records_added);
    println!("  Items combined:    {}", stats.items_combined);
    println!("  Distinct entries:  {}", run.output.merged.len());
    if !run.written.filtered_written.is_empty() {
        println!(
            "  {}",
            formatter.dim(&format!(
                "{} filtered documents written",
                run.written.filtered_written.len()
            ))
        );
    }

    let failures = run.failures();
    if !failures.is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!("{} problems during combine:", failures.len()))
        );
        for failure in &failures {
            eprintln!("  {}: {}", failure.operation.as_str(), failure.error);
        }
        let processed: Vec<&str> = run
            .output
            .filtered
            .iter()
            .map(|f| f.file_name.as_str())
            .collect();
        report_completion_summary(&BatchResults::new(processed, failures));
    }
}
