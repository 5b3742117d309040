//! Validate command - run a data file through the full validation workflow.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use retort::report;
use retort::{MockProvider, ResolverConfig, Retort, RetortConfig};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    delay_ms: u64,
    no_preflight: bool,
    offline: bool,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Validating".cyan().bold(),
        file.display().to_string().white()
    );

    let config = RetortConfig {
        resolver: ResolverConfig {
            request_delay: Duration::from_millis(delay_ms),
        },
        preflight: !no_preflight && !offline,
        ..RetortConfig::default()
    };

    let mut retort = Retort::with_config(config).with_progress(|message: &str| {
        println!("  {}", message.dimmed());
    });

    if offline {
        retort = retort.with_provider(MockProvider::new());
    }

    let report = retort.validate_file(&file)?;

    // Determine output path
    let output_path = output.unwrap_or_else(|| {
        if json {
            report::default_output_path(&file).with_extension("json")
        } else {
            report::default_output_path(&file)
        }
    });

    if json {
        report::write_json(&report, &output_path)?;
    } else {
        report::write_csv(&report, &output_path)?;
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    let summary = &report.summary;
    println!();
    println!(
        "Processed {} rows: {} validated, {} stereo duplicates, {} rejected",
        summary.total_rows.to_string().white().bold(),
        summary.validated.to_string().green(),
        summary.stereo_duplicates.to_string().yellow(),
        summary.rejected.to_string().red()
    );
    if summary.exact_duplicate_groups > 0 || summary.stereo_duplicate_groups > 0 {
        println!(
            "Duplicate groups: {} exact, {} stereoisomer",
            summary.exact_duplicate_groups, summary.stereo_duplicate_groups
        );
    }

    if verbose && summary.rejected > 0 {
        println!();
        println!("{}", "Rejected rows:".yellow().bold());
        for record in report.records.iter().filter(|r| !r.is_validated()) {
            if let Some(reason) = record.rejection_reason {
                println!(
                    "  row {:4}  {:30}  {}",
                    record.row_number,
                    record.name.as_deref().unwrap_or("<no name>"),
                    reason.label().red()
                );
            }
        }
    }

    if report.all_validated() {
        println!("{}", "All rows validated.".green());
    }

    Ok(report.all_validated())
}
