use clap::Parser;
use log::error;
use mtnifti_core::cli::{Cli, OutputFormat};
use mtnifti_core::{ConversionJob, ConversionReport, Dcm2Niix, TextReport};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.source.is_dir() {
        eprintln!("Error: {} is not a directory", cli.source.display());
        process::exit(1);
    }
    if !cli.output_dir.is_dir() {
        eprintln!("Error: {} is not a directory", cli.output_dir.display());
        process::exit(1);
    }

    let config = cli.config();
    let converter = Dcm2Niix::new(&config.dcm2niix_path);
    let job = ConversionJob::new(&cli.source, &cli.output_dir, &cli.sequence);

    match job.run(&converter, &config) {
        Ok(report) => output_report(&report, cli.format),
        Err(e) => {
            error!("Conversion failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn output_report(report: &ConversionReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", TextReport::new(report)),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
