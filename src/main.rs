#![warn(clippy::unwrap_used)]

use clap::Parser;
use cvpdf::{
    assembler, configuration::LayoutConfiguration, error::ContextError, pdf,
    resume::ResumeDocument,
};
use std::path::PathBuf;
use time::OffsetDateTime;

#[derive(Parser, Debug)]
#[command(version, about = "Lays out a résumé and saves it as a PDF document", long_about = None)]
struct CliArguments {
    /// The résumé, as a JSON file.
    #[arg(short = 'r', long = "resume", value_name = "json_file")]
    resume_path: PathBuf,
    /// Where to save the PDF, defaults to the suggested file name in the current directory.
    #[arg(short = 'o', long = "output", value_name = "file_path")]
    output_file_path: Option<PathBuf>,
    /// Overrides of the layout parameters, as a JSON file.
    #[arg(short = 'c', long = "configuration", value_name = "json_file")]
    configuration_path: Option<PathBuf>,
    /// Also write the laid out draw operations as JSON.
    #[arg(long = "dump-layout", value_name = "json_file")]
    dump_layout_path: Option<PathBuf>,
    /// Run the saved PDF through ghostscript.
    #[arg(long)]
    optimize: bool,
    /// Lay out the résumé even when required fields are missing.
    #[arg(long)]
    no_validate: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), ContextError> {
    let arguments = CliArguments::parse();
    env_logger::builder()
        .filter_level(if arguments.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
    log::debug!("{:?}", arguments);

    let configuration = match &arguments.configuration_path {
        Some(configuration_path) => LayoutConfiguration::from_path(configuration_path)?,
        None => LayoutConfiguration::default(),
    };
    let resume = ResumeDocument::from_path(&arguments.resume_path)?;
    if arguments.no_validate {
        log::debug!("Skipping the validation of the résumé");
    } else {
        resume.validate()?;
    }

    let document = assembler::generate_resume(&resume, &configuration);

    if let Some(dump_layout_path) = &arguments.dump_layout_path {
        let layout = serde_json::to_string_pretty(&document).map_err(|error| {
            ContextError::with_error("Failed to serialize the layout", &error)
        })?;
        std::fs::write(dump_layout_path, layout).map_err(|error| {
            ContextError::with_error("Failed to write the layout file", &error)
        })?;
        log::info!("Saved the layout to the path: {:?}", dump_layout_path);
    }

    // The whole file is encoded before anything is written, a failure leaves no partial output
    let mut pdf_document = pdf::document_to_pdf(
        &document,
        &resume.personal.full_name(),
        OffsetDateTime::now_utc(),
    )
    .map_err(|error| ContextError::with_error("Failed to render the résumé", &error))?;
    pdf_document.optimize();
    let pdf_document_bytes = pdf_document.save_to_bytes()?;

    let output_file_path = arguments
        .output_file_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(&document.file_name));
    std::fs::write(&output_file_path, pdf_document_bytes)
        .map_err(|error| ContextError::with_error("Failed to save the output file", &error))?;
    log::info!(
        "Saved {} page(s) to the path: {:?}",
        document.page_count(),
        output_file_path
    );

    if arguments.optimize {
        pdf::optimize_pdf_file_with_gs(&output_file_path)?;
        log::info!("Optimized the output file with gs");
    }

    Ok(())
}
