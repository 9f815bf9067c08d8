mod address;
mod cli;
mod ds;
mod error;
mod image;
mod instruction;
mod logging;
mod output;
mod resolver;
mod sink;

use clap::Parser;
use cli::Cli;
use error::GenerateError;
use image::ImageWriter;
use log::{info, warn};
use logging::LogSettings;
use output::OutputFormat;

// Generates a file ready to be burnt on an 8K x 8 EEPROM such as the AT28C64B.
// Both control EEPROMs get the same image: pin A7 picks which half of the
// control word each one drives onto the bus.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::setup_logging(LogSettings {
        verbosity: cli.verbose,
        file: cli.log_file.clone(),
    })
    .map_err(GenerateError::from)?;

    let writer = ImageWriter::new(cli.size, cli.half.select())?;
    match cli.format {
        OutputFormat::Binary => {
            let report = output::write_binary(&cli.output, &writer)?;
            if !report.faults.is_empty() {
                warn!(
                    "{} bytes could not be written, {} is not safe to burn",
                    report.faults.len(),
                    cli.output.display()
                );
            }
        }
        OutputFormat::Hex => output::write_hex(&cli.output, &writer)?,
    }
    info!(
        "Generated {} ({} bytes)",
        cli.output.display(),
        writer.capacity()
    );

    Ok(())
}
