use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::GenerateError;
use crate::image::{GenerationReport, ImageWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Raw bytes, ready for the EEPROM programmer
    Binary,
    /// One hex byte per line
    Hex,
}

/// Writes the image byte by byte into `path`. Only failing to open the file
/// is fatal; individual write errors end up in the report.
pub(crate) fn write_binary(path: &Path, writer: &ImageWriter) -> Result<GenerationReport, GenerateError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| GenerateError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(writer.generate(&mut file))
}

pub(crate) fn write_hex(path: &Path, writer: &ImageWriter) -> Result<(), GenerateError> {
    let file = File::create(path).map_err(|source| GenerateError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    format_hex(BufWriter::new(file), &writer.render()).map_err(|source| GenerateError::Output {
        path: path.to_path_buf(),
        source,
    })
}

fn format_hex<W: Write>(mut out: W, image: &[u8]) -> io::Result<()> {
    for byte in image {
        writeln!(out, "{:02X}", byte)?;
    }
    out.flush()
}
