use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::ds::RomHalf;
use crate::image::{HalfSelect, EEPROM_SIZE};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "Microcode Generator")]
#[command(version = "1.0")]
#[command(about = "Generates the control logic EEPROM image", long_about = None)]
pub(crate) struct Cli {
    /// Output file
    #[arg(short, long, default_value = "output.bin")]
    pub(crate) output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Binary)]
    pub(crate) format: OutputFormat,

    /// EEPROM size in bytes
    #[arg(long, default_value_t = EEPROM_SIZE)]
    pub(crate) size: usize,

    /// Control word half stored in the image ("both" keys it on pin A7)
    #[arg(long, value_enum, default_value_t = Half::Both)]
    pub(crate) half: Half,

    /// Log more (-v for a summary, -vv for every address)
    #[arg(short, long, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Also write the log to this file
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Half {
    Both,
    High,
    Low,
}

impl Half {
    pub(crate) fn select(self) -> HalfSelect {
        match self {
            Half::Both => HalfSelect::Pin,
            Half::High => HalfSelect::Fixed(RomHalf::High),
            Half::Low => HalfSelect::Fixed(RomHalf::Low),
        }
    }
}
