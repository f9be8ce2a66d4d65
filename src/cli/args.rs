//! Command-line parsing for the `lzom` binary.
//!
//! [`Args`] is the raw clap view of `argv`; [`Args::jobs`] turns it into one
//! [`Job`] per input file with its operation and destination resolved.

use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{ArgAction, Parser};

use crate::block::BitstreamVersion;
use crate::cli::op_mode::{output_filename, resolve, OpMode};
use crate::config::{check_segment_size, parse_size, DISPLAY_LEVEL_DEFAULT, SEGMENT_SIZE_DEFAULT};
use crate::io::FileOptions;

/// Scatter-gather LZO1X-1 compressor.
#[derive(Debug, Clone, Parser)]
#[command(name = "lzom", version = crate::LZOM_VERSION_STRING)]
pub struct Args {
    /// Decompress (default for files ending in .lzo)
    #[arg(short = 'd', long = "decompress", conflicts_with = "compress")]
    pub decompress: bool,

    /// Compress even files ending in .lzo
    #[arg(short = 'z', long = "compress")]
    pub compress: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Produce the versioned bitstream with zero-run encoding
    #[arg(long = "rle")]
    pub rle: bool,

    /// Page size used to split files into segments (e.g. 4096, 64K)
    #[arg(long = "segment-size", value_parser = parse_segment_size, default_value_t = SEGMENT_SIZE_DEFAULT)]
    pub segment_size: usize,

    /// Output file (single input only)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Input files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

fn parse_segment_size(s: &str) -> Result<usize, String> {
    parse_size(s)
        .and_then(check_segment_size)
        .ok_or_else(|| format!("invalid segment size: {s}"))
}

/// One file to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: OpMode,
}

impl Args {
    pub fn op_mode(&self) -> OpMode {
        if self.decompress {
            OpMode::Decompress
        } else if self.compress {
            OpMode::Compress
        } else {
            OpMode::Auto
        }
    }

    /// Display level after applying `-v` / `-q`.
    pub fn display_level(&self) -> u32 {
        (DISPLAY_LEVEL_DEFAULT + self.verbose as u32).saturating_sub(self.quiet as u32)
    }

    pub fn file_options(&self) -> FileOptions {
        FileOptions {
            segment_size: self.segment_size,
            version: if self.rle { BitstreamVersion::V1 } else { BitstreamVersion::V0 },
            overwrite: self.force,
        }
    }

    /// Resolve every input into a [`Job`].
    pub fn jobs(&self) -> anyhow::Result<Vec<Job>> {
        if self.output.is_some() && self.files.len() > 1 {
            bail!("bad usage: -o cannot be used with multiple input files");
        }
        let mode = self.op_mode();
        self.files
            .iter()
            .map(|input| {
                let output = match &self.output {
                    Some(o) => o.clone(),
                    None => output_filename(input, mode)?,
                };
                if output == *input {
                    return Err(anyhow!("{}: input and output are the same file", input.display()));
                }
                Ok(Job { input: input.clone(), output, mode: resolve(mode, input) })
            })
            .collect()
    }
}
