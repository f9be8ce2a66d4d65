//! Binary entry point for the `lzom` command-line tool.
//!
//! 1. [`Args::parse`] reads `argv` (clap).
//! 2. [`Args::jobs`] resolves each input to an operation and a destination.
//! 3. [`run`] processes the jobs in parallel with rayon, one dictionary per
//!    file, and reports each outcome in input order.

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use lzom::cli::args::{Args, Job};
use lzom::cli::constants::set_display_level;
use lzom::cli::op_mode::OpMode;
use lzom::io::{compress_file, decompress_file, FileOptions, FileStats};
use lzom::{display, displaylevel};

fn process(job: &Job, opts: &FileOptions) -> anyhow::Result<FileStats> {
    match job.mode {
        OpMode::Decompress => decompress_file(&job.input, &job.output, opts)
            .with_context(|| format!("{}: decompression failed", job.input.display())),
        _ => compress_file(&job.input, &job.output, opts)
            .with_context(|| format!("{}: compression failed", job.input.display())),
    }
}

fn report(job: &Job, stats: &FileStats) {
    match job.mode {
        OpMode::Decompress => displaylevel!(
            2,
            "{:<30} : decoded {} bytes into {}\n",
            job.input.display(),
            stats.bytes_out,
            job.output.display()
        ),
        _ => displaylevel!(
            2,
            "Compressed {} bytes into {} bytes ==> {:.2}% ({})\n",
            stats.bytes_in,
            stats.bytes_out,
            stats.ratio_percent(),
            job.output.display()
        ),
    }
}

/// Run every job; returns the process exit code.
fn run(args: Args) -> anyhow::Result<i32> {
    set_display_level(args.display_level());
    let jobs = args.jobs()?;
    let opts = args.file_options();
    displaylevel!(
        3,
        "*** {} v{} {}-bit, segment size {} ***\n",
        lzom::cli::constants::COMPRESSOR_NAME,
        lzom::LZOM_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8,
        opts.segment_size
    );

    let results: Vec<anyhow::Result<FileStats>> =
        jobs.par_iter().map(|job| process(job, &opts)).collect();

    let mut failures = 0;
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(stats) => report(job, stats),
            Err(e) => {
                failures += 1;
                displaylevel!(1, "Error: {:#}\n", e);
            }
        }
    }
    displaylevel!(4, "{} file(s), {} failed\n", jobs.len(), failures);
    Ok(if failures == 0 { 0 } else { 1 })
}

fn main() {
    let args = Args::parse();
    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            display!("Error: {:#}\n", e);
            1
        }
    };
    std::process::exit(code);
}
