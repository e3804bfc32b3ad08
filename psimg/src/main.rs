//! psimg — Sobel edge filter for NetPBM images.
//!
//! Thin wrapper around the `pnmsobel` library: decode a pixmap, run the
//! Sobel operator across N worker threads, write the gradient graymap, and
//! report elapsed time.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use pnmsobel::{DecodeRequest, Representation, probe, sobel, write_grayscale};

/// Sobel edge filter for NetPBM images.
#[derive(Parser, Debug)]
#[command(name = "psimg", version)]
struct Args {
    /// Source pixmap (P3/P6 .ppm) path.
    source: PathBuf,

    /// Target graymap (.pgm) path.
    target: PathBuf,

    /// Number of worker threads (0 is coerced to 1).
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = std::env::args().collect();

    // Fewer than two positionals prints usage and exits with status 0;
    // no processing is attempted.
    if argv.len() < 3 {
        print_usage();
        return Ok(());
    }

    let args = Args::parse_from(&argv);

    let threads = match args.threads {
        None => {
            eprintln!("note: number of threads was not specified, using one thread");
            1
        }
        Some(0) => {
            eprintln!("warning: a thread count of 0 makes no sense, using one thread");
            1
        }
        Some(n) => n,
    };

    let overall_start = Instant::now();

    let data = std::fs::read(&args.source)
        .with_context(|| format!("cannot read {}", args.source.display()))?;
    let info = probe(&data).with_context(|| format!("cannot parse {}", args.source.display()))?;
    eprintln!(
        "{}: {}x{} {:?}",
        args.source.display(),
        info.width,
        info.height,
        info.format
    );

    let image = DecodeRequest::new(&data)
        .decode_rgb()
        .with_context(|| format!("cannot decode {}", args.source.display()))?;

    let sobel_start = Instant::now();
    let edges = sobel(&image, threads).context("sobel filter failed")?;
    let sobel_time = sobel_start.elapsed();

    write_grayscale(&args.target, &edges, Representation::Binary)
        .with_context(|| format!("cannot write {}", args.target.display()))?;

    let overall_time = overall_start.elapsed();
    println!("sobel time:   {:.6} s", sobel_time.as_secs_f64());
    println!("overall time: {:.6} s", overall_time.as_secs_f64());

    Ok(())
}

fn print_usage() {
    eprintln!(
        "\
psimg {} — Sobel edge filter for NetPBM images

USAGE:
    psimg <source-path> <target-path> [thread-count]

The source must be a pixmap (P3/P6). The result is written as a binary
graymap (P5). A missing thread count defaults to 1.",
        env!("CARGO_PKG_VERSION")
    );
}
