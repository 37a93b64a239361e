//! bedmerge: merge two sorted BED files
//!
//! Usage: bedmerge [OPTIONS] <FILE_A> <FILE_B>

use clap::Parser;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

use bedmerge::bed::BedError;
use bedmerge::commands::{MergeCommand, MergeStats};

#[derive(Parser)]
#[command(name = "bedmerge")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "Merge two coordinate-sorted BED files into one sorted stream", long_about = None)]
struct Cli {
    /// First sorted BED file (use - for stdin); wins ties
    file_a: PathBuf,

    /// Second sorted BED file (use - for stdin)
    file_b: PathBuf,

    /// Write merged records here instead of stdout
    #[arg(short, long, value_name = "output")]
    output: Option<PathBuf>,

    /// Use streaming mode (constant memory; output written before an
    /// input error is kept)
    #[arg(long)]
    streaming: bool,

    /// Use smaller I/O buffers
    #[arg(long)]
    low_memory: bool,

    /// Print merge statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Must be set before any reader or writer is created
    if cli.low_memory {
        bedmerge::config::set_low_memory(true);
    }

    let result = run_merge(cli.file_a, cli.file_b, cli.output, cli.streaming);

    match result {
        Ok(stats) => {
            if cli.stats {
                eprintln!("Merge stats: {}", stats);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_merge(
    file_a: PathBuf,
    file_b: PathBuf,
    output: Option<PathBuf>,
    streaming: bool,
) -> Result<MergeStats, BedError> {
    let cmd = MergeCommand::new().with_streaming(streaming);

    match output {
        Some(path) => {
            let mut file = File::create(&path).map_err(|source| BedError::Open {
                path: path.display().to_string(),
                source,
            })?;
            cmd.run(&file_a, &file_b, &mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            cmd.run(&file_a, &file_b, &mut handle)
        }
    }
}
