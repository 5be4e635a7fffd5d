use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use huffman_file_compression::{compress_file, logging};


/// Compress a file with Huffman coding.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {

    /// File to compress
    source: PathBuf,

    /// Where to write the archive (relative path)
    destination: PathBuf,

    /// Print more diagnostics (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool

}


fn main() -> ExitCode {

    let args = Args::parse();

    logging::init(args.verbose, args.quiet);

    match compress_file(&args.source, &args.destination) {

        Ok(report) => {
            if !args.quiet {
                println!("Original size: {} bytes\nCompressed size: {} bytes\nCompression ratio: {:.2}",
                    report.original_bytes, report.archive_bytes, report.ratio());
            }
            ExitCode::SUCCESS
        },

        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        },
    }
}
