use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use huffman_file_compression::{decompress_file, logging};


/// Restore a file compressed by huffzip.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {

    /// Archive produced by huffzip
    archive: PathBuf,

    /// Where to write the restored file
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

    if let Err(err) = decompress_file(&args.archive, &args.destination) {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
