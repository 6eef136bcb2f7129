use clap::Parser;
use isokit::cli::{self, Args};
use isokit::init_logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging()?;
    tracing::debug!(version = isokit::VERSION, built = isokit::BUILD_DATE, "Starting isokit");

    cli::run(args)
}
