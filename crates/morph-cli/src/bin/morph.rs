use anyhow::Result;
use clap::Parser;

use morph_cli::args::CliArgs;
use morph_cli::commands::{self, EXIT_SUCCESS};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    // Only active when MORPH_LOG or RUST_LOG is set.
    morph_cli::tracing_config::init_tracing(args.json);

    let stdout = std::io::stdout();
    let status = commands::run(&args, &mut stdout.lock())?;
    if status != EXIT_SUCCESS {
        std::process::exit(status);
    }
    Ok(())
}
