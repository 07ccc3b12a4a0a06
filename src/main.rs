mod cli;
mod logging;

use std::collections::BTreeMap;
use std::error::Error;
use std::process;

use clap::Parser;
use log::{error, info};
use style_vars::vars::Processor;

use cli::CliArgs;

fn main() {
    let cli_args = CliArgs::parse();

    if let Err(e) = logging::init_logger(cli_args.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    info!("Command line arguments: {:?}", cli_args);

    match run(cli_args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Processes the stylesheet and renders the mapping as JSON with sorted keys
fn run(cli_args: CliArgs) -> Result<String, Box<dyn Error>> {
    let (path, options) = cli_args.into_options()?;
    let processor = Processor::new(&path, &options)?;

    let sorted: BTreeMap<String, String> = processor.into_object().into_iter().collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}
