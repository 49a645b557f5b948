mod app;
mod cli;
mod config;
mod consts;
mod core;
mod data;
mod error;
mod output;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::init_logging;

fn main() {
    let cli = Cli::parse();

    // Load config file and merge with CLI args (CLI takes precedence)
    let config = Config::load(cli.config.as_deref());
    let cli = cli.with_config(&config);

    init_logging(cli.debug);
    if let Some(path) = &config.source {
        log::debug!("loaded config from {}", path.display());
    }

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
