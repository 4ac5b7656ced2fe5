mod cli;
mod feats_cmd;
mod images_cmd;
mod page_range;
mod shared;
mod text_cmd;
mod words_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Text { input, text } => text_cmd::run(input, &text.segmenter_options()),
        Commands::Words { input, text } => words_cmd::run(input, &text.segmenter_options()),
        Commands::Images { input, images } => images_cmd::run(input, &images.filter_options()),
        Commands::Feats { input } => feats_cmd::run(input),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
