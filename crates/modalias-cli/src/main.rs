//! modalias CLI entry point.

use clap::Parser;
use miette::Result;
use modalias_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    let style = ui::Style::new(logger::should_use_colors(args.no_color));

    let mut stdout = std::io::stdout().lock();
    commands::execute(&args, &mut stdout, &style).map_err(error::cli_error_to_miette)
}
