//! Theme Release CLI Binary
//!
//! Publishes the theme for the workspace and bumps its manifest version.

use anyhow::Context;
use clap::Parser;
use std::process;
use theme_release::output::Output;
use theme_release::tooling::cli::{Cli, CliContext};

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.workspace.clone(), cli.config.clone())
        .with_context(|| format!("loading settings for {}", cli.workspace.display()))?;

    if let Err(e) = context.init_logging(cli) {
        Output::warning(format!("Logging disabled: {}", e));
    }

    Ok(context.execute(&cli.command())?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            Output::error(format!("Error: {:#}", e));
            process::exit(1);
        }
    }
}
