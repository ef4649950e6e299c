// src/bin/cli.rs
use infobox_norm::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
