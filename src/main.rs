mod app;
mod cli;
mod data;
mod error;
mod snapshot;
mod state;
mod ui;

use clap::Parser;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let shown = app::run(&cli, app::show_chart)?;
    log::info!("Displayed {shown} latency charts");

    Ok(())
}
