use clap::Parser;
use std::process::ExitCode;

use panel::cli::{Cli, Command};
use panel::config::{default_store_dir, load_config};
use panel::{commands, PanelError};

fn run() -> Result<(), PanelError> {
    let cli = Cli::parse();
    let config = load_config()?;
    let store_dir = cli.store.unwrap_or_else(default_store_dir);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Filter(args) => {
            commands::handle_filter(&config, &args, std::io::stdin().lock(), &mut stdout)
        }
        Command::Record(args) => commands::handle_record(&store_dir, &config, &args, &mut stdout),
        Command::Load(args) => commands::handle_load(&store_dir, &config, &args, &mut stdout),
        Command::Missions(args) => {
            commands::handle_missions(&store_dir, &config, &args, &mut stdout)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("panel: {e}");
            ExitCode::from(1)
        }
    }
}
