use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;
mod session;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("posixid=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_json_flag(cli.json);
    let settings = posixid::Settings::from(&cli.settings);

    match &cli.command {
        Commands::Init => commands::init::run(&cli.directory, settings, format),
        Commands::AddUser(args) => commands::user::run(&cli.directory, settings, args, format),
        Commands::AddGroup(args) => commands::group::run(&cli.directory, settings, args, format),
        Commands::List => commands::list::run(&cli.directory, settings, format),
    }
}
