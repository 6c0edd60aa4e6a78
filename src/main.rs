use clap::Parser;
use jobguru::adapter::inbound::cli::command::{CheckCommand, Cli, Commands, ConfigCommand};
use jobguru::adapter::inbound::cli::output::{self, OutputConfig};
use jobguru::adapter::inbound::cli::{check, config, plan, run};
use jobguru::error::Result;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    output::configure(
        OutputConfig::new(cli.json, cli.quiet, cli.verbose),
        &cli.color,
    );

    dispatch(&cli)?;
    Ok(())
}

#[allow(clippy::result_large_err)]
fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => run::execute(cli, &cli.run),
        Some(Commands::Run(args)) => run::execute(cli, &args.or(&cli.run)),
        Some(Commands::Plan(args)) => plan::execute(cli, args),
        Some(Commands::Config(ConfigCommand::Show(args))) => {
            config::execute_show(cli, &args.or(&cli.run))
        }
        Some(Commands::Check(CheckCommand::Layout)) => check::layout::execute(cli),
        Some(Commands::Check(CheckCommand::Server(args))) => check::server::execute(cli, args),
    }
}
