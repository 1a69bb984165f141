use clap::Parser;

use stockledger_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stockledger_observability::init_with(&cli.log_config());

    let stdout = std::io::stdout();
    stockledger_cli::run(&cli, &mut stdout.lock())
}
