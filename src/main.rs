use clap::Parser;
use refile::cli::{Cli, run};
use refile::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
