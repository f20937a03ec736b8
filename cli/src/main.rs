use clap::Parser;
use retag_cli::Cli;

fn main() {
    let cli = Cli::parse();
    std::process::exit(retag_cli::run_main(cli));
}
