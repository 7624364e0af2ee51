use clap::Parser;
use stockwatch::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
