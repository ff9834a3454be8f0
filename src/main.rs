use clap::Parser;
use coinlens::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
