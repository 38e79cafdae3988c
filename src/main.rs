use clap::Parser;
use vcphunter::cli::{init_tracing, run, Cli};

fn main() -> std::process::ExitCode {
    init_tracing();
    run(Cli::parse())
}
