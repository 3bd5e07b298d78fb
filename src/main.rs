use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    init_tracing("warn");
    let code = cli::run(cli::Cli::parse());
    std::process::exit(code);
}

/// Initialize the tracing subscriber on stderr; `RUST_LOG` overrides the level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
