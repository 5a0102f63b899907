use clap::Parser;
use fieldops::cli::{self, Cli};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    cli::run(cli)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "fieldops=debug,fieldops_seeker=debug",
        _ => "fieldops=trace,fieldops_seeker=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
