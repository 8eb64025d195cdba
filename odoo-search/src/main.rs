use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use odoo_search::OdooSearchError;
use odoo_search::cli::{self, Cli};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn report(err: &OdooSearchError) -> ! {
    if err.is_usage() {
        let kind = match err {
            OdooSearchError::MissingArgument(_) => ErrorKind::MissingRequiredArgument,
            _ => ErrorKind::ValueValidation,
        };
        Cli::command().error(kind, err).exit();
    }

    eprintln!("Error: {err}");
    std::process::exit(err.exit_code());
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli::run(cli).await {
        report(&err);
    }
}
